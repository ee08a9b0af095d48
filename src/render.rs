//! Plain-text grids of a board, one row per suit and one column per rank.

use std::fmt::Write;

use itertools::Itertools;

use crate::{
    board::BoardState,
    deck::{Card, Deck},
};

/// Renders `board` as a boxed grid, with `title` on the first line if given.
///
/// Every cell is the card text padded to the widest card on the board. The
/// result has no trailing newline.
pub fn render_grid(board: &BoardState, title: Option<&str>) -> String {
    let deck = board.deck();
    let mut rows = vec![Vec::with_capacity(deck.ranks().len()); deck.suits().len()];
    for (position, coord) in deck.layout() {
        debug_assert_eq!(rows[coord.row].len(), coord.col);
        rows[coord.row].push(board.card_at(position));
    }
    grid(&rows, title)
}

/// Renders the sorted configuration of `deck`.
pub fn render_sorted(deck: Deck, title: Option<&str>) -> String {
    render_grid(&BoardState::sorted(deck), title)
}

fn grid(rows: &[Vec<Card>], title: Option<&str>) -> String {
    let texts = rows
        .iter()
        .map(|row| row.iter().map(Card::to_string).collect_vec())
        .collect_vec();
    let width = texts.iter().flatten().map(String::len).max().unwrap_or(0);
    let columns = texts.first().map_or(0, Vec::len);
    let rule = format!(
        "+{}+",
        std::iter::repeat("-".repeat(width + 2))
            .take(columns)
            .join("+")
    );

    let mut out = String::new();
    if let Some(title) = title {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(&rule);
    for row in &texts {
        let cells = row.iter().map(|t| format!(" {t:<width$} ")).join("|");
        // writing to a String cannot fail
        let _ = write!(out, "\n|{cells}|\n{rule}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_four() {
        let deck = Deck::new(4).unwrap();
        insta::assert_snapshot!(render_sorted(deck, Some("Sorted configuration (for reference)")), @r"
        Sorted configuration (for reference)
        +-------------+-------------+
        | A of Hearts | K of Hearts |
        +-------------+-------------+
        | A of Spades | K of Spades |
        +-------------+-------------+
        ");
    }

    #[test]
    fn shuffled_four_without_title() {
        let deck = Deck::new(4).unwrap();
        let board = BoardState::shuffle(deck, 24).unwrap();
        insta::assert_snapshot!(render_grid(&board, None), @r"
        +-------------+-------------+
        | K of Spades | A of Spades |
        +-------------+-------------+
        | K of Hearts | A of Hearts |
        +-------------+-------------+
        ");
    }

    #[test]
    fn cells_are_padded_to_widest_card() {
        let deck = Deck::new(32).unwrap();
        let text = render_sorted(deck, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines.iter().map(|l| l.len()).all_equal());
        assert!(lines[1].starts_with("| A of Hearts    | K of Hearts    |"));
        assert!(lines[5].contains("| 10 of Diamonds |"));
        assert!(!text.ends_with('\n'));
    }
}
