//! The cycle-following strategy.
//!
//! The prisoner looking for card `L` opens the box at position `L` (where `L`
//! lies in the sorted configuration). Each opened box shows a card; if it is not
//! `L`, the next box opened is the position of that card in the sorted
//! configuration. At most `max_steps` boxes may be opened.
//!
//! The card is found exactly when the cycle of the arrangement containing `L` has
//! at most `max_steps` elements, so a board is feasible iff all of its cycles do.

use crate::{board::BoardState, deck::Label};

/// Number of boxes opened before `target` is found, or `None` if it is not
/// found within `max_steps`.
pub fn steps_to_find(board: &BoardState, target: Label, max_steps: usize) -> Option<usize> {
    let mut position = target;
    for step in 1..=max_steps {
        let found = board.label_at(position);
        if found == target {
            return Some(step);
        }
        position = found;
    }
    None
}

/// Whether every card is found within `max_steps` by following its cycle.
///
/// Labels are checked in ascending order and the check stops at the first card
/// that is not found.
///
/// ```
/// # use orbitswap::{board::BoardState, deck::Deck, feasibility::is_feasible};
/// let deck = Deck::new(8).unwrap();
/// assert!(is_feasible(&BoardState::shuffle(deck, 152).unwrap(), deck.max_steps()));
/// assert!(!is_feasible(&BoardState::shuffle(deck, 34).unwrap(), deck.max_steps()));
/// ```
pub fn is_feasible(board: &BoardState, max_steps: usize) -> bool {
    board
        .deck()
        .labels()
        .all(|label| steps_to_find(board, label, max_steps).is_some())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::deck::{Deck, DeckSize};

    #[test]
    fn sorted_board_needs_one_step() {
        let deck = Deck::new(16).unwrap();
        let board = BoardState::sorted(deck);
        for label in deck.labels() {
            assert_eq!(steps_to_find(&board, label, deck.max_steps()), Some(1));
        }
        assert!(is_feasible(&board, deck.max_steps()));
    }

    #[test]
    fn steps_follow_the_cycle() {
        let deck = Deck::new(8).unwrap();
        // cycle 3 -> 6 -> 5 -> 4 of length 4, and 7 <-> 8
        let board = BoardState::shuffle(deck, 152).unwrap();
        let steps: Vec<_> = deck
            .labels()
            .map(|l| steps_to_find(&board, l, deck.max_steps()))
            .collect();
        assert_eq!(
            steps,
            vec![Some(1), Some(1), Some(4), Some(4), Some(4), Some(4), Some(2), Some(2)]
        );
        assert_eq!(steps_to_find(&board, Label(3), 3), None);
        assert!(!is_feasible(&board, 3));
    }

    #[test]
    fn full_cycle_fails() {
        let deck = Deck::new(8).unwrap();
        let board = BoardState::shuffle(deck, 5914).unwrap();
        assert!(deck
            .labels()
            .all(|l| steps_to_find(&board, l, deck.max_steps()).is_none()));
        assert!(is_feasible(&board, 8));
    }

    fn board_strategy() -> impl Strategy<Value = BoardState> {
        (prop::sample::select(DeckSize::ALL.to_vec()), any::<u128>()).prop_map(|(size, raw)| {
            let deck = Deck::from_size(size);
            BoardState::shuffle(deck, raw % deck.seed_count() + 1).unwrap()
        })
    }

    proptest! {
        #[test]
        fn feasible_iff_cycles_are_short(board in board_strategy()) {
            let max = board.deck().max_steps();
            let longest = board
                .arrangement()
                .find_cycles()
                .iter()
                .map(Vec::len)
                .max()
                .unwrap_or(0);
            prop_assert_eq!(is_feasible(&board, max), longest <= max);
        }
    }
}
