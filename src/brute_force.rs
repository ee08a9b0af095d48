//! Exhaustive search over single swaps.
//!
//! Every candidate transposition of two positions is applied to the original
//! board and kept if the resulting board is feasible. The sweep never stops
//! early.

use log::{debug, trace};

use crate::{board::BoardState, deck::Label, feasibility::is_feasible, swap::Swap};

/// A swap that makes the board feasible, with the positions it was tried at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolvingSwap {
    pub positions: (Label, Label),
    /// The cards originally at those positions, or [`Swap::NoSwap`] for the
    /// `(1, 1)` trial.
    pub swap: Swap,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BruteForceReport {
    solving: Vec<SolvingSwap>,
    trials: usize,
}

impl BruteForceReport {
    /// All solving swaps in trial order.
    ///
    /// The list is not deduplicated: it holds one entry per solving trial.
    pub fn solving_swaps(&self) -> &[SolvingSwap] {
        &self.solving
    }

    pub fn swaps(&self) -> impl Iterator<Item = Swap> + '_ {
        self.solving.iter().map(|s| s.swap)
    }

    /// Number of boards checked.
    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn is_solvable(&self) -> bool {
        !self.solving.is_empty()
    }

    pub fn contains_no_swap(&self) -> bool {
        self.swaps().any(|s| s.is_no_swap())
    }
}

/// Number of trials of a full sweep over `cards` positions: every unordered
/// pair plus the identity.
pub fn max_trials(cards: usize) -> usize {
    cards * cards.saturating_sub(1) / 2 + 1
}

/// The position pairs tried by [`find_all_solving_swaps`], in order.
///
/// `(1, 1)` stands for "no swap"; the other self-pairs are skipped.
///
/// ```
/// # use orbitswap::{brute_force::candidate_pairs, deck::Label};
/// let pairs: Vec<_> = candidate_pairs(3).map(|(a, b)| (a.0, b.0)).collect();
/// assert_eq!(pairs, vec![(1, 1), (1, 2), (1, 3), (2, 3)]);
/// ```
pub fn candidate_pairs(cards: usize) -> impl Iterator<Item = (Label, Label)> {
    (1..=cards).flat_map(move |i| {
        let min_j = if i == 1 { i } else { i + 1 };
        (min_j..=cards).map(move |j| (Label(i), Label(j)))
    })
}

/// Tries every candidate pair on `original` and collects the ones after which
/// every card is found within half the deck.
pub fn find_all_solving_swaps(original: &BoardState) -> BruteForceReport {
    let deck = original.deck();
    let max_steps = deck.max_steps();
    let mut solving = Vec::new();
    let mut trials = 0;

    for (i, j) in candidate_pairs(deck.len()) {
        trials += 1;
        let board = original.with_swap(i, j);
        if is_feasible(&board, max_steps) {
            let swap = Swap::between(original.card_at(i), original.card_at(j));
            trace!("positions {i} and {j} solve the board: {swap}");
            solving.push(SolvingSwap {
                positions: (i, j),
                swap,
            });
        }
    }

    debug!(
        "Brute force tried {trials} swaps, {} of them solve the board",
        solving.len()
    );
    BruteForceReport { solving, trials }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;

    fn positions(report: &BruteForceReport) -> Vec<(usize, usize)> {
        report
            .solving_swaps()
            .iter()
            .map(|s| (s.positions.0 .0, s.positions.1 .0))
            .collect()
    }

    #[test]
    fn candidate_count() {
        for cards in [4, 8, 16, 32] {
            assert_eq!(candidate_pairs(cards).count(), max_trials(cards));
        }
        assert_eq!(max_trials(8), 29);
    }

    #[test_log::test]
    fn documented_seed() {
        let deck = Deck::new(8).unwrap();
        let report = find_all_solving_swaps(&BoardState::shuffle(deck, 152).unwrap());
        assert_eq!(report.trials(), 29);
        assert_eq!(
            positions(&report),
            vec![
                (1, 1),
                (1, 2),
                (1, 7),
                (1, 8),
                (2, 7),
                (2, 8),
                (3, 4),
                (3, 5),
                (3, 6),
                (4, 5),
                (4, 6),
                (5, 6),
                (7, 8)
            ]
        );
        assert!(report.contains_no_swap());
        assert_eq!(
            report.solving_swaps()[1].swap.to_string(),
            "A of Hearts <-> K of Hearts"
        );
    }

    #[test]
    fn long_cycle_has_no_identity() {
        let deck = Deck::new(4).unwrap();
        let report = find_all_solving_swaps(&BoardState::shuffle(deck, 4).unwrap());
        assert_eq!(positions(&report), vec![(2, 3), (2, 4), (3, 4)]);
        assert!(!report.contains_no_swap());
        assert!(report.is_solvable());
        let swaps: Vec<String> = report.swaps().map(|s| s.to_string()).collect();
        assert_eq!(
            swaps,
            vec![
                "K of Spades <-> K of Hearts",
                "K of Spades <-> A of Spades",
                "K of Hearts <-> A of Spades"
            ]
        );
    }

    #[test]
    fn eight_cycle_only_splits_in_half() {
        let deck = Deck::new(8).unwrap();
        let report = find_all_solving_swaps(&BoardState::shuffle(deck, 5914).unwrap());
        assert_eq!(positions(&report), vec![(1, 5), (2, 6), (3, 7), (4, 8)]);
    }
}
