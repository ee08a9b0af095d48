//! Proposes swaps straight from the orbit structure and cross-checks them
//! against the brute-force sweep.

use std::cmp::Reverse;

use ahash::AHashMap;
use log::debug;

use crate::{
    board::BoardState,
    brute_force::BruteForceReport,
    error::GameError,
    orbit::{decompose, swaps_for_orbit, Orbit},
    swap::Swap,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proposal {
    orbits: Vec<Orbit>,
    oversized: Option<usize>,
    swaps: Vec<Swap>,
}

impl Proposal {
    /// The orbits of the analysed board, ordered by smallest label.
    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// The orbit longer than the bound, if the board has one.
    pub fn oversized_orbit(&self) -> Option<&Orbit> {
        self.oversized.map(|i| &self.orbits[i])
    }

    pub fn larger_orbit_exists(&self) -> bool {
        self.oversized.is_some()
    }

    pub fn swaps(&self) -> &[Swap] {
        &self.swaps
    }
}

/// Proposes swaps for `board` without trying any of them.
///
/// If an orbit is longer than `max_length` it is the only one (two of them would
/// not fit in the deck), and the proposal is [`swaps_for_orbit`] of that orbit.
/// Otherwise the proposal is the union of [`swaps_for_orbit`] over all orbits,
/// deduplicated and sorted by descending text.
///
/// ```
/// # use orbitswap::{board::BoardState, deck::Deck, proposer::propose};
/// let deck = Deck::new(4).unwrap();
/// let proposal = propose(&BoardState::sorted(deck), deck.max_steps()).unwrap();
/// assert!(!proposal.larger_orbit_exists());
/// assert_eq!(proposal.swaps().len(), 1);
/// assert!(proposal.swaps()[0].is_no_swap());
/// ```
pub fn propose(board: &BoardState, max_length: usize) -> Result<Proposal, GameError> {
    let orbits = decompose(board);
    let oversized = orbits.iter().position(|o| o.len() > max_length);

    let swaps = match oversized {
        Some(i) => {
            debug!(
                "Orbit of length {} exceeds {max_length}, proposing splits",
                orbits[i].len()
            );
            swaps_for_orbit(&orbits[i], max_length)?
        }
        None => {
            let mut swaps = Vec::new();
            for orbit in &orbits {
                swaps.extend(swaps_for_orbit(orbit, max_length)?);
            }
            swaps.sort_by_cached_key(|s| Reverse(s.to_string()));
            swaps.dedup();
            swaps
        }
    };

    Ok(Proposal {
        orbits,
        oversized,
        swaps,
    })
}

/// Outcome of comparing proposed swaps with the brute-force list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossCheck {
    /// Every proposed swap appears in the brute-force list.
    pub contained: bool,
    /// Every brute-force entry was matched by a proposed swap.
    pub exact: bool,
}

/// Matches each proposed swap against one unused entry of the brute-force
/// list, written either way round.
///
/// Stops at the first proposed swap without a match, reporting
/// `contained = exact = false`.
pub fn matches_brute_force(proposed: &[Swap], brute_force: &BruteForceReport) -> CrossCheck {
    let mut remaining: AHashMap<Swap, usize> = AHashMap::new();
    for swap in brute_force.swaps() {
        *remaining.entry(swap).or_default() += 1;
    }

    for swap in proposed {
        let matched = [*swap, swap.reversed()]
            .into_iter()
            .find(|s| remaining.contains_key(s));
        let Some(matched) = matched else {
            return CrossCheck {
                contained: false,
                exact: false,
            };
        };
        if let Some(count) = remaining.get_mut(&matched) {
            *count -= 1;
            if *count == 0 {
                remaining.remove(&matched);
            }
        }
    }

    CrossCheck {
        contained: true,
        exact: remaining.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::{
        brute_force::find_all_solving_swaps,
        deck::{Deck, Label},
    };

    fn texts(swaps: &[Swap]) -> Vec<String> {
        swaps.iter().map(|s| s.to_string()).collect_vec()
    }

    #[test]
    fn stable_board_lists_sorted_union() {
        let deck = Deck::new(4).unwrap();
        let board = BoardState::shuffle(deck, 24).unwrap();
        let proposal = propose(&board, deck.max_steps()).unwrap();
        assert!(!proposal.larger_orbit_exists());
        assert_eq!(proposal.orbits().len(), 2);
        insta::assert_debug_snapshot!(texts(proposal.swaps()), @r#"
        [
            "No swap",
            "K of Spades <-> A of Hearts",
            "A of Spades <-> K of Hearts",
        ]
        "#);
    }

    #[test]
    fn oversized_orbit_is_split() {
        let deck = Deck::new(4).unwrap();
        let board = BoardState::shuffle(deck, 4).unwrap();
        let proposal = propose(&board, deck.max_steps()).unwrap();
        let orbit = proposal.oversized_orbit().unwrap();
        assert_eq!(orbit.len(), 3);
        assert_eq!(
            texts(proposal.swaps()),
            vec![
                "K of Spades <-> A of Spades",
                "K of Spades <-> K of Hearts",
                "A of Spades <-> K of Hearts"
            ]
        );

        let report = find_all_solving_swaps(&board);
        assert_eq!(
            matches_brute_force(proposal.swaps(), &report),
            CrossCheck {
                contained: true,
                exact: true
            }
        );
    }

    #[test]
    fn missing_swap_is_reported() {
        let deck = Deck::new(4).unwrap();
        let report = find_all_solving_swaps(&BoardState::shuffle(deck, 4).unwrap());
        let stranger = Swap::between(deck.card(Label(1)), deck.card(Label(2)));
        assert_eq!(
            matches_brute_force(&[stranger], &report),
            CrossCheck {
                contained: false,
                exact: false
            }
        );
        assert_eq!(
            matches_brute_force(&[], &report),
            CrossCheck {
                contained: true,
                exact: false
            }
        );
    }

    #[test]
    fn each_entry_is_matched_once() {
        let deck = Deck::new(4).unwrap();
        let report = find_all_solving_swaps(&BoardState::shuffle(deck, 4).unwrap());
        let first = report.solving_swaps()[0].swap;
        let check = matches_brute_force(&[first, first.reversed()], &report);
        assert!(!check.contained);
    }
}
