//! Plays every shuffle of a deck and looks for one that no single swap fixes.

use log::info;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    board::BoardState,
    brute_force::max_trials,
    deck::{Deck, DeckSize},
    error::GameError,
    game::{play, GameConfig},
};

/// A shuffle for which the sweep found no solving swap.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counterexample {
    pub seed: u128,
    /// Swaps tried on it.
    pub trials: usize,
    /// Swaps a full sweep tries, `N(N-1)/2 + 1`.
    pub max_trials: usize,
    pub board: BoardState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerificationReport {
    pub deck_size: DeckSize,
    /// Seeds from the start of the range up to and including the counterexample,
    /// or the whole range when there is none.
    pub checked: u128,
    /// Lowest failing seed of the range.
    pub counterexample: Option<Counterexample>,
}

impl VerificationReport {
    pub fn all_solved(&self) -> bool {
        self.counterexample.is_none()
    }
}

/// Checks a range of seeds of one deck size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchVerifier {
    deck: Deck,
    first: u128,
    last: u128,
}

impl BatchVerifier {
    /// Verifier over every shuffle `1..=N!`.
    pub fn new(cards: usize) -> Result<Self, GameError> {
        let deck = Deck::new(cards)?;
        Ok(BatchVerifier {
            deck,
            first: 1,
            last: deck.seed_count(),
        })
    }

    /// Restricts the verifier to `first..=last`.
    pub fn with_seeds(self, first: u128, last: u128) -> Result<Self, GameError> {
        let max = self.deck.seed_count();
        for seed in [first, last] {
            if seed == 0 || seed > max {
                return Err(GameError::SeedOutOfRange { seed, max });
            }
        }
        if first > last {
            return Err(GameError::EmptySeedRange { first, last });
        }
        Ok(BatchVerifier {
            first,
            last,
            ..self
        })
    }

    pub fn deck(&self) -> Deck {
        self.deck
    }

    pub fn seeds(&self) -> std::ops::RangeInclusive<u128> {
        self.first..=self.last
    }

    /// Number of seeds in the range.
    pub fn len(&self) -> u128 {
        self.last - self.first + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Plays every seed of the range in parallel.
    ///
    /// `on_checked` is called once per finished game, from whichever thread
    /// played it. The search stops at the lowest seed that has no solving swap
    /// or whose game fails; seeds above it may still have been played.
    pub fn run(&self, on_checked: impl Fn() + Sync) -> Result<VerificationReport, GameError> {
        let cards = self.deck.len();
        info!(
            "Checking seeds {}..={} of {cards} cards",
            self.first, self.last
        );

        let found = self.seeds().into_par_iter().find_map_first(|seed| {
            let outcome = play(GameConfig::new(cards, seed));
            on_checked();
            match outcome {
                Ok(report) if report.is_solved() => None,
                Ok(report) => Some(Ok(Counterexample {
                    seed,
                    trials: report.trials().unwrap_or_default(),
                    max_trials: max_trials(cards),
                    board: report.board,
                })),
                Err(err) => Some(Err(err)),
            }
        });

        let counterexample = found.transpose()?;
        let checked = match &counterexample {
            Some(c) => c.seed - self.first + 1,
            None => self.len(),
        };
        match &counterexample {
            Some(c) => info!("Seed {} admits no solving swap", c.seed),
            None => info!("All {checked} configurations of {cards} cards are solvable"),
        }

        Ok(VerificationReport {
            deck_size: self.deck.size(),
            checked,
            counterexample,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test_log::test]
    fn every_four_card_shuffle_is_solvable() {
        let verifier = BatchVerifier::new(4).unwrap();
        assert_eq!(verifier.len(), 24);

        let calls = AtomicUsize::new(0);
        let report = verifier
            .run(|| {
                calls.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        assert!(report.all_solved());
        assert_eq!(report.checked, 24);
        assert_eq!(report.deck_size, DeckSize::Four);
        assert_eq!(calls.load(Ordering::Relaxed), 24);
    }

    #[test]
    fn eight_card_range() {
        let report = BatchVerifier::new(8)
            .unwrap()
            .with_seeds(5900, 6000)
            .unwrap()
            .run(|| {})
            .unwrap();
        assert!(report.all_solved());
        assert_eq!(report.checked, 101);
    }

    #[test]
    fn single_seed_range() {
        let verifier = BatchVerifier::new(16)
            .unwrap()
            .with_seeds(152, 152)
            .unwrap();
        assert_eq!(verifier.seeds(), 152..=152);
        assert_eq!(verifier.run(|| {}).unwrap().checked, 1);
    }

    #[test]
    fn rejects_bad_ranges() {
        let verifier = BatchVerifier::new(4).unwrap();
        assert_eq!(
            verifier.with_seeds(0, 3).unwrap_err(),
            GameError::SeedOutOfRange { seed: 0, max: 24 }
        );
        assert_eq!(
            verifier.with_seeds(1, 25).unwrap_err(),
            GameError::SeedOutOfRange { seed: 25, max: 24 }
        );
        let err = verifier.with_seeds(10, 9).unwrap_err();
        assert_eq!(err, GameError::EmptySeedRange { first: 10, last: 9 });
        assert!(err.is_invalid_argument());
        assert!(BatchVerifier::new(6).unwrap_err().is_invalid_argument());
    }
}
