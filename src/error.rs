use thiserror::Error;

use crate::permutation::PermutationError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("The number of cards should be 4, 8, 16 or 32, got {cards}")]
    InvalidDeckSize { cards: usize },

    #[error("The seed should be an integer between 1 and {max}, got {seed}")]
    SeedOutOfRange { seed: u128, max: u128 },

    #[error("The seed range {first}..={last} is empty")]
    EmptySeedRange { first: u128, last: u128 },

    #[error("Impossible to split an orbit of length {length} into two orbits of length at most {max_length}")]
    OrbitTooLong { length: usize, max_length: usize },

    #[error(transparent)]
    Permutation(#[from] PermutationError),
}

impl GameError {
    /// Bad input from the caller: deck size or seed.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GameError::InvalidDeckSize { .. }
                | GameError::SeedOutOfRange { .. }
                | GameError::EmptySeedRange { .. }
        )
    }

    /// A broken internal invariant. Never produced for a valid deck.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            GameError::OrbitTooLong { .. } | GameError::Permutation(_)
        )
    }
}
