//! # Games
//!
//! A game is one shuffled deck. Playing it runs the analysis phases in order,
//! each one consuming the output of the previous one:
//!
//! 1. shuffle the sorted deck with the seed,
//! 2. sweep every single swap ([`crate::brute_force`]),
//! 3. propose swaps from the orbits ([`crate::proposer`]),
//! 4. compare the two when both ran.

use log::debug;

use crate::{
    board::BoardState,
    brute_force::{find_all_solving_swaps, BruteForceReport},
    deck::Deck,
    error::GameError,
    proposer::{matches_brute_force, propose, CrossCheck, Proposal},
    swap::Swap,
};

/// What to play and which phases to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub cards: usize,
    /// 1-based index of the shuffle, in `1..=cards!`.
    pub seed: u128,
    pub brute_force: bool,
    pub investigate_orbits: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cards: 8,
            seed: 152,
            brute_force: true,
            investigate_orbits: true,
        }
    }
}

impl GameConfig {
    pub fn new(cards: usize, seed: u128) -> Self {
        GameConfig {
            cards,
            seed,
            ..Default::default()
        }
    }

    pub fn with_brute_force(mut self, enabled: bool) -> Self {
        self.brute_force = enabled;
        self
    }

    pub fn with_orbits(mut self, enabled: bool) -> Self {
        self.investigate_orbits = enabled;
        self
    }
}

/// How the orbit proposal compares with the brute-force sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// The board has an orbit longer than half the deck; result of
    /// [`matches_brute_force`] on the proposal.
    Split(CrossCheck),
    /// Every orbit is already short; whether both lists contain "No swap".
    AlreadyStable(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameReport {
    pub seed: u128,
    pub board: BoardState,
    pub brute_force: Option<BruteForceReport>,
    pub proposal: Option<Proposal>,
    pub verdict: Option<Verdict>,
}

impl GameReport {
    /// Whether the sweep found at least one solving swap. Always false when the
    /// sweep did not run.
    pub fn is_solved(&self) -> bool {
        self.brute_force
            .as_ref()
            .is_some_and(BruteForceReport::is_solvable)
    }

    /// Number of swaps tried by the sweep, if it ran.
    pub fn trials(&self) -> Option<usize> {
        self.brute_force.as_ref().map(BruteForceReport::trials)
    }

    pub fn solving_swaps(&self) -> Vec<Swap> {
        self.brute_force
            .iter()
            .flat_map(|report| report.swaps())
            .collect()
    }

    pub fn proposed_swaps(&self) -> &[Swap] {
        self.proposal
            .as_ref()
            .map(Proposal::swaps)
            .unwrap_or_default()
    }
}

/// A validated, shuffled game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardGame {
    config: GameConfig,
    deck: Deck,
    original: BoardState,
}

impl CardGame {
    /// Validates the deck size and seed and shuffles the deck.
    ///
    /// ```
    /// # use orbitswap::game::{CardGame, GameConfig};
    /// assert!(CardGame::new(GameConfig::new(6, 1)).unwrap_err().is_invalid_argument());
    /// assert!(CardGame::new(GameConfig::new(8, 0)).unwrap_err().is_invalid_argument());
    /// assert!(CardGame::new(GameConfig::default()).is_ok());
    /// ```
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let deck = Deck::new(config.cards)?;
        let original = BoardState::shuffle(deck, config.seed)?;
        Ok(CardGame {
            config,
            deck,
            original,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn deck(&self) -> Deck {
        self.deck
    }

    pub fn seed(&self) -> u128 {
        self.config.seed
    }

    /// The board right after the shuffle.
    pub fn original_board(&self) -> &BoardState {
        &self.original
    }

    pub fn sorted_board(&self) -> BoardState {
        BoardState::sorted(self.deck)
    }

    pub fn play(&self) -> Result<GameReport, GameError> {
        debug!(
            "Playing {} cards with seed {}",
            self.deck.len(),
            self.config.seed
        );
        let max_length = self.deck.max_steps();

        let brute_force = self
            .config
            .brute_force
            .then(|| find_all_solving_swaps(&self.original));

        let proposal = if self.config.investigate_orbits {
            Some(propose(&self.original, max_length)?)
        } else {
            None
        };

        let verdict = match (&brute_force, &proposal) {
            (Some(report), Some(proposal)) => Some(if proposal.larger_orbit_exists() {
                Verdict::Split(matches_brute_force(proposal.swaps(), report))
            } else {
                Verdict::AlreadyStable(
                    report.contains_no_swap() && proposal.swaps().contains(&Swap::NoSwap),
                )
            }),
            _ => None,
        };

        let report = GameReport {
            seed: self.config.seed,
            board: self.original.clone(),
            brute_force,
            proposal,
            verdict,
        };
        debug!(
            "Seed {} done: solved = {}, verdict = {:?}",
            report.seed,
            report.is_solved(),
            report.verdict
        );
        Ok(report)
    }
}

/// Builds and plays a game in one go.
pub fn play(config: GameConfig) -> Result<GameReport, GameError> {
    CardGame::new(config)?.play()
}
