//! # Orbitswap
//!
//! Orbitswap analyses the card version of the 100 prisoners puzzle. `N` labelled
//! cards are shuffled onto a grid; each card's owner opens the box at their own
//! label, then the box labelled by the card found there, and so on, for at most
//! `N / 2` boxes. Everybody succeeds exactly when no cycle of the shuffle is
//! longer than `N / 2`.
//!
//! Before the search starts one pair of cards may be swapped. The library finds
//! every such swap two ways:
//!
//! - [`brute_force`] tries every transposition and keeps those that work,
//! - [`proposer`] reads them off the cycle structure ([`orbit`]) directly,
//!
//! and [`game`] plays both and compares them.
//!
//! ```
//! use orbitswap::game::{play, GameConfig, Verdict};
//!
//! let report = play(GameConfig::new(8, 5914)).unwrap();
//! assert!(report.is_solved());
//! assert!(matches!(report.verdict, Some(Verdict::Split(check)) if check.exact));
//! ```

pub mod board;
pub mod brute_force;
pub mod deck;
pub mod error;
pub mod feasibility;
pub mod game;
pub mod orbit;
pub mod permutation;
pub mod proposer;
pub mod render;
pub mod swap;
pub mod verify;

pub use error::GameError;
pub use game::{play, CardGame, GameConfig, GameReport, Verdict};
pub use swap::Swap;
