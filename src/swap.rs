use std::fmt;

use crate::deck::Card;

/// Text of the identity swap.
pub const NO_SWAP: &str = "No swap";
/// Separator between the two cards of a swap.
pub const SWAP_SEPARATOR: &str = " <-> ";

/// A transposition of two cards, or the identity.
///
/// The textual form is part of the contract: `"No swap"` for the identity and
/// `"<card> <-> <card>"` otherwise.
///
/// ```
/// # use orbitswap::{deck::{Card, Rank, Suit}, swap::Swap};
/// let a = Card::new(Suit::Hearts, Rank::Ace);
/// let b = Card::new(Suit::Spades, Rank::King);
/// assert_eq!(Swap::between(a, b).to_string(), "A of Hearts <-> K of Spades");
/// assert_eq!(Swap::between(a, a).to_string(), "No swap");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Swap {
    NoSwap,
    Exchange(Card, Card),
}

impl Swap {
    /// The swap exchanging `a` and `b`; the identity when they are the same card.
    pub fn between(a: Card, b: Card) -> Self {
        if a == b {
            Swap::NoSwap
        } else {
            Swap::Exchange(a, b)
        }
    }

    /// Same transposition, cards written in the other order.
    pub fn reversed(self) -> Self {
        match self {
            Swap::NoSwap => Swap::NoSwap,
            Swap::Exchange(a, b) => Swap::Exchange(b, a),
        }
    }

    pub fn is_no_swap(&self) -> bool {
        matches!(self, Swap::NoSwap)
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Swap::NoSwap => f.write_str(NO_SWAP),
            Swap::Exchange(a, b) => write!(f, "{a}{SWAP_SEPARATOR}{b}"),
        }
    }
}
