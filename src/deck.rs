//! # Deck
//!
//! The labelled card universe for a given number of cards.
//!
//! A deck of `N` cards uses the first `suits` entries of [`Suit::ALL`] and the first
//! `N / suits` entries of [`Rank::ALL`], where `suits` is 2 for 4 and 8 cards and 4
//! otherwise. Card `L` (1-based [`Label`]) in sorted order is
//! `(suit[(L-1) / ranks], rank[(L-1) % ranks])`, and the same label doubles as the
//! grid position `((L-1) / ranks, (L-1) % ranks)`.

use derive_more::{Display, From, Into};

use crate::{error::GameError, permutation::factorial};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    Hearts,
    Spades,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Spades, Suit::Diamonds, Suit::Clubs];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    #[display(fmt = "A")]
    Ace,
    #[display(fmt = "K")]
    King,
    #[display(fmt = "Q")]
    Queen,
    #[display(fmt = "J")]
    Jack,
    #[display(fmt = "10")]
    Ten,
    #[display(fmt = "9")]
    Nine,
    #[display(fmt = "8")]
    Eight,
    #[display(fmt = "7")]
    Seven,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
    ];
}

/// A playing card. Its identity inside a game is its [`Label`], the display text
/// is only for humans.
///
/// ```
/// # use orbitswap::deck::{Card, Rank, Suit};
/// let card = Card::new(Suit::Spades, Rank::Ten);
/// assert_eq!(card.to_string(), "10 of Spades");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display(fmt = "{} of {}", rank, suit)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }
}

/// 1-based label of a card in sorted order, and of a grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label(pub usize);

impl Label {
    /// Label of the zero-based slot `index`.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Label(index + 1)
    }

    /// Zero-based slot of this label.
    #[inline]
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

/// Zero-based `(row, column)` of a position on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    pub row: usize,
    pub col: usize,
}

/// The supported numbers of cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeckSize {
    Four = 4,
    Eight = 8,
    Sixteen = 16,
    ThirtyTwo = 32,
}

impl DeckSize {
    pub const ALL: [DeckSize; 4] = [
        DeckSize::Four,
        DeckSize::Eight,
        DeckSize::Sixteen,
        DeckSize::ThirtyTwo,
    ];

    pub fn cards(self) -> usize {
        self as usize
    }

    pub fn suit_count(self) -> usize {
        match self {
            DeckSize::Four | DeckSize::Eight => 2,
            DeckSize::Sixteen | DeckSize::ThirtyTwo => 4,
        }
    }

    pub fn rank_count(self) -> usize {
        self.cards() / self.suit_count()
    }
}

impl TryFrom<usize> for DeckSize {
    type Error = GameError;

    fn try_from(cards: usize) -> Result<Self, Self::Error> {
        DeckSize::ALL
            .into_iter()
            .find(|size| size.cards() == cards)
            .ok_or(GameError::InvalidDeckSize { cards })
    }
}

/// The card universe of one game: sorted configuration and position layout.
///
/// ```
/// # use orbitswap::deck::{Deck, Label};
/// let deck = Deck::new(8).unwrap();
/// assert_eq!(deck.card(Label(1)).to_string(), "A of Hearts");
/// assert_eq!(deck.card(Label(8)).to_string(), "J of Spades");
/// assert!(Deck::new(6).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    size: DeckSize,
}

impl Deck {
    pub fn new(cards: usize) -> Result<Self, GameError> {
        Ok(Deck::from_size(DeckSize::try_from(cards)?))
    }

    pub fn from_size(size: DeckSize) -> Self {
        Deck { size }
    }

    pub fn size(&self) -> DeckSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size.cards()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// How many boxes a prisoner may open: half the deck.
    pub fn max_steps(&self) -> usize {
        self.len() / 2
    }

    /// Number of distinct shuffles, i.e. the largest valid seed.
    pub fn seed_count(&self) -> u128 {
        factorial(self.len())
    }

    pub fn suits(&self) -> &'static [Suit] {
        &Suit::ALL[..self.size.suit_count()]
    }

    pub fn ranks(&self) -> &'static [Rank] {
        &Rank::ALL[..self.size.rank_count()]
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> {
        (1..=self.len()).map(Label)
    }

    /// Card with sorted-order label `label`.
    ///
    /// # Panics
    ///
    /// Panics if `label` is not in `1..=self.len()`.
    pub fn card(&self, label: Label) -> Card {
        let ranks = self.size.rank_count();
        let i = label.index();
        assert!(i < self.len(), "label {label} outside a deck of {}", self.len());
        Card::new(Suit::ALL[i / ranks], Rank::ALL[i % ranks])
    }

    /// Sorted-order label of `card`, if the card belongs to this deck.
    pub fn label_of(&self, card: Card) -> Option<Label> {
        let suit = self.suits().iter().position(|&s| s == card.suit)?;
        let rank = self.ranks().iter().position(|&r| r == card.rank)?;
        Some(Label::from_index(suit * self.size.rank_count() + rank))
    }

    pub fn coord(&self, label: Label) -> GridCoord {
        let ranks = self.size.rank_count();
        GridCoord {
            row: label.index() / ranks,
            col: label.index() % ranks,
        }
    }

    /// Label to grid coordinate, in label order.
    pub fn layout(&self) -> impl Iterator<Item = (Label, GridCoord)> + '_ {
        self.labels().map(|l| (l, self.coord(l)))
    }

    /// Label to card in canonical order.
    pub fn sorted_configuration(&self) -> impl Iterator<Item = (Label, Card)> + '_ {
        self.labels().map(|l| (l, self.card(l)))
    }
}
