//! # Orbits
//!
//! An orbit is a cycle of the arrangement seen from the cards: starting from a
//! card, look at the box at its sorted position, take the card found there, and
//! repeat until the starting card shows up again. The orbits of a board partition
//! its cards.
//!
//! Swapping two cards at cyclic distance `d` inside one orbit of length `L` splits
//! it into two orbits of lengths `d` and `L - d`. [`swaps_for_orbit`] uses this to
//! list every swap that leaves both halves within a bound.

use ahash::AHashSet;
use itertools::Itertools;
use log::debug;

use crate::{
    board::BoardState,
    deck::{Card, Deck, Label},
    error::GameError,
    permutation::{Permutation, PermutationError},
    swap::Swap,
};

/// One cycle of a board, in walk order.
///
/// `cards()[k]` sits at `positions()[k]`, and `positions()[k + 1]` is the sorted
/// position of `cards()[k]` (cyclically). The card the walk started from comes
/// last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orbit {
    deck: Deck,
    cards: Vec<Label>,
    positions: Vec<Label>,
}

impl Orbit {
    /// Walks the orbit of the card with sorted-order label `start`.
    pub fn trace(board: &BoardState, start: Label) -> Self {
        let mut cards = Vec::new();
        let mut positions = Vec::new();
        let mut position = start;
        loop {
            let card = board.label_at(position);
            cards.push(card);
            positions.push(position);
            if card == start {
                break;
            }
            position = card;
        }
        Orbit {
            deck: board.deck(),
            cards,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sorted-order labels of the cards, in walk order.
    pub fn card_labels(&self) -> &[Label] {
        &self.cards
    }

    /// Positions of the cards, in walk order.
    pub fn positions(&self) -> &[Label] {
        &self.positions
    }

    pub fn card(&self, k: usize) -> Card {
        self.deck.card(self.cards[k])
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + Clone + '_ {
        self.cards.iter().map(|&l| self.deck.card(l))
    }

    pub fn contains(&self, card: Card) -> bool {
        self.deck
            .label_of(card)
            .is_some_and(|l| self.cards.contains(&l))
    }
}

/// Splits `board` into its orbits.
///
/// Cards are visited in sorted order and each card not yet seen starts a new
/// orbit, so the orbits come out ordered by their smallest label.
///
/// ```
/// # use orbitswap::{board::BoardState, deck::Deck, orbit::decompose};
/// let deck = Deck::new(8).unwrap();
/// let orbits = decompose(&BoardState::shuffle(deck, 152).unwrap());
/// let lengths: Vec<_> = orbits.iter().map(|o| o.len()).collect();
/// assert_eq!(lengths, vec![1, 1, 4, 2]);
/// ```
pub fn decompose(board: &BoardState) -> Vec<Orbit> {
    let deck = board.deck();
    let orbits: Vec<Orbit> = board
        .arrangement()
        .find_cycles()
        .into_iter()
        .map(|cycle| {
            // the cycle starts at the smallest position, the walk at the card found there
            let positions: Vec<Label> = cycle.iter().copied().map(Label::from_index).collect();
            let mut cards = positions.clone();
            cards.rotate_left(1);
            Orbit {
                deck,
                cards,
                positions,
            }
        })
        .collect();
    debug!(
        "Orbit lengths: {:?}",
        orbits.iter().map(Orbit::len).collect_vec()
    );
    orbits
}

/// Rebuilds the board whose orbits are `orbits`.
pub fn reassemble(deck: Deck, orbits: &[Orbit]) -> Result<BoardState, GameError> {
    let cycles = orbits
        .iter()
        .map(|o| o.card_labels().iter().map(|l| l.index()).collect_vec())
        .collect_vec();
    let arrangement = Permutation::from_disjoint_cycles(&cycles)?;
    let covered: usize = orbits.iter().map(Orbit::len).sum();
    if covered != deck.len() || arrangement.len() != deck.len() {
        return Err(PermutationError::NotABijection { len: deck.len() }.into());
    }
    Ok(BoardState::from_arrangement(deck, arrangement))
}

/// Swaps that keep every orbit coming out of `orbit` within `max_length` cards.
///
/// - A fixed point only admits [`Swap::NoSwap`].
/// - An orbit already within the bound admits `NoSwap` and any swap of two of its
///   cards. Such swaps are not checked against the other orbits of the board.
/// - A longer orbit must be split: the swaps returned are exactly those between
///   cards at cyclic distance `d` with `len - max_length <= d <= max_length`,
///   each unordered pair once.
///
/// Fails with [`GameError::OrbitTooLong`] if the orbit has more than
/// `2 * max_length` cards, since no single swap can split it enough.
pub fn swaps_for_orbit(orbit: &Orbit, max_length: usize) -> Result<Vec<Swap>, GameError> {
    let len = orbit.len();
    if len > 2 * max_length {
        return Err(GameError::OrbitTooLong {
            length: len,
            max_length,
        });
    }
    if len == 1 {
        return Ok(vec![Swap::NoSwap]);
    }
    if len <= max_length {
        return Ok(std::iter::once(Swap::NoSwap)
            .chain(
                orbit
                    .cards()
                    .tuple_combinations()
                    .map(|(a, b)| Swap::Exchange(a, b)),
            )
            .collect());
    }

    let mut seen = AHashSet::new();
    let mut swaps = Vec::new();
    for idx1 in 0..len {
        for distance in (len - max_length)..=max_length {
            let idx2 = (idx1 + distance) % len;
            if seen.insert((idx1.min(idx2), idx1.max(idx2))) {
                swaps.push(Swap::Exchange(orbit.card(idx1), orbit.card(idx2)));
            }
        }
    }
    Ok(swaps)
}
