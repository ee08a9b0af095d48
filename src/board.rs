use crate::{
    deck::{Card, Deck, Label},
    error::GameError,
    permutation::{Permutation, PermutationError},
};

/// Which card sits at which grid position.
///
/// Internally a [`Permutation`] from zero-based positions to zero-based card
/// labels, so both "card at position" and "position of card" are O(1). The
/// sorted configuration of the deck is the identity arrangement.
///
/// Boards are values: a swap returns a new board and leaves `self` untouched.
///
/// ```
/// # use orbitswap::{board::BoardState, deck::{Deck, Label}};
/// let deck = Deck::new(4).unwrap();
/// let board = BoardState::shuffle(deck, 2).unwrap();
/// assert_eq!(board.label_at(Label(3)), Label(4));
/// assert_eq!(board.with_swap(Label(3), Label(4)), BoardState::sorted(deck));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    deck: Deck,
    arrangement: Permutation,
}

impl BoardState {
    pub fn sorted(deck: Deck) -> Self {
        BoardState {
            deck,
            arrangement: Permutation::id(deck.len()),
        }
    }

    /// The board obtained from the 1-based `seed`: position `i` receives the card
    /// whose label is entry `i` of the `seed - 1`-th permutation of `1..=N`.
    ///
    /// Fails with [`GameError::SeedOutOfRange`] unless `1 <= seed <= N!`.
    pub fn shuffle(deck: Deck, seed: u128) -> Result<Self, GameError> {
        let max = deck.seed_count();
        if seed == 0 || seed > max {
            return Err(GameError::SeedOutOfRange { seed, max });
        }
        Ok(BoardState {
            deck,
            arrangement: Permutation::nth(deck.len(), seed - 1),
        })
    }

    /// Board from the card labels found at positions `1..=N`, in position order.
    pub fn from_labels(
        deck: Deck,
        labels: impl IntoIterator<Item = Label>,
    ) -> Result<Self, GameError> {
        // Label(0) wraps out of range and is rejected below
        let map: Vec<usize> = labels.into_iter().map(|l| l.0.wrapping_sub(1)).collect();
        if map.len() != deck.len() {
            return Err(PermutationError::NotABijection { len: deck.len() }.into());
        }
        Ok(BoardState {
            deck,
            arrangement: Permutation::try_from_map(map)?,
        })
    }

    pub(crate) fn from_arrangement(deck: Deck, arrangement: Permutation) -> Self {
        debug_assert_eq!(deck.len(), arrangement.len());
        BoardState { deck, arrangement }
    }

    pub fn deck(&self) -> Deck {
        self.deck
    }

    pub fn arrangement(&self) -> &Permutation {
        &self.arrangement
    }

    /// Sorted-order label of the card at `position`.
    #[inline]
    pub fn label_at(&self, position: Label) -> Label {
        Label::from_index(self.arrangement.image(position.index()))
    }

    pub fn card_at(&self, position: Label) -> Card {
        self.deck.card(self.label_at(position))
    }

    /// Position of the card whose sorted-order label is `label`.
    #[inline]
    pub fn position_of_label(&self, label: Label) -> Label {
        Label::from_index(self.arrangement.preimage(label.index()))
    }

    pub fn position_of(&self, card: Card) -> Option<Label> {
        self.deck.label_of(card).map(|l| self.position_of_label(l))
    }

    /// A copy of this board where the cards at `a` and `b` have been exchanged.
    /// `with_swap(p, p)` is an unmodified copy.
    pub fn with_swap(&self, a: Label, b: Label) -> Self {
        BoardState {
            deck: self.deck,
            arrangement: self.arrangement.transposed(a.index(), b.index()),
        }
    }

    /// `(position, card)` pairs in position order.
    pub fn cards(&self) -> impl Iterator<Item = (Label, Card)> + '_ {
        self.deck.labels().map(|p| (p, self.card_at(p)))
    }

    pub fn is_sorted(&self) -> bool {
        self.arrangement.is_identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(board: &BoardState) -> Vec<usize> {
        board.deck().labels().map(|p| board.label_at(p).0).collect()
    }

    #[test]
    fn first_seed_is_sorted() {
        for cards in [4, 8, 16, 32] {
            let deck = Deck::new(cards).unwrap();
            let board = BoardState::shuffle(deck, 1).unwrap();
            assert!(board.is_sorted());
            assert_eq!(board, BoardState::sorted(deck));
        }
    }

    #[test]
    fn documented_seed() {
        let deck = Deck::new(8).unwrap();
        let board = BoardState::shuffle(deck, 152).unwrap();
        assert_eq!(labels(&board), vec![1, 2, 6, 3, 4, 5, 8, 7]);
        assert_eq!(board.card_at(Label(3)).to_string(), "K of Spades");
        assert_eq!(board.position_of_label(Label(6)), Label(3));
    }

    #[test]
    fn last_seed_is_reversed() {
        let deck = Deck::new(8).unwrap();
        let board = BoardState::shuffle(deck, 40320).unwrap();
        assert_eq!(labels(&board), vec![8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn seed_bounds() {
        let deck = Deck::new(8).unwrap();
        for seed in [0, 40321] {
            let err = BoardState::shuffle(deck, seed).unwrap_err();
            assert_eq!(err, GameError::SeedOutOfRange { seed, max: 40320 });
            assert!(err.is_invalid_argument());
        }
        let deck = Deck::new(32).unwrap();
        assert!(BoardState::shuffle(deck, deck.seed_count()).is_ok());
        assert!(BoardState::shuffle(deck, deck.seed_count() + 1).is_err());
    }

    #[test]
    fn swap_is_a_copy() {
        let deck = Deck::new(8).unwrap();
        let board = BoardState::shuffle(deck, 152).unwrap();
        let swapped = board.with_swap(Label(1), Label(8));
        assert_eq!(labels(&swapped), vec![7, 2, 6, 3, 4, 5, 8, 1]);
        assert_eq!(labels(&board), vec![1, 2, 6, 3, 4, 5, 8, 7]);
        assert_eq!(swapped.position_of_label(Label(1)), Label(8));
        assert_eq!(board.with_swap(Label(5), Label(5)), board);
    }

    #[test]
    fn position_of_card() {
        let deck = Deck::new(4).unwrap();
        let board = BoardState::shuffle(deck, 24).unwrap();
        for (position, card) in board.cards() {
            assert_eq!(board.position_of(card), Some(position));
        }
    }

    #[test]
    fn from_labels_validates() {
        let deck = Deck::new(4).unwrap();
        let board = BoardState::from_labels(deck, [2, 1, 3, 4].map(Label)).unwrap();
        assert_eq!(board, BoardState::shuffle(deck, 7).unwrap());
        assert!(BoardState::from_labels(deck, [2, 2, 3, 4].map(Label)).is_err());
        assert!(BoardState::from_labels(deck, [1, 2, 3].map(Label)).is_err());
    }
}
