//! The 52-card deck: generation, shuffling and the Klondike deal.

use tracing::debug;

use super::card::{Card, Rank, Suit};
use crate::core::rng::GameRng;
use crate::zones::{Board, TABLEAU_COUNT};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered deck of cards. The top of the deck is the end of the vec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Generate the 52 canonical cards face-down, ordered suit by suit
    /// (hearts, diamonds, clubs, spades), Ace to King within each suit.
    #[must_use]
    pub fn generate() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::all().map(move |rank| Card::new(suit, rank)))
            .collect();
        Self { cards }
    }

    /// Build a deck from an explicit card order (bottom to top).
    ///
    /// Used for reproducible deals in tests and replays.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Unbiased Fisher–Yates shuffle.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range_usize(0..i + 1);
            self.cards.swap(i, j);
        }
    }

    /// Cards in order, bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal the Klondike layout.
    ///
    /// Cards come off the top of the deck. Column `i` receives `i + 1`
    /// cards with only its last card face up; everything left goes
    /// face-down to the stock. Waste and foundations start empty.
    #[must_use]
    pub fn deal_klondike(mut self) -> Board {
        let mut board = Board::new();

        for column in 0..TABLEAU_COUNT {
            for row in 0..=column {
                if let Some(mut card) = self.cards.pop() {
                    card.set_face_up(row == column);
                    board.tableau_mut(column).push(card);
                }
            }
        }

        while let Some(mut card) = self.cards.pop() {
            card.turn_face_down();
            board.stock_mut().push(card);
        }

        debug!(
            tableau = ?board.tableaus().iter().map(|p| p.len()).collect::<Vec<_>>(),
            stock = board.stock().len(),
            "dealt klondike layout"
        );

        board
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_generate_canonical_order() {
        let deck = Deck::generate();

        assert_eq!(deck.len(), DECK_SIZE);
        assert!(deck.cards().iter().all(|c| !c.is_face_up()));

        assert_eq!(deck.cards()[0].id(), CardId::new(Suit::Hearts, Rank::ACE));
        assert_eq!(deck.cards()[12].id(), CardId::new(Suit::Hearts, Rank::KING));
        assert_eq!(deck.cards()[13].id(), CardId::new(Suit::Diamonds, Rank::ACE));
        assert_eq!(deck.cards()[51].id(), CardId::new(Suit::Spades, Rank::KING));
    }

    #[test]
    fn test_generate_unique() {
        let deck = Deck::generate();
        let ids: FxHashSet<CardId> = deck.cards().iter().map(Card::id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut deck = Deck::generate();
        let mut rng = GameRng::new(7);
        deck.shuffle(&mut rng);

        assert_ne!(deck, Deck::generate());

        let mut ids: Vec<CardId> = deck.cards().iter().map(Card::id).collect();
        ids.sort();
        let mut canonical: Vec<CardId> = Deck::generate().cards().iter().map(Card::id).collect();
        canonical.sort();
        assert_eq!(ids, canonical);
    }

    #[test]
    fn test_shuffle_deterministic_for_seed() {
        let mut a = Deck::generate();
        let mut b = Deck::generate();
        a.shuffle(&mut GameRng::new(99));
        b.shuffle(&mut GameRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_layout() {
        let mut deck = Deck::generate();
        deck.shuffle(&mut GameRng::new(42));
        let board = deck.deal_klondike();

        let sizes: Vec<usize> = board.tableaus().iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(board.stock().len(), 24);
        assert!(board.waste().is_empty());
        assert!(board.foundations().iter().all(|p| p.is_empty()));

        let face_up: usize = board
            .all_piles()
            .flat_map(|p| p.cards())
            .filter(|c| c.is_face_up())
            .count();
        assert_eq!(face_up, 7);

        for pile in board.tableaus() {
            assert!(pile.top_card().unwrap().is_face_up());
        }
        assert!(board.check_conservation().is_ok());
    }

    #[test]
    fn test_deal_takes_from_top() {
        // Unshuffled: the last card (K♠) is dealt first onto column 0.
        let board = Deck::generate().deal_klondike();
        assert_eq!(
            board.tableau(0).top_card().unwrap().id(),
            CardId::new(Suit::Spades, Rank::KING)
        );
    }
}
