//! Piles and their acceptance rules.
//!
//! All thirteen piles share one shape: an id tag and an ordered card list
//! (index 0 = bottom, last = top). Behavior differs only in which cards a
//! pile accepts, dispatched on the `PileId` tag:
//!
//! | Kind       | Empty accepts | Non-empty accepts                          |
//! |------------|---------------|--------------------------------------------|
//! | Foundation | Ace           | same suit, rank + 1                        |
//! | Tableau    | King          | face-up top, opposite color, rank - 1      |
//! | Waste      | nothing       | nothing (filled only by draws)             |
//! | Stock      | nothing       | nothing (filled only by recycling)         |

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Rank};
use crate::core::error::MoveRejection;

/// Pile identifier: kind plus index for foundations (0..4) and
/// tableaus (0..7).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileId {
    Stock,
    Waste,
    Foundation(u8),
    Tableau(u8),
}

impl PileId {
    #[must_use]
    pub const fn is_foundation(self) -> bool {
        matches!(self, PileId::Foundation(_))
    }

    #[must_use]
    pub const fn is_tableau(self) -> bool {
        matches!(self, PileId::Tableau(_))
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileId::Stock => write!(f, "stock"),
            PileId::Waste => write!(f, "waste"),
            PileId::Foundation(i) => write!(f, "foundation {}", i),
            PileId::Tableau(i) => write!(f, "tableau {}", i),
        }
    }
}

/// An ordered pile of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    id: PileId,
    cards: Vec<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(id: PileId) -> Self {
        Self {
            id,
            cards: Vec::new(),
        }
    }

    /// Create a pile holding `cards` (bottom to top).
    #[must_use]
    pub fn with_cards(id: PileId, cards: Vec<Card>) -> Self {
        Self { id, cards }
    }

    #[must_use]
    pub fn id(&self) -> PileId {
        self.id
    }

    /// Cards bottom to top.
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

    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn top_card_mut(&mut self) -> Option<&mut Card> {
        self.cards.last_mut()
    }

    /// Index of the card with this identity, if present.
    #[must_use]
    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    /// Append a card on top. No rule check: callers validate first.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Append cards on top, keeping their order.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove and return everything from `index` to the top.
    ///
    /// Returns an empty vec if `index` is past the top.
    pub fn split_off(&mut self, index: usize) -> Vec<Card> {
        if index >= self.cards.len() {
            return Vec::new();
        }
        self.cards.split_off(index)
    }

    /// Remove and return every card, bottom to top.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Check whether `card` may be placed on this pile.
    ///
    /// Only destination rules are checked here; the moved card's own
    /// orientation is the validator's concern.
    pub fn check_accept(&self, card: &Card) -> Result<(), MoveRejection> {
        match self.id {
            PileId::Foundation(_) => foundation_accepts(self.top_card(), card),
            PileId::Tableau(_) => tableau_accepts(self.top_card(), card),
            PileId::Waste | PileId::Stock => Err(MoveRejection::InvalidDestination),
        }
    }

    #[must_use]
    pub fn can_accept(&self, card: &Card) -> bool {
        self.check_accept(card).is_ok()
    }

    /// The validated run starting at `start`: the longest prefix of
    /// `cards[start..]` whose cards are all face-up and each stacks on the
    /// one below it.
    ///
    /// Empty for non-tableau piles, out-of-range `start`, or a face-down
    /// card at `start`.
    #[must_use]
    pub fn valid_sequence(&self, start: usize) -> &[Card] {
        if !self.id.is_tableau() || start >= self.cards.len() || !self.cards[start].is_face_up() {
            return &[];
        }

        let mut end = start + 1;
        while end < self.cards.len() {
            let below = &self.cards[end - 1];
            let card = &self.cards[end];
            if !card.is_face_up() || !card.stacks_on(below) {
                break;
            }
            end += 1;
        }
        &self.cards[start..end]
    }

    /// Start index of the movable run at the top of a tableau: the lowest
    /// index whose valid sequence reaches the top. `None` if the pile is
    /// empty, not a tableau, or its top card is face-down.
    #[must_use]
    pub fn movable_run_start(&self) -> Option<usize> {
        let top = self.cards.len().checked_sub(1)?;
        if !self.id.is_tableau() || !self.cards[top].is_face_up() {
            return None;
        }
        let mut start = top;
        while start > 0 {
            let below = &self.cards[start - 1];
            if !below.is_face_up() || !self.cards[start].stacks_on(below) {
                break;
            }
            start -= 1;
        }
        Some(start)
    }
}

fn foundation_accepts(top: Option<&Card>, card: &Card) -> Result<(), MoveRejection> {
    match top {
        None if card.rank() == Rank::ACE => Ok(()),
        None => Err(MoveRejection::WrongDestinationRank),
        Some(top) if top.suit() != card.suit() => Err(MoveRejection::WrongDestinationSuit),
        Some(top) if !card.rank().is_one_above(top.rank()) => {
            Err(MoveRejection::WrongDestinationRank)
        }
        Some(_) => Ok(()),
    }
}

fn tableau_accepts(top: Option<&Card>, card: &Card) -> Result<(), MoveRejection> {
    match top {
        None if card.rank() == Rank::KING => Ok(()),
        None => Err(MoveRejection::WrongDestinationRank),
        Some(top) if !top.is_face_up() => Err(MoveRejection::CardFaceDown),
        Some(top) if top.color() == card.color() => Err(MoveRejection::WrongDestinationColor),
        Some(top) if !top.rank().is_one_above(card.rank()) => {
            Err(MoveRejection::WrongDestinationRank)
        }
        Some(_) => Ok(()),
    }
}
