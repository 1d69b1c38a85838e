//! Card identity and orientation.
//!
//! A `Card` couples an immutable identity (`Suit` + `Rank`) with a mutable
//! face-up flag. Exactly one card exists per `(suit, rank)` pair in a game,
//! so `CardId` is enough to name a card across piles and history.
//!
//! ## Usage
//!
//! ```
//! use klondike_engine::cards::{Card, Color, Rank, Suit};
//!
//! let mut card = Card::new(Suit::Hearts, Rank::ACE);
//! assert!(!card.is_face_up());
//! assert_eq!(card.color(), Color::Red);
//!
//! card.turn_face_up();
//! assert!(card.is_face_up());
//! assert_eq!(card.id().to_string(), "A♥");
//! ```

use serde::{Deserialize, Serialize};

/// The four French suits, in canonical deck order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Derived color: hearts and diamonds are red, clubs and spades black.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    /// Suit symbol for display.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Card color, derived from the suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card rank, 1 (Ace) through 13 (King).
///
/// Construction is checked, and deserialization goes through the same check
/// so a corrupt snapshot cannot smuggle in a rank of 0 or 14.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const TWO: Rank = Rank(2);
    pub const KING: Rank = Rank(13);

    /// Create a rank, returning `None` outside `1..=13`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 13 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the numeric value (A=1 .. K=13).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// All thirteen ranks, ascending.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }

    /// True if `self` is exactly one above `other`.
    #[must_use]
    pub const fn is_one_above(self, other: Rank) -> bool {
        self.0 == other.0 + 1
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or_else(|| format!("rank out of range: {}", value))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            n => write!(f, "{}", n),
        }
    }
}

/// Identity of a card: the `(suit, rank)` pair.
///
/// Used in move requests and history records, where orientation is
/// irrelevant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    pub suit: Suit,
    pub rank: Rank,
}

impl CardId {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.symbol())
    }
}

/// A physical card: fixed identity plus face-up flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    /// Create a face-up card.
    #[must_use]
    pub const fn face_up(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: true,
        }
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        CardId::new(self.suit, self.rank)
    }

    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn turn_face_up(&mut self) {
        self.face_up = true;
    }

    pub fn turn_face_down(&mut self) {
        self.face_up = false;
    }

    /// Set orientation explicitly.
    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    /// True if `self` can sit directly on `below` in a tableau run:
    /// opposite color, exactly one rank lower.
    #[must_use]
    pub fn stacks_on(&self, below: &Card) -> bool {
        self.color() != below.color() && below.rank.is_one_above(self.rank)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.face_up {
            write!(f, "{}", self.id())
        } else {
            write!(f, "[{}]", self.id())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(v: u8) -> Rank {
        Rank::new(v).unwrap()
    }

    #[test]
    fn test_rank_bounds() {
        assert!(Rank::new(0).is_none());
        assert!(Rank::new(14).is_none());
        assert_eq!(Rank::new(1), Some(Rank::ACE));
        assert_eq!(Rank::new(13), Some(Rank::KING));
        assert_eq!(Rank::all().count(), 13);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
    }

    #[test]
    fn test_stacks_on() {
        let seven_hearts = Card::face_up(Suit::Hearts, rank(7));
        let six_spades = Card::face_up(Suit::Spades, rank(6));
        let six_diamonds = Card::face_up(Suit::Diamonds, rank(6));
        let five_clubs = Card::face_up(Suit::Clubs, rank(5));

        assert!(six_spades.stacks_on(&seven_hearts));
        assert!(!six_diamonds.stacks_on(&seven_hearts)); // same color
        assert!(!five_clubs.stacks_on(&seven_hearts)); // rank gap
    }

    #[test]
    fn test_orientation_changes_keep_identity() {
        let mut card = Card::new(Suit::Clubs, Rank::KING);
        let id = card.id();

        card.turn_face_up();
        assert!(card.is_face_up());
        card.turn_face_down();
        assert!(!card.is_face_up());

        assert_eq!(card.id(), id);
    }

    #[test]
    fn test_display() {
        assert_eq!(CardId::new(Suit::Spades, rank(10)).to_string(), "10♠");
        assert_eq!(Card::new(Suit::Diamonds, rank(12)).to_string(), "[Q♦]");
        assert_eq!(Card::face_up(Suit::Diamonds, rank(12)).to_string(), "Q♦");
    }

    #[test]
    fn test_rank_rejects_out_of_range_on_deserialize() {
        let bad: Result<Card, _> =
            serde_json::from_str(r#"{"suit":"hearts","rank":14,"face_up":true}"#);
        assert!(bad.is_err());

        let good: Card =
            serde_json::from_str(r#"{"suit":"hearts","rank":1,"face_up":true}"#).unwrap();
        assert_eq!(good.id(), CardId::new(Suit::Hearts, Rank::ACE));
    }
}
