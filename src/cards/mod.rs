//! Cards and the deck.
//!
//! ## Key Types
//!
//! - `Suit`, `Color`, `Rank`: card identity components
//! - `CardId`: `(suit, rank)` identity, unique per game
//! - `Card`: identity plus face-up orientation
//! - `Deck`: generation, Fisher–Yates shuffle, Klondike deal

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Color, Rank, Suit};
pub use deck::{Deck, DECK_SIZE};
