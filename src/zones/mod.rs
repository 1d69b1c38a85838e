//! Piles and the board.
//!
//! ## Key Types
//!
//! - `PileId`: Stock, Waste, Foundation(0..4), Tableau(0..7)
//! - `Pile`: ordered cards plus per-kind acceptance rules
//! - `Board`: the thirteen piles of one game, with conservation checks

pub mod board;
pub mod pile;

pub use board::{Board, FOUNDATION_COUNT, TABLEAU_COUNT};
pub use pile::{Pile, PileId};
