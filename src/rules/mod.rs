//! Klondike rules.
//!
//! - `validator`: pure legality checks with typed rejections
//! - `executor`: the only code that mutates a `Board`
//! - `detection`: win, blocked, pending flips, analysis
//! - `hint`: legal-move enumeration and the hint heuristic
//! - `score`: the score formula
//!
//! Everything here is a free function over `&GameState` / `&Board` (or
//! their `&mut` forms in the executor). The session in
//! `games::klondike` decides when to call what.

pub mod detection;
pub mod executor;
pub mod hint;
pub mod score;
pub mod validator;

pub use detection::{analyze, find_auto_completable, find_cards_to_flip, is_blocked, is_complete, Analysis};
pub use executor::{
    draw_from_stock, execute_auto_complete, execute_multi_move, execute_single_move, flip_card,
    flip_exposed_cards, recycle_waste_to_stock, undo, DrawOutcome, MoveOutcome, UndoOutcome,
};
pub use hint::{CandidateMove, Hint, HintAdvisor};
pub use score::ScoreCalculator;
pub use validator::{validate_move, validate_multi_move, validate_placement};
