//! Core engine types: RNG, settings, move records, state, statistics,
//! errors.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;
pub mod stats;

pub use action::{HistoryEntry, MoveRecord};
pub use config::{DrawCount, Settings, DEFAULT_MAX_HISTORY};
pub use error::{DrawError, EngineError, MoveRejection, SnapshotError, UndoError};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
pub use stats::Statistics;
