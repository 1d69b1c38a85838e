//! # klondike-engine
//!
//! A rule engine for single-player Klondike Solitaire.
//!
//! ## Design Principles
//!
//! 1. **Rejections Are Values**: Illegal moves, empty draws and refused
//!    undos come back as typed errors with stable tags. Nothing panics on
//!    user input.
//!
//! 2. **One Mutation Path**: Only `rules::executor` changes piles. Every
//!    committed change appends an invertible `MoveRecord`, which is what
//!    makes undo exact.
//!
//! 3. **Deterministic**: Shuffles come from a seeded ChaCha8 stream whose
//!    position is saved with the game, so a seed always deals the same
//!    layout and a resumed game keeps dealing the same sequence.
//!
//! ## Architecture
//!
//! - **Conservation**: The 52 cards are always spread over the 13 piles
//!   with no duplicates. The executor asserts the card count in debug
//!   builds and snapshots are checked on load.
//!
//! - **Persistent Data Structures**: The move history is an `im::Vector`,
//!   so the state snapshots handed to observers and the persistence layer
//!   clone cheaply.
//!
//! - **Logging**: `tracing` events at `debug` for moves, `info` for game
//!   lifecycle and `warn` for discarded saves. The crate never installs a
//!   subscriber.
//!
//! ## Modules
//!
//! - `core`: RNG, settings, move records, game state, statistics, errors
//! - `cards`: Suits, ranks, cards and the deck
//! - `zones`: Piles and the board
//! - `rules`: Validation, execution, detection, hints and scoring
//! - `games`: The `KlondikeGame` session and its request contract
//! - `persist`: Snapshots and the storage port

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod games;
pub mod persist;

// Re-export commonly used types
pub use crate::core::{
    GameRng, GameRngState,
    DrawCount, Settings,
    HistoryEntry, MoveRecord,
    GameState, Statistics,
    DrawError, EngineError, MoveRejection, SnapshotError, UndoError,
};

pub use crate::cards::{Card, CardId, Color, Deck, Rank, Suit, DECK_SIZE};

pub use crate::zones::{Board, Pile, PileId};

pub use crate::rules::{Analysis, CandidateMove, DrawOutcome, Hint, HintAdvisor, MoveOutcome, ScoreCalculator, UndoOutcome};

pub use crate::games::klondike::{
    KlondikeGame, KlondikeGameBuilder,
    MoveReport, MoveRequest, Request, Response,
    StateChanged, StateObserver,
};

pub use crate::persist::{GameSnapshot, MemoryStore, PersistencePort};
