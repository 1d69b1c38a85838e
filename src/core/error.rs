//! Typed outcomes for rejected operations.
//!
//! Illegal moves and empty draws are ordinary user feedback, not defects,
//! so they are returned as values. Each rejection carries a stable tag
//! that a presentation layer can map to a message.

use std::fmt;

/// Why a move request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// Game not started, paused, or already completed.
    GameNotPlaying,
    /// The moved card (or the destination's top card) is face-down.
    CardFaceDown,
    /// Rank does not continue the destination (includes non-Ace on an
    /// empty foundation and non-King on an empty tableau).
    WrongDestinationRank,
    /// Tableau placement without alternating color.
    WrongDestinationColor,
    /// Foundation placement of a different suit.
    WrongDestinationSuit,
    /// The cards are not the validated run at the top of the source.
    NotSequential,
    /// Waste or stock as destination, or source equals destination.
    InvalidDestination,
    /// Multi-card move from a pile other than a tableau.
    InvalidSource,
    /// The card is not in the source pile, or not on top for a single move.
    CardNotAvailable,
}

impl MoveRejection {
    /// Stable kebab-case reason tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            MoveRejection::GameNotPlaying => "game-not-playing",
            MoveRejection::CardFaceDown => "card-face-down",
            MoveRejection::WrongDestinationRank => "wrong-destination-rank",
            MoveRejection::WrongDestinationColor => "wrong-destination-color",
            MoveRejection::WrongDestinationSuit => "wrong-destination-suit",
            MoveRejection::NotSequential => "not-sequential",
            MoveRejection::InvalidDestination => "invalid-destination",
            MoveRejection::InvalidSource => "invalid-source",
            MoveRejection::CardNotAvailable => "card-not-available",
        }
    }
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move: {}", self.tag())
    }
}

impl std::error::Error for MoveRejection {}

/// Why a draw from the stock did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawError {
    GameNotPlaying,
    /// Stock and waste are both empty.
    NoCardsLeft,
    /// Recycle asked for while the stock still holds cards.
    StockNotEmpty,
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::GameNotPlaying => write!(f, "cannot draw: game is not in play"),
            DrawError::NoCardsLeft => write!(f, "no cards left in stock or waste"),
            DrawError::StockNotEmpty => write!(f, "cannot recycle: stock is not empty"),
        }
    }
}

impl std::error::Error for DrawError {}

/// Why an undo request did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UndoError {
    GameNotPlaying,
    /// Undo is switched off in settings.
    Disabled,
    NothingToUndo,
    /// The latest record does not match the piles; nothing was changed.
    HistoryMismatch,
}

impl fmt::Display for UndoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoError::GameNotPlaying => write!(f, "cannot undo: game is not in play"),
            UndoError::Disabled => write!(f, "undo is disabled"),
            UndoError::NothingToUndo => write!(f, "nothing to undo"),
            UndoError::HistoryMismatch => write!(f, "move history does not match the board"),
        }
    }
}

impl std::error::Error for UndoError {}

/// Why a persisted snapshot could not be used.
///
/// Callers treat every variant as "no saved game".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    /// Not valid JSON, or missing/ill-typed fields.
    Malformed(String),
    /// Older than the retention window.
    Expired { age_secs: u64 },
    /// Decoded but violates a board invariant.
    Inconsistent(String),
    /// Game was never started or already completed.
    Finished,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Malformed(msg) => write!(f, "malformed snapshot: {}", msg),
            SnapshotError::Expired { age_secs } => {
                write!(f, "snapshot expired ({}s old)", age_secs)
            }
            SnapshotError::Inconsistent(msg) => write!(f, "inconsistent snapshot: {}", msg),
            SnapshotError::Finished => write!(f, "snapshot holds no game in progress"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Any rejection the request dispatcher can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineError {
    Move(MoveRejection),
    Draw(DrawError),
    Undo(UndoError),
    /// Hints are switched off or the game is not in play.
    HintUnavailable,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Move(e) => e.fmt(f),
            EngineError::Draw(e) => e.fmt(f),
            EngineError::Undo(e) => e.fmt(f),
            EngineError::HintUnavailable => write!(f, "hints are unavailable"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Move(e) => Some(e),
            EngineError::Draw(e) => Some(e),
            EngineError::Undo(e) => Some(e),
            EngineError::HintUnavailable => None,
        }
    }
}

impl From<MoveRejection> for EngineError {
    fn from(e: MoveRejection) -> Self {
        EngineError::Move(e)
    }
}

impl From<DrawError> for EngineError {
    fn from(e: DrawError) -> Self {
        EngineError::Draw(e)
    }
}

impl From<UndoError> for EngineError {
    fn from(e: UndoError) -> Self {
        EngineError::Undo(e)
    }
}
