//! Request and response types for the input boundary.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::rules::{CandidateMove, DrawOutcome, Hint, MoveOutcome, UndoOutcome};
use crate::zones::PileId;

/// Move `card` (and everything above it, for a tableau run) from one
/// pile to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub card: CardId,
    pub from: PileId,
    pub to: PileId,
}

impl MoveRequest {
    #[must_use]
    pub fn new(card: CardId, from: PileId, to: PileId) -> Self {
        Self { card, from, to }
    }
}

/// Anything the presentation layer can ask of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    Move(MoveRequest),
    Draw,
    Undo,
    NewGame,
    /// Re-deal the current game's opening layout.
    Restart,
    Hint,
    /// Turn up a face-down tableau top.
    Flip(PileId),
    AutoComplete,
    TogglePause,
}

/// A committed move and the cards it uncovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    /// Tableau cards turned face up after the move.
    pub flipped: Vec<(PileId, CardId)>,
}

/// Successful reply to a `Request`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Moved(MoveReport),
    Drew(DrawOutcome),
    Undone(UndoOutcome),
    /// A new or restarted deal.
    Dealt,
    Hint(Option<Hint>),
    Flipped { pile: PileId, card: CardId },
    AutoCompleted { moves: Vec<CandidateMove>, completed: bool },
    Paused(bool),
}

impl Response {
    /// Piles whose contents the request changed, for partial redraws.
    ///
    /// A deal changes every pile; hints and pauses change none.
    #[must_use]
    pub fn changed_piles(&self) -> Vec<PileId> {
        let mut piles: Vec<PileId> = match self {
            Response::Moved(report) => {
                let mut piles = vec![report.outcome.from, report.outcome.to];
                piles.extend(report.flipped.iter().map(|(pile, _)| *pile));
                piles
            }
            Response::Drew(_) => vec![PileId::Stock, PileId::Waste],
            Response::Undone(outcome) => outcome.changed.clone(),
            Response::Dealt => crate::zones::Board::pile_ids().collect(),
            Response::Flipped { pile, .. } => vec![*pile],
            Response::AutoCompleted { moves, .. } => {
                moves.iter().flat_map(|m| [m.from, m.to]).collect()
            }
            Response::Hint(_) | Response::Paused(_) => Vec::new(),
        };
        let mut seen = Vec::with_capacity(piles.len());
        piles.retain(|pile| {
            if seen.contains(pile) {
                false
            } else {
                seen.push(*pile);
                true
            }
        });
        piles
    }
}
