//! Saved-game snapshots.
//!
//! A snapshot is plain data: the game state, every pile's cards and the
//! RNG position, plus the time it was taken. The wire form is JSON.
//!
//! A decoded snapshot is usable only if it is at most 24 hours old, holds
//! a started, uncompleted game, and its piles pass the conservation check.

use serde::{Deserialize, Serialize};

use crate::core::error::SnapshotError;
use crate::core::rng::GameRngState;
use crate::core::state::GameState;
use crate::zones::Board;

/// Retention window for saved games.
pub const SNAPSHOT_MAX_AGE_SECS: u64 = 24 * 60 * 60;

/// A saved game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Unix seconds at save time.
    pub saved_at: u64,
    pub state: GameState,
    pub board: Board,
    /// RNG position for the next deal.
    pub rng: GameRngState,
    /// RNG position that produced this game's deal, for restarts.
    #[serde(default)]
    pub deal: Option<GameRngState>,
}

impl GameSnapshot {
    /// Serialize to JSON.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    /// Parse and validate a snapshot as of `now` (unix seconds).
    pub fn decode(json: &str, now: u64) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        snapshot.validate(now)?;
        Ok(snapshot)
    }

    /// Seconds since the snapshot was taken. A timestamp from the future
    /// counts as zero.
    #[must_use]
    pub fn age_secs(&self, now: u64) -> u64 {
        now.saturating_sub(self.saved_at)
    }

    pub fn validate(&self, now: u64) -> Result<(), SnapshotError> {
        let age_secs = self.age_secs(now);
        if age_secs > SNAPSHOT_MAX_AGE_SECS {
            return Err(SnapshotError::Expired { age_secs });
        }
        if !self.state.started || self.state.completed {
            return Err(SnapshotError::Finished);
        }
        self.board
            .check_conservation()
            .map_err(SnapshotError::Inconsistent)?;

        let on_foundations = self.board.foundation_total();
        if on_foundations != self.state.foundation_card_count as usize {
            return Err(SnapshotError::Inconsistent(format!(
                "state counts {} foundation cards, piles hold {}",
                self.state.foundation_card_count, on_foundations
            )));
        }
        for pile in self.board.foundations() {
            let Some(base) = pile.cards().first() else {
                continue;
            };
            let ordered = pile.cards().iter().enumerate().all(|(i, card)| {
                card.is_face_up()
                    && card.suit() == base.suit()
                    && usize::from(card.rank().value()) == i + 1
            });
            if !ordered {
                return Err(SnapshotError::Inconsistent(format!("{} is out of order", pile.id())));
            }
        }
        Ok(())
    }
}
