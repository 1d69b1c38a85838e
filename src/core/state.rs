//! Game state: lifecycle flags, score bookkeeping and move history.
//!
//! ## Lifecycle
//!
//! `new` → `start` → (moves, `toggle_pause`, `tick`) → `complete`.
//! `reset` returns to the unstarted state and keeps the settings.
//!
//! The state never touches piles. The rule executor updates it after each
//! committed mutation via `record`, `add_to_foundation` and
//! `remove_from_foundation`.
//!
//! The history is an `im::Vector`, so cloning a state for an observer or a
//! snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::action::{HistoryEntry, MoveRecord};
use super::config::Settings;
use crate::cards::DECK_SIZE;
use crate::rules::score::ScoreCalculator;

/// Per-game bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub started: bool,
    pub completed: bool,
    pub paused: bool,

    pub score: u32,

    /// User-initiated mutating operations (flips excluded).
    pub move_count: u32,

    /// Cards currently on the foundations.
    pub foundation_card_count: u32,

    /// Seconds accrued while playing.
    pub elapsed_secs: u64,

    /// Bounded log of committed records, oldest first.
    pub history: Vector<HistoryEntry>,

    #[serde(default)]
    pub settings: Settings,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl GameState {
    /// Create an unstarted state.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            started: false,
            completed: false,
            paused: false,
            score: 0,
            move_count: 0,
            foundation_card_count: 0,
            elapsed_secs: 0,
            history: Vector::new(),
            settings,
        }
    }

    /// Return to the unstarted state, keeping settings.
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
    }

    /// Begin play. No-op if already started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.elapsed_secs = 0;
        self.update_score();
        info!("game started");
    }

    /// Mark the game completed and compute the final score.
    pub fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.paused = false;
        self.update_score();
        info!(
            score = self.score,
            elapsed_secs = self.elapsed_secs,
            moves = self.move_count,
            "game completed"
        );
    }

    /// Flip the pause flag. Ignored unless started and not completed.
    ///
    /// Returns the resulting pause flag.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.completed {
            return self.paused;
        }
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        self.paused
    }

    /// Accrue elapsed time. Only counts while playing.
    pub fn tick(&mut self, secs: u64) {
        if !self.is_playing() {
            return;
        }
        self.elapsed_secs += secs;
        self.update_score();
    }

    /// Started, not paused, not completed.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.started && !self.paused && !self.completed
    }

    /// Append a record, bumping the move counter for counted records and
    /// evicting the oldest entries past `settings.max_history`. The kept
    /// history never starts with a flip.
    pub fn record(&mut self, record: MoveRecord) {
        if record.counts_as_move() {
            self.move_count += 1;
        }
        debug!(kind = record.kind(), moves = self.move_count, "move recorded");

        self.history.push_back(HistoryEntry::new(record, self.move_count));

        let max = self.settings.max_history.max(1);
        while self.history.len() > max {
            self.history.pop_front();
        }
        // A flip is undone with the move before it; drop flips that lost it.
        while self
            .history
            .front()
            .is_some_and(|entry| !entry.record.counts_as_move())
        {
            self.history.pop_front();
        }
        self.update_score();
    }

    /// The most recent entry, if any.
    #[must_use]
    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Remove the most recent entry, reverting its move-count effect.
    pub fn pop_entry(&mut self) -> Option<HistoryEntry> {
        let entry = self.history.pop_back()?;
        if entry.record.counts_as_move() {
            self.move_count = self.move_count.saturating_sub(1);
        }
        self.update_score();
        Some(entry)
    }

    /// Count one more foundation card. Returns true when all 52 are home.
    pub fn add_to_foundation(&mut self) -> bool {
        self.foundation_card_count += 1;
        self.update_score();
        self.foundation_card_count as usize == DECK_SIZE
    }

    /// Count one card leaving a foundation.
    pub fn remove_from_foundation(&mut self) {
        self.foundation_card_count = self.foundation_card_count.saturating_sub(1);
        self.update_score();
    }

    /// Recompute the score from current counters.
    pub fn update_score(&mut self) {
        if !self.started {
            return;
        }
        self.score = ScoreCalculator::calculate(
            self.move_count,
            self.elapsed_secs,
            self.foundation_card_count,
        );
    }

    /// Undo is enabled, history is non-empty and the game is in progress.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.settings.allow_undo && !self.history.is_empty() && self.started && !self.completed
    }

    /// Fraction of the deck on the foundations, 0.0..=1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        f64::from(self.foundation_card_count) / DECK_SIZE as f64
    }
}
