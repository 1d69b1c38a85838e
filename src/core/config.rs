//! Game settings.
//!
//! Settings are persisted separately from games. Stored settings may be
//! partial: any missing field falls back to its default.

use serde::{Deserialize, Serialize};

/// Default bound on the move history length.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Cards drawn from the stock per draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DrawCount {
    One,
    #[default]
    Three,
}

impl DrawCount {
    #[must_use]
    pub const fn get(self) -> usize {
        match self {
            DrawCount::One => 1,
            DrawCount::Three => 3,
        }
    }
}

impl TryFrom<u8> for DrawCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DrawCount::One),
            3 => Ok(DrawCount::Three),
            n => Err(format!("draw count must be 1 or 3, got {}", n)),
        }
    }
}

impl From<DrawCount> for u8 {
    fn from(count: DrawCount) -> Self {
        count.get() as u8
    }
}

/// Player-facing game settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cards per stock draw (1 or 3).
    pub draw_count: DrawCount,

    /// Whether undo requests are honored.
    pub allow_undo: bool,

    /// Whether auto-complete requests are honored.
    pub auto_complete: bool,

    /// Whether hint requests are honored.
    pub hint_enabled: bool,

    /// Maximum history entries kept; the oldest are evicted first.
    pub max_history: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            draw_count: DrawCount::Three,
            allow_undo: true,
            auto_complete: true,
            hint_enabled: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_draw_count(mut self, draw_count: DrawCount) -> Self {
        self.draw_count = draw_count;
        self
    }

    #[must_use]
    pub fn with_undo(mut self, allow: bool) -> Self {
        self.allow_undo = allow;
        self
    }

    #[must_use]
    pub fn with_auto_complete(mut self, enabled: bool) -> Self {
        self.auto_complete = enabled;
        self
    }

    #[must_use]
    pub fn with_hints(mut self, enabled: bool) -> Self {
        self.hint_enabled = enabled;
        self
    }

    /// Set the history bound. Zero is raised to one.
    #[must_use]
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max.max(1);
        self
    }
}
