//! Lifetime statistics across games.

use serde::{Deserialize, Serialize};

/// Aggregate results, persisted between sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub games_played: u32,
    pub games_won: u32,
    /// Seconds summed over every archived game.
    pub total_time_secs: u64,
    pub total_moves: u64,
    /// Fastest win, in seconds.
    pub best_time_secs: Option<u64>,
    pub best_score: u32,
}

impl Statistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive one finished or abandoned game.
    pub fn record_game(&mut self, won: bool, elapsed_secs: u64, moves: u32, score: u32) {
        self.games_played += 1;
        self.total_time_secs += elapsed_secs;
        self.total_moves += u64::from(moves);

        if won {
            self.games_won += 1;
            if self.best_time_secs.map_or(true, |best| elapsed_secs < best) {
                self.best_time_secs = Some(elapsed_secs);
            }
            self.best_score = self.best_score.max(score);
        }
    }

    /// Win percentage, 0.0 with no games played.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played) * 100.0
        }
    }

    /// Total time divided by games won, 0 with no wins.
    #[must_use]
    pub fn average_time(&self) -> u64 {
        if self.games_won == 0 {
            0
        } else {
            self.total_time_secs / u64::from(self.games_won)
        }
    }
}
