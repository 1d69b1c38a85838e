//! Saving and resuming games.
//!
//! - `snapshot`: the JSON snapshot of a game in progress and its validity
//!   rules
//! - `store`: the storage port a host implements, an in-memory store, and
//!   typed helpers for games, statistics and settings

pub mod snapshot;
pub mod store;

pub use snapshot::{GameSnapshot, SNAPSHOT_MAX_AGE_SECS};
pub use store::{
    clear_snapshot, has_saved_game, load_settings, load_snapshot, load_statistics, save_settings,
    save_snapshot, save_statistics, MemoryStore, PersistencePort, GAME_KEY, SETTINGS_KEY, STATS_KEY,
};
