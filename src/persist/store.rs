//! Key-value persistence port and typed helpers over it.
//!
//! The engine never touches storage itself. A host provides a
//! `PersistencePort` (browser storage, a file, a database row); the helpers
//! here encode and decode the three things worth keeping: the game in
//! progress, lifetime statistics and settings.
//!
//! Anything unreadable is treated as absent and logged at `warn`.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::snapshot::GameSnapshot;
use crate::core::config::Settings;
use crate::core::error::SnapshotError;
use crate::core::stats::Statistics;

pub const GAME_KEY: &str = "klondike.game";
pub const STATS_KEY: &str = "klondike.stats";
pub const SETTINGS_KEY: &str = "klondike.settings";

/// String storage keyed by name.
pub trait PersistencePort {
    fn save(&mut self, key: &str, value: String);
    fn load(&self, key: &str) -> Option<String>;
    fn remove(&mut self, key: &str);
}

/// In-process store, for tests and hosts without durable storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PersistencePort for MemoryStore {
    fn save(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

fn save_json<T: Serialize>(port: &mut impl PersistencePort, key: &str, value: &T) -> Result<(), SnapshotError> {
    let json = serde_json::to_string(value).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
    port.save(key, json);
    Ok(())
}

fn load_json<T: DeserializeOwned>(port: &impl PersistencePort, key: &str) -> Option<T> {
    let json = port.load(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "ignoring unreadable stored value");
            None
        }
    }
}

/// Store a game in progress.
pub fn save_snapshot(port: &mut impl PersistencePort, snapshot: &GameSnapshot) -> Result<(), SnapshotError> {
    port.save(GAME_KEY, snapshot.encode()?);
    Ok(())
}

/// Load the stored game, if one is usable as of `now`.
///
/// An unusable snapshot is removed from the port.
pub fn load_snapshot(port: &mut impl PersistencePort, now: u64) -> Option<GameSnapshot> {
    let json = port.load(GAME_KEY)?;
    match GameSnapshot::decode(&json, now) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "discarding saved game");
            port.remove(GAME_KEY);
            None
        }
    }
}

/// True if `load_snapshot` would return a game. Does not modify the port.
#[must_use]
pub fn has_saved_game(port: &impl PersistencePort, now: u64) -> bool {
    port.load(GAME_KEY)
        .is_some_and(|json| GameSnapshot::decode(&json, now).is_ok())
}

pub fn clear_snapshot(port: &mut impl PersistencePort) {
    port.remove(GAME_KEY);
}

pub fn save_statistics(port: &mut impl PersistencePort, stats: &Statistics) -> Result<(), SnapshotError> {
    save_json(port, STATS_KEY, stats)
}

/// Stored statistics, or fresh ones if none are readable.
#[must_use]
pub fn load_statistics(port: &impl PersistencePort) -> Statistics {
    load_json(port, STATS_KEY).unwrap_or_default()
}

pub fn save_settings(port: &mut impl PersistencePort, settings: &Settings) -> Result<(), SnapshotError> {
    save_json(port, SETTINGS_KEY, settings)
}

/// Stored settings merged over defaults, or defaults if none are readable.
#[must_use]
pub fn load_settings(port: &impl PersistencePort) -> Settings {
    load_json(port, SETTINGS_KEY).unwrap_or_default()
}
