//! Persisted session records.
//!
//! The session layer never talks to storage directly. It goes through a
//! [`PersistenceGateway`], which is synchronous and never fails from the
//! caller's point of view: missing or corrupt records come back as `None`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage key for the resumable in-progress level.
pub const CURRENT_GAME_STATE_KEY: &str = "wordplay.current_game_state";

/// Storage key for the per-level history.
pub const GAME_PROGRESS_KEY: &str = "wordplay.game_progress";

/// Supported game languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Minimal record needed to resume an in-progress level.
///
/// Written by the game engine before it signals a pause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGameState {
    pub language: Language,

    /// Level that was in progress
    #[serde(default)]
    pub level: u32,

    /// When the engine wrote this record; older records carry only a language
    #[serde(default)]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SavedGameState {
    pub fn new(language: Language, level: u32) -> Self {
        Self {
            language,
            level,
            saved_at: Some(chrono::Utc::now()),
        }
    }
}

/// Per-level history, owned by the game engine.
///
/// The session layer only moves it between storage and the history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameProgressSnapshot(serde_json::Value);

impl GameProgressSnapshot {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Storage contract used by the session controller.
pub trait PersistenceGateway {
    fn load_current_game_state(&self) -> Option<SavedGameState>;

    fn save_current_game_state(&mut self, state: &SavedGameState);

    fn clear_current_game_state(&mut self);

    fn load_game_progress(&self) -> Option<GameProgressSnapshot>;

    fn save_game_progress(&mut self, progress: &GameProgressSnapshot);

    fn clear_game_progress(&mut self);
}

/// Opaque string key-value store (LocalStorage, a file, ...).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// [`PersistenceGateway`] storing JSON records in a [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreGateway<S> {
    store: S,
}

impl<S: KeyValueStore> StoreGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn load<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.store.get(key)?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring corrupt record {}: {}", key, e);
                None
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.store.set(key, json),
            Err(e) => log::warn!("Failed to serialize record {}: {}", key, e),
        }
    }
}

impl<S: KeyValueStore> PersistenceGateway for StoreGateway<S> {
    fn load_current_game_state(&self) -> Option<SavedGameState> {
        self.load(CURRENT_GAME_STATE_KEY)
    }

    fn save_current_game_state(&mut self, state: &SavedGameState) {
        self.save(CURRENT_GAME_STATE_KEY, state);
    }

    fn clear_current_game_state(&mut self) {
        self.store.remove(CURRENT_GAME_STATE_KEY);
    }

    fn load_game_progress(&self) -> Option<GameProgressSnapshot> {
        self.load(GAME_PROGRESS_KEY)
    }

    fn save_game_progress(&mut self, progress: &GameProgressSnapshot) {
        self.save(GAME_PROGRESS_KEY, progress);
    }

    fn clear_game_progress(&mut self) {
        self.store.remove(GAME_PROGRESS_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(serde_json::to_string(&Language::De).unwrap(), r#""de""#);
        assert!(serde_json::from_str::<Language>(r#""fr""#).is_err());
    }

    #[test]
    fn test_empty_store_has_nothing() {
        let gateway = StoreGateway::new(MemoryStore::new());
        assert!(gateway.load_current_game_state().is_none());
        assert!(gateway.load_game_progress().is_none());
    }

    #[test]
    fn test_save_load_clear_current_state() {
        let mut gateway = StoreGateway::new(MemoryStore::new());
        let state = SavedGameState::new(Language::De, 3);

        gateway.save_current_game_state(&state);
        assert_eq!(gateway.load_current_game_state(), Some(state));

        gateway.clear_current_game_state();
        assert!(gateway.load_current_game_state().is_none());
        assert!(!gateway.store().contains(CURRENT_GAME_STATE_KEY));
    }

    #[test]
    fn test_clears_are_independent() {
        let mut gateway = StoreGateway::new(MemoryStore::new());
        let progress = GameProgressSnapshot::new(serde_json::json!({"levels": [{"level": 1, "score": 40}]}));

        gateway.save_current_game_state(&SavedGameState::new(Language::En, 1));
        gateway.save_game_progress(&progress);

        gateway.clear_current_game_state();
        assert_eq!(gateway.load_game_progress(), Some(progress));
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_GAME_STATE_KEY, "{not json".to_string());
        store.set(GAME_PROGRESS_KEY, String::new());

        let gateway = StoreGateway::new(store);
        assert!(gateway.load_current_game_state().is_none());
        assert!(gateway.load_game_progress().is_none());
    }

    #[test]
    fn test_record_with_language_only() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_GAME_STATE_KEY, r#"{"language":"de"}"#.to_string());

        let loaded = StoreGateway::new(store).load_current_game_state().unwrap();
        assert_eq!(loaded.language, Language::De);
        assert_eq!(loaded.level, 0);
        assert_eq!(loaded.saved_at, None);
    }
}
