//! Persistence seam.
//!
//! The app stores everything as named JSON blobs in a device key-value
//! store; the core only ever sees the [`BlobStore`] trait. Reads never fail
//! outward: an absent blob yields the default value silently, a corrupt or
//! unreadable one yields the default with a warning. Writes are best-effort
//! and failures are logged, not surfaced.

use std::collections::HashMap;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Alarm, AppSettings, MatchState, WeatherData};

// Blob keys as the app has always written them.
pub const SETTINGS_KEY: &str = "@pegpro_settings";
pub const CURRENT_MATCH_KEY: &str = "@pegpro_current_match";
pub const MATCH_HISTORY_KEY: &str = "@pegpro_match_history";
pub const ALARMS_KEY: &str = "@pegpro_alarms";
pub const WEATHER_KEY: &str = "@pegpro_weather";

const ALL_KEYS: [&str; 5] = [
    SETTINGS_KEY,
    CURRENT_MATCH_KEY,
    MATCH_HISTORY_KEY,
    ALARMS_KEY,
    WEATHER_KEY,
];

/// Completed matches kept in history, newest first.
pub const HISTORY_CAP: usize = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage io failure: {0}")]
    Io(String),
}

/// String-keyed blob storage, implemented by the embedding app over the
/// device store.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

fn load_or<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("discarding corrupt blob {key}: {err}");
                default()
            }
        },
        Ok(None) => default(),
        Err(err) => {
            warn!("failed to read blob {key}: {err}");
            default()
        }
    }
}

fn save<T: Serialize>(store: &mut dyn BlobStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(err) = store.put(key, &raw) {
                warn!("failed to write blob {key}: {err}");
            }
        }
        Err(err) => warn!("failed to encode blob {key}: {err}"),
    }
}

pub fn load_settings(store: &dyn BlobStore) -> AppSettings {
    load_or(store, SETTINGS_KEY, AppSettings::default)
}

pub fn save_settings(store: &mut dyn BlobStore, settings: &AppSettings) {
    save(store, SETTINGS_KEY, settings);
}

pub fn load_current_match(store: &dyn BlobStore) -> Option<MatchState> {
    load_or(store, CURRENT_MATCH_KEY, || None)
}

/// Persist the active-match slot; `None` clears it.
pub fn save_current_match(store: &mut dyn BlobStore, state: Option<&MatchState>) {
    match state {
        Some(state) => save(store, CURRENT_MATCH_KEY, state),
        None => {
            if let Err(err) = store.remove(CURRENT_MATCH_KEY) {
                warn!("failed to clear blob {CURRENT_MATCH_KEY}: {err}");
            }
        }
    }
}

pub fn load_history(store: &dyn BlobStore) -> Vec<MatchState> {
    load_or(store, MATCH_HISTORY_KEY, Vec::new)
}

/// Prepend an ended match to history, evicting past [`HISTORY_CAP`].
pub fn push_history(store: &mut dyn BlobStore, state: MatchState) {
    let mut history = load_history(store);
    history.insert(0, state);
    history.truncate(HISTORY_CAP);
    save(store, MATCH_HISTORY_KEY, &history);
}

pub fn load_alarms(store: &dyn BlobStore) -> Vec<Alarm> {
    load_or(store, ALARMS_KEY, Vec::new)
}

pub fn save_alarms(store: &mut dyn BlobStore, alarms: &[Alarm]) {
    save(store, ALARMS_KEY, &alarms);
}

pub fn load_weather(store: &dyn BlobStore) -> Option<WeatherData> {
    load_or(store, WEATHER_KEY, || None)
}

pub fn save_weather(store: &mut dyn BlobStore, weather: &WeatherData) {
    save(store, WEATHER_KEY, weather);
}

/// Remove every blob the app owns.
pub fn clear_all(store: &mut dyn BlobStore) {
    for key in ALL_KEYS {
        if let Err(err) = store.remove(key) {
            warn!("failed to clear blob {key}: {err}");
        }
    }
}

/// In-memory store for host tests and previews.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw blob contents, for inspection in tests.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchConfig, Net, WeightUnit};

    /// Store whose every operation fails, for the swallow paths.
    struct BrokenStore;

    impl BlobStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn put(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn sample_match(id: &str) -> MatchState {
        MatchState {
            id: id.to_string(),
            config: MatchConfig {
                name: "Club Qualifier".to_string(),
                duration_minutes: 300,
                peg_number: "14".to_string(),
                number_of_nets: 2,
                net_capacity: Some(25_000.0),
                unit: WeightUnit::LbOz,
                keep_screen_on: true,
            },
            start_time: 1_700_000_000_000,
            end_time: None,
            nets: vec![
                Net { weight: 0.0, capacity: Some(25_000.0) },
                Net { weight: 0.0, capacity: Some(25_000.0) },
            ],
            is_active: true,
        }
    }

    #[test]
    fn test_absent_blobs_fall_back_to_defaults() {
        let store = MemoryBlobStore::new();
        assert_eq!(load_settings(&store), AppSettings::default());
        assert_eq!(load_current_match(&store), None);
        assert!(load_history(&store).is_empty());
        assert!(load_alarms(&store).is_empty());
        assert_eq!(load_weather(&store), None);
    }

    #[test]
    fn test_corrupt_blobs_fall_back_to_defaults() {
        let mut store = MemoryBlobStore::new();
        store.put(SETTINGS_KEY, "{not json").unwrap();
        store.put(MATCH_HISTORY_KEY, "42").unwrap();
        assert_eq!(load_settings(&store), AppSettings::default());
        assert!(load_history(&store).is_empty());
    }

    #[test]
    fn test_partial_settings_blob_merges_over_defaults() {
        let mut store = MemoryBlobStore::new();
        store.put(SETTINGS_KEY, r#"{"unit":"kg/g"}"#).unwrap();
        let settings = load_settings(&store);
        assert_eq!(settings.unit, WeightUnit::KgG);
        assert_eq!(settings.display_name, "Angler");
        assert!(settings.haptics);
    }

    #[test]
    fn test_match_blob_keeps_original_field_names() {
        let mut store = MemoryBlobStore::new();
        save_current_match(&mut store, Some(&sample_match("m1")));
        let raw = store.raw(CURRENT_MATCH_KEY).unwrap();
        assert!(raw.contains("\"startTime\""));
        assert!(raw.contains("\"durationMinutes\""));
        assert!(raw.contains("\"isActive\""));
        assert!(raw.contains("\"lb/oz\""));
        // Unset optionals are omitted, as the app always wrote them.
        assert!(!raw.contains("\"endTime\""));

        let restored = load_current_match(&store).unwrap();
        assert_eq!(restored, sample_match("m1"));
    }

    #[test]
    fn test_save_current_match_none_clears_the_slot() {
        let mut store = MemoryBlobStore::new();
        save_current_match(&mut store, Some(&sample_match("m1")));
        save_current_match(&mut store, None);
        assert_eq!(load_current_match(&store), None);
    }

    #[test]
    fn test_history_prepends_and_caps() {
        let mut store = MemoryBlobStore::new();
        for i in 0..55 {
            push_history(&mut store, sample_match(&format!("m{i}")));
        }
        let history = load_history(&store);
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history[0].id, "m54");
        assert_eq!(history[HISTORY_CAP - 1].id, "m5");
    }

    #[test]
    fn test_clear_all_removes_every_blob() {
        let mut store = MemoryBlobStore::new();
        save_settings(&mut store, &AppSettings::default());
        save_current_match(&mut store, Some(&sample_match("m1")));
        clear_all(&mut store);
        assert_eq!(store.raw(SETTINGS_KEY), None);
        assert_eq!(store.raw(CURRENT_MATCH_KEY), None);
    }

    #[test]
    fn test_broken_store_degrades_to_defaults_without_panicking() {
        let mut store = BrokenStore;
        assert_eq!(load_settings(&store), AppSettings::default());
        save_settings(&mut store, &AppSettings::default());
        save_current_match(&mut store, None);
        clear_all(&mut store);
    }
}
