//! Best-effort storage of the current level index
//!
//! Only the index survives a restart. A restored level always begins again at
//! its full duration.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::PersistenceError;

/// String-keyed store holding integer values
pub trait LevelStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<i64>, PersistenceError>;
    fn save(&self, key: &str, index: usize) -> Result<(), PersistenceError>;
}

/// JSON object on disk, rewritten on every save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Map::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl LevelStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<i64>, PersistenceError> {
        let map = self.read_map()?;
        // browser-style stores keep numbers as strings
        Ok(map.get(key).and_then(|value| match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }))
    }

    fn save(&self, key: &str, index: usize) -> Result<(), PersistenceError> {
        // a corrupt file is replaced rather than blocking every later save
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), Value::from(index));
        fs::write(&self.path, serde_json::to_vec_pretty(&map)?)?;
        Ok(())
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: i64) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value);
        }
        store
    }
}

impl LevelStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<i64>, PersistenceError> {
        let values = self
            .values
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        Ok(values.get(key).copied())
    }

    fn save(&self, key: &str, index: usize) -> Result<(), PersistenceError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        values.insert(key.to_string(), index as i64);
        Ok(())
    }
}

/// Binds a store to the configured key and absorbs every failure
#[derive(Clone)]
pub struct LevelIndexPersistence {
    store: Arc<dyn LevelStore>,
    key: String,
}

impl LevelIndexPersistence {
    pub fn new(store: Arc<dyn LevelStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored index if it addresses one of `level_count` levels, else 0
    pub fn load_index(&self, level_count: usize) -> usize {
        match self.store.load(&self.key) {
            Ok(Some(index)) if index >= 0 && (index as usize) < level_count => {
                info!("Restored level index {} from '{}'", index, self.key);
                index as usize
            }
            Ok(Some(index)) => {
                warn!(
                    "Ignoring stored level index {} outside 0..{}",
                    index, level_count
                );
                0
            }
            Ok(None) => {
                debug!("No stored level index under '{}'", self.key);
                0
            }
            Err(e) => {
                warn!("Failed to load level index: {}", e);
                0
            }
        }
    }

    pub fn save_index(&self, index: usize) {
        match self.store.save(&self.key, index) {
            Ok(()) => debug!("Saved level index {} under '{}'", index, self.key),
            Err(e) => warn!("Failed to save level index: {}", e),
        }
    }
}

impl std::fmt::Debug for LevelIndexPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelIndexPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "tournamentClock.currentLevel";

    struct FailingStore;

    impl LevelStore for FailingStore {
        fn load(&self, _: &str) -> Result<Option<i64>, PersistenceError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }

        fn save(&self, _: &str, _: usize) -> Result<(), PersistenceError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }
    }

    #[test]
    fn file_store_round_trips_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load(KEY).unwrap(), None);
        store.save(KEY, 3).unwrap();
        assert_eq!(store.load(KEY).unwrap(), Some(3));

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn file_store_reads_string_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, format!(r#"{{ "{KEY}": "2" }}"#)).unwrap();

        assert_eq!(JsonFileStore::new(&path).load(KEY).unwrap(), Some(2));
    }

    #[test]
    fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load(KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error_for_load_but_not_for_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(KEY), Err(PersistenceError::Format(_))));
        store.save(KEY, 1).unwrap();
        assert_eq!(store.load(KEY).unwrap(), Some(1));
    }

    #[test]
    fn adapter_rejects_out_of_range_indices() {
        for stored in [-1, 5, 9] {
            let persistence =
                LevelIndexPersistence::new(Arc::new(MemoryStore::with_value(KEY, stored)), KEY);
            assert_eq!(persistence.load_index(5), 0);
        }
        let persistence = LevelIndexPersistence::new(Arc::new(MemoryStore::with_value(KEY, 4)), KEY);
        assert_eq!(persistence.load_index(5), 4);
    }

    #[test]
    fn adapter_swallows_store_failures() {
        let persistence = LevelIndexPersistence::new(Arc::new(FailingStore), KEY);
        assert_eq!(persistence.load_index(3), 0);
        persistence.save_index(2);
    }
}
