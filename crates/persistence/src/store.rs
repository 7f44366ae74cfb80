//! Key-value preference store seam.
//!
//! The geofence collection is persisted the way the host platform persists
//! small preference blobs: a string value under a well-known key. Two
//! implementations are provided, an in-memory store for tests and a
//! JSON-file-backed store for the app.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store value is not valid JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// String key-value store with whole-value replacement semantics.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` when absent or
    /// unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Replaces the value for `key`. The write is all-or-nothing from the
    /// caller's perspective.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory preference store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store backed by a single JSON file holding a key-to-value map.
///
/// Writes go to a sibling temp file which is then renamed over the store
/// file, so readers observe either the previous or the new content, never a
/// partial write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Could not read preference store");
                return HashMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Preference store is corrupt; treating as empty");
                HashMap::new()
            }
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string_pretty(&map)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key"), Some("value".to_string()));

        store.set("key", "replaced").unwrap();
        assert_eq!(store.get("key"), Some("replaced".to_string()));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("key"), None);
        store.set("key", "value").unwrap();

        // A fresh instance over the same path sees the write.
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("key"), Some("value".to_string()));
    }

    #[test]
    fn test_file_store_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = JsonFileStore::new(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a"), Some("1".to_string()));
        assert_eq!(store.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_file_store_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json at all {{{").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("key"), None);

        // Writing over a corrupt file recovers it.
        store.set("key", "value").unwrap();
        assert_eq!(store.get("key"), Some("value".to_string()));
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("prefs.json");

        let store = JsonFileStore::new(&path);
        store.set("key", "value").unwrap();
        assert_eq!(store.get("key"), Some("value".to_string()));
    }
}
