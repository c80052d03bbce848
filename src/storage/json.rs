//! JSON file-based storage backend.
//!
//! This module provides the persistent [`StateStore`] implementation: a single
//! human-readable JSON file holding the widget's key-value entries. Writes are
//! atomic (write-to-temp + rename) so a crash never leaves a corrupt file, and
//! every changed `set` is flushed before it returns; the persistence contract
//! requires external observers to see consistent state after each user action.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1), the file is loaded into memory once on open
//! - **Write**: O(n), the whole entry map is serialized per changed set
//! - **Best for**: the handful of `state/*` keys this widget owns

use crate::domain::error::{Result, ZalcError};
use crate::storage::backend::{ChangeEvent, StateStore};
use crate::storage::value::StoredValue;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// JSON storage container format.
///
/// The top-level structure serialized to disk. Wraps the entry map with a
/// format version and a last-saved timestamp for future migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format.
    version: u32,

    /// Unix timestamp of the most recent save.
    #[serde(default)]
    saved_at: i64,

    /// All stored key-value entries.
    #[serde(default)]
    entries: HashMap<String, StoredValue>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            saved_at: 0,
            entries: HashMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; the plugin is single-threaded and owns the store
/// directly.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "saved_at": 1234567890,
///   "entries": {
///     "state/x": "12.",
///     "state/y": 4.0,
///     "state/operation": "add",
///     "state/opflag": true,
///     "stdout": "12."
///   }
/// }
/// ```
pub struct JsonStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data, loaded on open.
    data: StorageData,

    /// Keys with change notification enabled.
    subscriptions: HashSet<String>,

    /// Queued change events for subscribed keys.
    pending: Vec<ChangeEvent>,
}

impl JsonStore {
    /// Creates or opens a JSON store.
    ///
    /// If the file exists, loads existing data; otherwise starts empty. Parent
    /// directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zalculator::storage::JsonStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonStore::open(PathBuf::from("/data/state.json"))?;
    /// # Ok::<(), zalculator::ZalcError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StorageData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store opened");

        Ok(Self {
            file_path,
            data,
            subscriptions: HashSet::new(),
            pending: Vec::new(),
        })
    }

    fn load_from_file(path: &PathBuf) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ZalcError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded store data"
        );

        Ok(data)
    }

    /// Saves the store to disk using an atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path,
    /// so the file is never left half-written.
    fn save_to_file(&mut self) -> Result<()> {
        self.data.saved_at = chrono::Utc::now().timestamp();

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ZalcError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl StateStore for JsonStore {
    fn get(&self, path: &str) -> Option<StoredValue> {
        self.data.entries.get(path).cloned()
    }

    fn set(&mut self, path: &str, value: StoredValue) -> Result<bool> {
        if self.data.entries.get(path) == Some(&value) {
            tracing::trace!(path = %path, "unchanged value, skipping write");
            return Ok(false);
        }

        self.data.entries.insert(path.to_string(), value.clone());
        self.save_to_file()?;

        if self.subscriptions.contains(path) {
            self.pending.push(ChangeEvent {
                path: path.to_string(),
                value,
            });
        }

        tracing::debug!(path = %path, "entry written");
        Ok(true)
    }

    fn subscribe(&mut self, path: &str) {
        self.subscriptions.insert(path.to_string());
    }

    fn drain_changes(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let mut store = JsonStore::open(path.clone()).unwrap();
            store.set("state/x", StoredValue::Str("12.".into())).unwrap();
            store.set("state/y", StoredValue::Num(4.0)).unwrap();
            store.set("state/operation", StoredValue::Null).unwrap();
        }

        let store = JsonStore::open(path).unwrap();
        assert_eq!(store.get("state/x"), Some(StoredValue::Str("12.".into())));
        assert_eq!(store.get("state/y"), Some(StoredValue::Num(4.0)));
        assert_eq!(store.get("state/operation"), Some(StoredValue::Null));
        assert_eq!(store.get("state/opflag"), None);
    }

    #[test]
    fn unchanged_write_does_not_touch_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonStore::open(path.clone()).unwrap();
        assert!(store.set("stdout", StoredValue::Str("5".into())).unwrap());
        let modified = std::fs::metadata(&path).unwrap().modified().unwrap();

        assert!(!store.set("stdout", StoredValue::Str("5".into())).unwrap());
        assert_eq!(
            std::fs::metadata(&path).unwrap().modified().unwrap(),
            modified
        );
    }

    #[test]
    fn change_events_respect_subscriptions() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::open(dir.path().join("state.json")).unwrap();
        store.subscribe("state/x");

        store.set("state/x", StoredValue::Num(1.0)).unwrap();
        store.set("state/x", StoredValue::Num(1.0)).unwrap();
        store.set("state/enterflag", StoredValue::Bool(true)).unwrap();

        let changes = store.drain_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "state/x");
    }
}
