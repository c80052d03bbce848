//! In-memory storage backend.
//!
//! A [`StateStore`] implementation backed by a plain map, with the same
//! change-notification semantics as the file-backed store. Stands in for
//! [`JsonStore`](crate::storage::JsonStore) wherever persistence across
//! reloads is not wanted, which in practice means the test suites of the
//! bridge and the handler.

use crate::domain::error::Result;
use crate::storage::backend::{ChangeEvent, StateStore};
use crate::storage::value::StoredValue;
use std::collections::{HashMap, HashSet};

/// Map-backed store with the same change-notification semantics as the
/// file-backed one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, StoredValue>,
    subscriptions: HashSet<String>,
    pending: Vec<ChangeEvent>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, path: &str) -> Option<StoredValue> {
        self.entries.get(path).cloned()
    }

    fn set(&mut self, path: &str, value: StoredValue) -> Result<bool> {
        if self.entries.get(path) == Some(&value) {
            return Ok(false);
        }
        self.entries.insert(path.to_string(), value.clone());
        if self.subscriptions.contains(path) {
            self.pending.push(ChangeEvent {
                path: path.to_string(),
                value,
            });
        }
        Ok(true)
    }

    fn subscribe(&mut self, path: &str) {
        self.subscriptions.insert(path.to_string());
    }

    fn drain_changes(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.pending)
    }
}
