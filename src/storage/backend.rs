//! Storage backend abstraction.
//!
//! This module defines the [`StateStore`] trait that abstracts the host's
//! per-widget key-value storage service. The bridge and the engine only ever
//! see this trait, so an in-memory store can substitute for the file-backed
//! one in tests.
//!
//! # Design Philosophy
//!
//! The trait is the narrow interface the core actually needs (get, set,
//! subscribe, drain change notifications), not a generic database. Change
//! notification is pull-based: the single-threaded plugin drains pending
//! change events after each update instead of registering callbacks, which
//! keeps the re-entrancy story trivial.

use crate::domain::error::Result;
use crate::storage::value::StoredValue;

/// A change notification for a subscribed key.
///
/// Emitted by a store when a `set` actually changed a subscribed key's value.
/// Unchanged writes never produce events; that guarantee is what prevents the
/// subscribe-and-rewrite display path from looping (the store-notify guard).
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// The key that changed.
    pub path: String,
    /// The new value.
    pub value: StoredValue,
}

/// Abstraction over the host's persistent key-value storage.
///
/// Keys are slash-separated paths (`state/x`, `stdout`). Values are tri-state:
/// `get` returns `None` for a key never written, `Some(StoredValue::Null)` for
/// an explicit null, and `Some(value)` otherwise.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): JSON file with atomic writes (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): in-memory, for tests
pub trait StateStore {
    /// Reads a key. `None` means the key has never been written.
    fn get(&self, path: &str) -> Option<StoredValue>;

    /// Writes a key, returning whether the stored value actually changed.
    ///
    /// Writes of an identical value are no-ops: nothing is persisted and no
    /// change event is queued. Implementations persist changed values before
    /// returning (no deferred or batched writes).
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the write fails.
    fn set(&mut self, path: &str, value: StoredValue) -> Result<bool>;

    /// Subscribes to change notifications for a key.
    ///
    /// Subsequent differing writes to the key queue a [`ChangeEvent`]
    /// retrievable via [`drain_changes`](Self::drain_changes).
    fn subscribe(&mut self, path: &str);

    /// Takes all queued change events, oldest first.
    fn drain_changes(&mut self) -> Vec<ChangeEvent>;
}
