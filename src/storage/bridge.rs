//! Persistence bridge between the calculator engine and the key-value store.
//!
//! The bridge mirrors engine state under a fixed key namespace (`state/*`),
//! rehydrates it on plugin load, and forwards the display value to a public
//! slot other widgets can read. Its contract: every engine mutation is
//! followed by a `persist` before the update returns, writes happen only when
//! a value actually differs from the stored one (the re-entrancy guard), and
//! a non-finite accumulator is rewritten to `0` so a poisoned value never
//! survives a reload.

use crate::domain::accumulator::Accumulator;
use crate::domain::error::Result;
use crate::domain::operator::Operator;
use crate::storage::backend::{ChangeEvent, StateStore};
use crate::storage::value::StoredValue;

/// Key for the accumulator / display value.
pub const KEY_X: &str = "state/x";
/// Key for the committed left operand.
pub const KEY_Y: &str = "state/y";
/// Key for the pending operator id; explicitly null when none is pending.
pub const KEY_OPERATION: &str = "state/operation";
/// Key for the operator-replace flag.
pub const KEY_OPFLAG: &str = "state/opflag";
/// Key for the fresh-entry flag.
pub const KEY_ENTERFLAG: &str = "state/enterflag";
/// Key for the operand-committed flag.
pub const KEY_YFLAG: &str = "state/yflag";

/// Storage-layer snapshot of the engine state.
///
/// This is the persistence representation of the calculator's arithmetic
/// fields, kept separate from the application state so the storage layer does
/// not depend on UI concerns (theme, emphasis, readout size).
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    /// Accumulator / display value.
    pub x: Accumulator,
    /// Committed left operand.
    pub y: f64,
    /// Pending operator, `None` when no chain is in progress.
    pub operation: Option<Operator>,
    /// An operand has been committed at least once.
    pub y_committed: bool,
    /// The next digit starts a fresh number.
    pub fresh_entry: bool,
    /// The next operator press replaces instead of evaluating.
    pub replace_op: bool,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            x: Accumulator::Value(0.0),
            y: 0.0,
            operation: None,
            y_committed: false,
            fresh_entry: false,
            replace_op: false,
        }
    }
}

/// Bridges engine state into a [`StateStore`] and the public publish slot.
pub struct StateBridge<S: StateStore> {
    store: S,
    publish_path: String,
}

impl<S: StateStore> StateBridge<S> {
    /// Wraps a store, subscribing to external changes of the display value.
    pub fn new(store: S, publish_path: impl Into<String>) -> Self {
        let mut store = store;
        store.subscribe(KEY_X);
        Self {
            store,
            publish_path: publish_path.into(),
        }
    }

    /// Rehydrates engine state from the store, seeding defaults for keys that
    /// have never been written.
    ///
    /// Missing keys are written back with their defaults so the namespace is
    /// fully populated after first load. A stored non-finite accumulator is
    /// repaired to `0` during hydration.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding a missing key fails to persist.
    pub fn hydrate(&mut self) -> Result<StateSnapshot> {
        let _span = tracing::debug_span!("bridge_hydrate").entered();

        let defaults = StateSnapshot::default();
        let mut snapshot = StateSnapshot {
            x: match self.store.get(KEY_X) {
                Some(StoredValue::Str(text)) => Accumulator::Entry(text),
                Some(StoredValue::Num(n)) => Accumulator::Value(n),
                _ => defaults.x.clone(),
            },
            y: self
                .store
                .get(KEY_Y)
                .and_then(|v| v.as_num())
                .unwrap_or(defaults.y),
            operation: self
                .store
                .get(KEY_OPERATION)
                .and_then(|v| v.as_str().and_then(Operator::from_id)),
            y_committed: self
                .store
                .get(KEY_YFLAG)
                .is_some_and(|v| v.as_bool()),
            fresh_entry: self
                .store
                .get(KEY_ENTERFLAG)
                .is_some_and(|v| v.as_bool()),
            replace_op: self
                .store
                .get(KEY_OPFLAG)
                .is_some_and(|v| v.as_bool()),
        };

        if snapshot.x.is_non_finite() {
            tracing::debug!("repairing non-finite stored accumulator");
            snapshot.x = Accumulator::Value(0.0);
        }

        self.persist(&snapshot)?;

        tracing::debug!(
            x = %snapshot.x.display(),
            operation = ?snapshot.operation,
            "state hydrated"
        );
        Ok(snapshot)
    }

    /// Mirrors a snapshot into the store and publishes the display value.
    ///
    /// Each field is written through the store's value-changed guard, so
    /// repeated persists of unchanged state touch nothing and trigger no
    /// change notifications. A non-finite accumulator is persisted (and
    /// published) as `0`.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; earlier fields may already have
    /// been written.
    pub fn persist(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        let _span = tracing::debug_span!("bridge_persist").entered();

        let x_value: StoredValue = if snapshot.x.is_non_finite() {
            tracing::debug!(
                sentinel = %snapshot.x.display(),
                "rewriting non-finite display value to 0"
            );
            StoredValue::Num(0.0)
        } else {
            match &snapshot.x {
                Accumulator::Entry(text) => StoredValue::Str(text.clone()),
                Accumulator::Value(v) => StoredValue::Num(*v),
            }
        };
        let display = match &x_value {
            StoredValue::Str(text) => text.clone(),
            _ => Accumulator::Value(x_value.as_num().unwrap_or(0.0)).display(),
        };

        self.store.set(KEY_X, x_value)?;
        self.store.set(KEY_Y, StoredValue::Num(snapshot.y))?;
        self.store.set(
            KEY_OPERATION,
            snapshot
                .operation
                .map_or(StoredValue::Null, |op| StoredValue::Str(op.id().to_string())),
        )?;
        self.store
            .set(KEY_OPFLAG, StoredValue::Bool(snapshot.replace_op))?;
        self.store
            .set(KEY_ENTERFLAG, StoredValue::Bool(snapshot.fresh_entry))?;
        self.store
            .set(KEY_YFLAG, StoredValue::Bool(snapshot.y_committed))?;

        let publish_path = self.publish_path.clone();
        if self.store.set(&publish_path, StoredValue::Str(display))? {
            tracing::debug!("display value published");
        }

        Ok(())
    }

    /// Takes pending external change events for subscribed keys.
    pub fn drain_changes(&mut self) -> Vec<ChangeEvent> {
        self.store.drain_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn bridge() -> StateBridge<MemoryStore> {
        StateBridge::new(MemoryStore::new(), "stdout")
    }

    #[test]
    fn hydrate_seeds_defaults_on_first_load() {
        let mut bridge = bridge();
        let snapshot = bridge.hydrate().unwrap();

        assert_eq!(snapshot, StateSnapshot::default());
        assert_eq!(bridge.store.get(KEY_X), Some(StoredValue::Num(0.0)));
        assert_eq!(bridge.store.get(KEY_OPERATION), Some(StoredValue::Null));
        assert_eq!(bridge.store.get(KEY_YFLAG), Some(StoredValue::Bool(false)));
    }

    #[test]
    fn persist_then_hydrate_round_trips() {
        let mut bridge = bridge();
        let snapshot = StateSnapshot {
            x: Accumulator::Entry("12.".to_string()),
            y: 4.0,
            operation: Some(Operator::Add),
            y_committed: true,
            fresh_entry: true,
            replace_op: true,
        };

        bridge.persist(&snapshot).unwrap();
        assert_eq!(bridge.hydrate().unwrap(), snapshot);
    }

    #[test]
    fn publishes_display_value_on_change_only() {
        let mut bridge = bridge();
        let snapshot = StateSnapshot {
            x: Accumulator::Value(5.0),
            ..StateSnapshot::default()
        };

        bridge.persist(&snapshot).unwrap();
        assert_eq!(
            bridge.store.get("stdout"),
            Some(StoredValue::Str("5".to_string()))
        );

        // Unchanged persists must not re-notify the display subscription.
        bridge.store.drain_changes();
        bridge.persist(&snapshot).unwrap();
        assert!(bridge.store.drain_changes().is_empty());
    }

    #[test]
    fn non_finite_accumulator_persists_as_zero() {
        let mut bridge = bridge();
        let snapshot = StateSnapshot {
            x: Accumulator::Value(f64::INFINITY),
            ..StateSnapshot::default()
        };

        bridge.persist(&snapshot).unwrap();
        assert_eq!(bridge.store.get(KEY_X), Some(StoredValue::Num(0.0)));
        assert_eq!(
            bridge.store.get("stdout"),
            Some(StoredValue::Str("0".to_string()))
        );
    }

    #[test]
    fn hydrate_repairs_poisoned_store() {
        let mut store = MemoryStore::new();
        store.set(KEY_X, StoredValue::Num(f64::NAN)).unwrap();

        let mut bridge = StateBridge::new(store, "stdout");
        let snapshot = bridge.hydrate().unwrap();
        assert_eq!(snapshot.x, Accumulator::Value(0.0));
    }
}
