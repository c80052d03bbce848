//! Persistence layer: the key-value store abstraction and the state bridge.
//!
//! The host grants each widget a private key-value store; this layer wraps it
//! behind the [`StateStore`] trait, provides the file-backed and in-memory
//! implementations, and the [`StateBridge`] that mirrors engine state under
//! `state/*` and publishes the display value to the public slot.

pub mod backend;
pub mod bridge;
pub mod json;
pub mod memory;
pub mod value;

pub use backend::{ChangeEvent, StateStore};
pub use bridge::{StateBridge, StateSnapshot};
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use value::StoredValue;
