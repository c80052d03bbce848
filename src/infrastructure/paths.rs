//! Storage path management for the Zellij plugin sandbox.
//!
//! The plugin runs sandboxed with a private, persistent data directory mounted
//! at `/data`. Both the state file and the log file live there, so nothing the
//! widget writes leaves its own sandbox.

use std::path::PathBuf;

/// Returns the plugin's private data directory.
///
/// Zellij mounts a per-plugin persistent directory at `/data`; it survives
/// plugin reloads and session restarts.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Returns the path of the JSON state file.
#[must_use]
pub fn store_file() -> PathBuf {
    get_data_dir().join("state.json")
}

/// Returns the path of the plugin log file.
#[must_use]
pub fn log_file() -> PathBuf {
    get_data_dir().join("zalculator.log")
}
