//! Zalculator: a pocket calculator widget for the Zellij terminal multiplexer.
//!
//! Zalculator is a plugin pane that provides:
//! - A running-accumulator calculator with chained evaluation
//! - An operator-replace window for correcting a mispressed operator
//! - Persistent state backed by JSON key-value storage in the plugin sandbox
//! - A published display value other panes can read from the store
//! - Theming with built-in and custom TOML color schemes
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Engine state machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                              │
//! ┌───────────────────┐       ┌───────────────────┐
//! │ UI Layer (ui/)    │       │ Storage (storage/)│
//! │ - Rendering       │       │ - JSON store      │
//! │ - Theming         │       │ - State bridge    │
//! │ - Display fitting │       │ - Change events   │
//! └───────────────────┘       └───────────────────┘
//!         │                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Errors, operators, accumulator (domain/)         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber with rotating file output     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/zalculator.wasm" {
//!         theme "slate"
//!         publish_path "stdout"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create [`CalcState`], open the JSON store, hydrate persisted state.
//! 2. **Update**: translate key events to engine events, run the transition,
//!    mirror the new state through the bridge before the update returns.
//! 3. **Render**: compute the view model and render components (readout,
//!    keypad, footer).
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: any ANSI-capable terminal emulator

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, CalcState, DigitKey, DisplayMode, Event, OpEmphasis};
pub use domain::{Accumulator, Operator, Result, ZalcError};
pub use storage::{JsonStore, MemoryStore, StateBridge, StateSnapshot, StateStore, StoredValue};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/zalculator.wasm" {
///     theme "slate"
///     theme_file "/path/to/theme.toml"
///     publish_path "stdout"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Built-in theme name to use.
    ///
    /// Options: `slate`, `paper`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Store key the display value is published under.
    ///
    /// Other panes reading the store observe the calculator's current display
    /// at this key. Default: `"stdout"`.
    pub publish_path: String,

    /// Initial readout font size, before any display fitting.
    ///
    /// Default: `32.0`.
    pub readout_size: f64,

    /// Tracing level for log output.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: None,
            theme_file: None,
            publish_path: "stdout".to_string(),
            readout_size: app::state::DEFAULT_READOUT_SIZE,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization; values are extracted with fallback defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zalculator::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "paper".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("paper"));
    /// assert_eq!(config.publish_path, "stdout");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let publish_path = config
            .get("publish_path")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "stdout".to_string());

        let readout_size = config
            .get("readout_size")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(app::state::DEFAULT_READOUT_SIZE);

        Self {
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            publish_path,
            readout_size,
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the application state with configuration.
///
/// Resolves the theme (custom file, then built-in name, then default) and
/// returns a [`CalcState`] ready for event processing. Theme load failures
/// fall back to the default theme with a log entry rather than failing the
/// plugin.
pub fn initialize(config: &Config) -> CalcState {
    tracing::debug!("initializing zalculator plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file.clone()).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let mut state = CalcState::new(theme);
    state.readout_size = config.readout_size;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_apply_to_missing_keys() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.theme_name, None);
        assert_eq!(config.publish_path, "stdout");
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn empty_publish_path_falls_back_to_default() {
        let mut map = BTreeMap::new();
        map.insert("publish_path".to_string(), "  ".to_string());
        let config = Config::from_zellij(&map);
        assert_eq!(config.publish_path, "stdout");
    }

    #[test]
    fn malformed_readout_size_falls_back_to_default() {
        let mut map = BTreeMap::new();
        map.insert("readout_size".to_string(), "huge".to_string());
        let config = Config::from_zellij(&map);
        assert!((config.readout_size - app::state::DEFAULT_READOUT_SIZE).abs() < f64::EPSILON);

        map.insert("readout_size".to_string(), "48".to_string());
        let config = Config::from_zellij(&map);
        assert!((config.readout_size - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "slate");
    }
}
