//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the Zalculator library and the Zellij
//! plugin system. It implements the `ZellijPlugin` trait, translates host
//! events to library events, and executes the resulting actions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create [`CalcState`], open
//!    the JSON store and hydrate persisted state
//! 2. **Update**: map key events to engine events, run the transition,
//!    mirror state through the persistence bridge before returning
//! 3. **Pipe**: react to `display_mode` broadcasts from the host
//! 4. **Render**: call the library render function
//!
//! # Keybindings
//!
//! - `0`–`9`, `.`: digit entry
//! - `+`, `-`, `*` (or `x`), `/`: operators
//! - `=` / `Enter`: equals
//! - `n`: unary minus
//! - `c`: clear display and pending operator
//! - `C`: clear everything
//! - `q` / `Esc`: hide the plugin pane
//!
//! # Display Mode Broadcast
//!
//! The host announces display-mode switches through a pipe message named
//! `display_mode` with payload `presentation` or `normal`:
//!
//! ```sh
//! zellij pipe --name display_mode -- presentation
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zalculator::app::DisplayMode;
use zalculator::infrastructure::paths;
use zalculator::storage::{JsonStore, StateBridge};
use zalculator::{handle_event, Action, CalcState, Config, Event, Operator};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's [`CalcState`] with the Zellij-specific concerns: the
/// persistence bridge over the sandboxed JSON store.
struct State {
    /// Core application state from the library layer.
    app: CalcState,

    /// Persistence bridge; `None` when the store could not be opened, in
    /// which case the calculator still works but nothing survives a reload.
    bridge: Option<StateBridge<JsonStore>>,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: zalculator::initialize(&default_config),
            bridge: None,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes tracing, creates the application
    /// state, subscribes to key events, and hydrates persisted state from the
    /// JSON store. A store that cannot be opened degrades to an unpersisted
    /// session rather than failing the load.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zalculator::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        self.app = zalculator::initialize(&config);
        tracing::debug!("app state initialized");

        subscribe(&[EventType::Key]);

        match JsonStore::open(paths::store_file()) {
            Ok(store) => {
                let mut bridge = StateBridge::new(store, config.publish_path.clone());
                match bridge.hydrate() {
                    Ok(snapshot) => {
                        self.app.apply_snapshot(snapshot);
                        self.app.fit_readout();
                        tracing::debug!("persisted state hydrated");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to hydrate persisted state");
                    }
                }
                self.bridge = Some(bridge);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to open state store, running unpersisted");
            }
        }

        tracing::debug!("plugin load complete");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates key events to library events and delegates to
    /// [`handle_event`]. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let zellij_tile::prelude::Event::Key(ref key) = event else {
            return false;
        };

        let span = tracing::debug_span!("plugin_update_event", key = ?key.bare_key);
        let _guard = span.entered();

        match Self::map_key_event(key) {
            Some(our_event) => self.process(our_event),
            None => false,
        }
    }

    /// Handles pipe messages from the host.
    ///
    /// The `display_mode` pipe toggles presentation mode.
    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if pipe_message.name != "display_mode" {
            return false;
        }

        let mode = match pipe_message.payload.as_deref().map(str::trim) {
            Some("presentation") => DisplayMode::Presentation,
            Some("normal") => DisplayMode::Normal,
            other => {
                tracing::debug!(payload = ?other, "ignoring unknown display mode");
                return false;
            }
        };

        self.process(Event::DisplayModeChanged(mode))
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        zalculator::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Maps keyboard events to application events.
    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char(c) if c.is_ascii_digit() => Event::Digit(c as u8 - b'0'),
            BareKey::Char('.') => Event::Point,
            BareKey::Char('+') => Event::Op(Operator::Add),
            BareKey::Char('-') => Event::Op(Operator::Subtract),
            BareKey::Char('*') | BareKey::Char('x') => Event::Op(Operator::Multiply),
            BareKey::Char('/') => Event::Op(Operator::Divide),
            BareKey::Char('=') | BareKey::Enter => Event::Op(Operator::Equals),
            BareKey::Char('n') => Event::Sign,
            BareKey::Char('c') => Event::Clear,
            BareKey::Char('C') => Event::ClearAll,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Runs an event through the handler, executes the resulting actions, and
    /// feeds any store change notifications back as events.
    ///
    /// Our own persists queue change notifications for the subscribed display
    /// key; the handler's value comparison recognizes them as echoes, so the
    /// loop settles after one pass.
    fn process(&mut self, event: Event) -> bool {
        let mut should_render = false;
        let mut queue = vec![event];

        while let Some(event) = queue.pop() {
            match handle_event(&mut self.app, event) {
                Ok((render, actions)) => {
                    should_render |= render;
                    for action in actions {
                        self.execute_action(&action);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                }
            }

            if let Some(bridge) = &mut self.bridge {
                for change in bridge.drain_changes() {
                    queue.push(Event::StoreChanged {
                        path: change.path,
                        value: change.value,
                    });
                }
            }
        }

        should_render
    }

    /// Executes an action returned from event handling.
    ///
    /// - `SyncState`: mirror engine state into the persistence bridge
    /// - `SetFrameHidden`: make the pane non-interactive in presentation mode
    /// - `CloseFocus`: hide the plugin pane
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::SyncState => {
                if let Some(bridge) = &mut self.bridge {
                    if let Err(e) = bridge.persist(&self.app.snapshot()) {
                        tracing::warn!(error = %e, "failed to persist state");
                    }
                }
            }
            Action::SetFrameHidden(hidden) => {
                tracing::debug!(hidden, "toggling frame chrome");
                set_selectable(!hidden);
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
