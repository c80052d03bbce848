//! Side-effect actions produced by the event handler.
//!
//! The handler stays pure: it mutates [`CalcState`](crate::app::state::CalcState)
//! and returns a list of actions describing the host-facing side effects the
//! shim must perform. This keeps every effect testable without a host.

/// Host-facing side effects requested by an event transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Mirror the current engine state into the persistence bridge before the
    /// update returns.
    SyncState,

    /// Show or hide the widget frame chrome (presentation mode).
    SetFrameHidden(bool),

    /// Hide the plugin pane and release focus.
    CloseFocus,
}
