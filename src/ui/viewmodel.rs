//! View model types representing renderable UI state.
//!
//! Immutable view models computed from application state, following the MVVM
//! pattern: created via `CalcState::compute_viewmodel()` and consumed by the
//! renderer. They contain no business logic, only display-ready data.

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Readout display information.
    pub readout: ReadoutView,

    /// Keypad grid, outer vec is rows top to bottom.
    pub keypad: Vec<Vec<KeyView>>,

    /// Footer information (keybinding hints).
    pub footer: FooterInfo,

    /// Whether frame chrome (borders, footer) is suppressed.
    pub frame_hidden: bool,
}

/// Readout display information.
#[derive(Debug, Clone)]
pub struct ReadoutView {
    /// Formatted display text.
    pub text: String,

    /// Nominal font size from the fit loop.
    pub size: f64,
}

/// Display information for a single keypad key.
#[derive(Debug, Clone)]
pub struct KeyView {
    /// Key label (e.g., "7", "÷", "AC").
    pub label: String,

    /// Styling class for the key.
    pub style: KeyStyle,
}

/// Styling classes for keypad keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Digit and control keys.
    Plain,

    /// Operator key with no pending emphasis.
    OperatorNeutral,

    /// Pending operator, foreground emphasis (a digit has been typed since
    /// the commit).
    OperatorPending,

    /// Pending operator, background emphasis (just committed or replaced).
    OperatorCommitted,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
