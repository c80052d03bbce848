//! Mode state types for the application.
//!
//! This module defines the small enums controlling operator emphasis and the
//! host's display mode. Both are presentation-facing state driven by engine
//! transitions and host broadcasts.

/// How the pending operator's key is emphasized.
///
/// The two are distinguished by styling the key's background versus its
/// foreground; the view model carries the distinction through to the keypad
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpEmphasis {
    /// Foreground-only emphasis: the operator is merely highlighted as the
    /// current default. Set when a digit is entered while an operator is
    /// pending.
    Foreground,

    /// Background emphasis: the operator was just committed by an operator
    /// press (or replaced within the replace window).
    Background,
}

/// Host display mode, broadcast by the container.
///
/// In presentation mode the widget hides its frame chrome and shows only the
/// readout and keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Regular windowed display with frame chrome.
    Normal,

    /// Frameless presentation display.
    Presentation,
}
