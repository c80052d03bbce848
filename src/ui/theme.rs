//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the widget, supporting both
//! built-in themes and custom themes loaded from TOML files, plus utilities
//! for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `slate`: Dark keypad with a green operator accent (default)
//! - `paper`: Light theme for bright terminals
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! readout_fg = "#dfdfdf"
//! key_fg = "#dfdfdf"
//! key_bg = "#3c3c3c"
//! operator_fg = "#8ea318"
//! operator_committed_fg = "#1e1e1e"
//! operator_committed_bg = "#8ea318"
//! border = "#5a5a5a"
//! text_dim = "#8a8a8a"
//! ```

use crate::domain::error::{Result, ZalcError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g., "#dfdfdf"). Optional fields default to
/// `None`, letting themes opt out of certain styling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Readout text color.
    pub readout_fg: String,
    /// Optional readout background color.
    #[serde(default)]
    pub readout_bg: Option<String>,

    /// Plain key label color.
    pub key_fg: String,
    /// Plain key background color.
    pub key_bg: String,

    /// Operator key accent color; also the foreground emphasis for the
    /// pending operator.
    pub operator_fg: String,
    /// Foreground for an operator key with background emphasis.
    pub operator_committed_fg: String,
    /// Background for an operator key with background emphasis.
    pub operator_committed_bg: String,

    /// Border and separator line color.
    pub border: String,

    /// Dimmed text color (footer hints).
    pub text_dim: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `slate`, `paper`. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "slate" => include_str!("../../themes/slate.toml"),
            "paper" => include_str!("../../themes/paper.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content does
    /// not parse into a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ZalcError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ZalcError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple.
    ///
    /// Strips a `#` prefix if present. Returns white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (`slate`).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("slate").expect("built-in slate theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::from_name("slate").unwrap().name, "slate");
        assert_eq!(Theme::from_name("paper").unwrap().name, "paper");
        assert!(Theme::from_name("neon").is_none());
    }

    #[test]
    fn hex_colors_become_escape_sequences() {
        assert_eq!(Theme::fg("#ff0000"), "\u{001b}[38;2;255;0;0m");
        assert_eq!(Theme::bg("00ff00"), "\u{001b}[48;2;0;255;0m");
        // Malformed input falls back to white.
        assert_eq!(Theme::fg("#zzz"), "\u{001b}[38;2;255;255;255m");
    }
}
