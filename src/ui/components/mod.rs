//! Composable UI component renderers.
//!
//! Each component renders one part of the interface:
//!
//! - [`readout`]: the display line
//! - [`keypad`]: the button grid with operator emphasis
//! - [`footer`]: keybinding hints
//!
//! Two high-level layouts exist: [`render_framed`] (readout, borders, keypad,
//! footer) and [`render_frameless`] for presentation mode, which drops the
//! chrome and keeps only the readout and keypad.

mod footer;
mod keypad;
mod readout;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use keypad::render_keypad;
use readout::render_readout;

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row position.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the framed layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Readout]
/// [Border]
/// [Keypad rows]
/// [Border]
/// [Footer]
/// ```
pub fn render_framed(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_readout(current_row, &vm.readout, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let _current_row = render_keypad(current_row + 1, &vm.keypad, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Renders the frameless presentation layout: readout and keypad only.
pub fn render_frameless(vm: &UIViewModel, theme: &Theme, cols: usize) {
    let current_row = render_readout(1, &vm.readout, theme, cols);
    render_keypad(current_row + 1, &vm.keypad, theme, cols);
}
