//! Readout component: the calculator's display line.

use crate::ui::helpers::{pad_right_align, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ReadoutView;

/// Renders the readout, right-aligned like a desk calculator.
///
/// Returns the next available row position.
pub fn render_readout(row: usize, readout: &ReadoutView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if let Some(bg) = &theme.colors.readout_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.readout_fg));

    let width = cols.saturating_sub(2).max(1);
    print!(" {}", pad_right_align(&readout.text, width));

    print!("{}", Theme::reset());
    row + 1
}
