//! Footer component: keybinding hints.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer at the given row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));

    let hints: String = footer.keybindings.chars().take(cols).collect();
    print!(" {hints}");

    print!("{}", Theme::reset());
}
