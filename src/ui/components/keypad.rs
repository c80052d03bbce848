//! Keypad component: the button grid with operator emphasis.

use crate::ui::helpers::{pad_center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{KeyStyle, KeyView};

/// Rendered width of one key cell.
const KEY_WIDTH: usize = 5;
/// Spacing between key cells.
const KEY_GAP: usize = 1;

/// Renders the keypad grid starting at `row`.
///
/// Each key is a fixed-width cell; the grid is horizontally centered. The
/// pending operator's cell reflects its emphasis: accent foreground after a
/// digit press, accent background right after an operator commit.
///
/// Returns the next available row position.
pub fn render_keypad(row: usize, keypad: &[Vec<KeyView>], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for keys in keypad {
        let row_width = keys.len() * KEY_WIDTH + keys.len().saturating_sub(1) * KEY_GAP;
        let left = cols.saturating_sub(row_width) / 2 + 1;

        position_cursor(current_row, left);
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                print!("{}", " ".repeat(KEY_GAP));
            }
            render_key(key, theme);
        }

        current_row += 2;
    }

    current_row
}

fn render_key(key: &KeyView, theme: &Theme) {
    let colors = &theme.colors;
    match key.style {
        KeyStyle::Plain => {
            print!("{}{}", Theme::bg(&colors.key_bg), Theme::fg(&colors.key_fg));
        }
        KeyStyle::OperatorNeutral => {
            print!(
                "{}{}",
                Theme::bg(&colors.key_bg),
                Theme::fg(&colors.operator_fg)
            );
        }
        KeyStyle::OperatorPending => {
            print!(
                "{}{}{}",
                Theme::bg(&colors.key_bg),
                Theme::fg(&colors.operator_fg),
                Theme::bold()
            );
        }
        KeyStyle::OperatorCommitted => {
            print!(
                "{}{}{}",
                Theme::bg(&colors.operator_committed_bg),
                Theme::fg(&colors.operator_committed_fg),
                Theme::bold()
            );
        }
    }

    print!("{}{}", pad_center(&key.label, KEY_WIDTH), Theme::reset());
}
