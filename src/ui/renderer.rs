//! Top-level rendering coordinator.
//!
//! The main rendering entry point: computes the view model from application
//! state and delegates to the component renderers, choosing the framed or
//! frameless layout based on the host's display mode.

use crate::app::CalcState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the widget UI to stdout.
///
/// Prints ANSI-styled output using `print!`; does not clear the screen or
/// manage cursor position beyond explicit positioning.
pub fn render(state: &CalcState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel();

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a pre-computed view model.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if vm.frame_hidden {
        components::render_frameless(vm, theme, cols);
    } else {
        components::render_framed(vm, theme, cols, rows);
    }
}
