//! Event handling: dispatches UI and host events to engine transitions.
//!
//! The single entry point is [`handle_event`]. It mutates the state, runs the
//! display repair and readout fit that follow every display change, and
//! returns whether a re-render is needed together with the side-effect actions
//! the shim must perform.

use crate::app::actions::Action;
use crate::app::modes::DisplayMode;
use crate::app::state::{CalcState, DigitKey};
use crate::domain::accumulator::Accumulator;
use crate::domain::error::Result;
use crate::domain::operator::Operator;
use crate::storage::bridge::KEY_X;
use crate::storage::value::StoredValue;

/// All events the widget reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A digit key, `0..=9`.
    Digit(u8),
    /// The decimal point key.
    Point,
    /// An operator key (including equals).
    Op(Operator),
    /// The unary minus key.
    Sign,
    /// Clear the display and pending operator.
    Clear,
    /// Reset everything.
    ClearAll,
    /// A subscribed store key was changed externally.
    StoreChanged {
        /// Key that changed.
        path: String,
        /// New stored value.
        value: StoredValue,
    },
    /// The host switched display modes.
    DisplayModeChanged(DisplayMode),
    /// The user asked to dismiss the widget.
    CloseFocus,
}

/// Handles an event against the current state.
///
/// Returns `(should_render, actions)`: whether the UI needs a repaint, plus
/// the side effects to perform. Every engine mutation yields
/// [`Action::SyncState`] so the persistence contract (state mirrored before
/// the update returns) holds.
///
/// # Errors
///
/// Event handling itself is infallible today; the `Result` return keeps the
/// dispatch seam uniform for transitions that will need it.
pub fn handle_event(state: &mut CalcState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event = ?event).entered();

    match event {
        Event::Digit(d) => Ok(mutate(state, |s| {
            s.enter_digit(DigitKey::Digit(d));
            true
        })),
        Event::Point => Ok(mutate(state, |s| {
            s.enter_digit(DigitKey::Point);
            true
        })),
        Event::Op(op) => Ok(mutate(state, |s| {
            s.enter_op(op);
            true
        })),
        Event::Sign => Ok(mutate(state, CalcState::unary_minus)),
        Event::Clear => Ok(mutate(state, |s| {
            s.clear();
            true
        })),
        Event::ClearAll => Ok(mutate(state, |s| {
            s.clear_all();
            true
        })),
        Event::StoreChanged { path, value } => Ok(handle_store_change(state, &path, value)),
        Event::DisplayModeChanged(mode) => {
            if state.display_mode == mode {
                return Ok((false, Vec::new()));
            }
            state.display_mode = mode;
            let hidden = mode == DisplayMode::Presentation;
            tracing::debug!(hidden, "display mode changed");
            Ok((true, vec![Action::SetFrameHidden(hidden)]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

/// Runs an engine transition, then the repair and fit steps that follow every
/// display change.
fn mutate(state: &mut CalcState, transition: impl FnOnce(&mut CalcState) -> bool) -> (bool, Vec<Action>) {
    if !transition(state) {
        return (false, Vec::new());
    }
    state.repair_display();
    state.fit_readout();
    (true, vec![Action::SyncState])
}

/// Adopts an external change to the display value.
///
/// Only the accumulator key is subscribed. The value is adopted only when it
/// differs from the current accumulator; an echo of our own write (or an
/// identical concurrent write) must not loop back into another persist cycle.
fn handle_store_change(state: &mut CalcState, path: &str, value: StoredValue) -> (bool, Vec<Action>) {
    if path != KEY_X {
        tracing::trace!(path = %path, "ignoring change on unsubscribed key");
        return (false, Vec::new());
    }

    let incoming = match value {
        StoredValue::Str(text) => Accumulator::Entry(text),
        StoredValue::Num(n) => Accumulator::Value(n),
        other => {
            tracing::debug!(value = ?other, "ignoring non-displayable external value");
            return (false, Vec::new());
        }
    };

    if incoming == state.x {
        return (false, Vec::new());
    }

    tracing::debug!(value = %incoming.display(), "adopting external display value");
    mutate(state, |s| {
        s.x = incoming;
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    fn state() -> CalcState {
        CalcState::new(Theme::default())
    }

    #[test]
    fn digit_event_requests_state_sync() {
        let mut s = state();
        let (render, actions) = handle_event(&mut s, Event::Digit(7)).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::SyncState]);
        assert_eq!(s.display_text(), "7");
    }

    #[test]
    fn sign_on_zero_is_a_full_noop() {
        let mut s = state();
        let (render, actions) = handle_event(&mut s, Event::Sign).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn divide_by_zero_never_reaches_the_display() {
        let mut s = state();
        handle_event(&mut s, Event::Digit(5)).unwrap();
        handle_event(&mut s, Event::Op(Operator::Divide)).unwrap();
        handle_event(&mut s, Event::Digit(0)).unwrap();
        handle_event(&mut s, Event::Op(Operator::Equals)).unwrap();

        assert_eq!(s.display_text(), "0");
    }

    #[test]
    fn display_mode_toggle_hides_the_frame() {
        let mut s = state();
        let (render, actions) =
            handle_event(&mut s, Event::DisplayModeChanged(DisplayMode::Presentation)).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::SetFrameHidden(true)]);

        // Repeating the same mode is a no-op.
        let (render, actions) =
            handle_event(&mut s, Event::DisplayModeChanged(DisplayMode::Presentation)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn external_display_change_is_adopted() {
        let mut s = state();
        let (render, actions) = handle_event(
            &mut s,
            Event::StoreChanged {
                path: KEY_X.to_string(),
                value: StoredValue::Num(42.0),
            },
        )
        .unwrap();

        assert!(render);
        assert_eq!(actions, vec![Action::SyncState]);
        assert_eq!(s.display_text(), "42");
    }

    #[test]
    fn echo_of_current_value_is_ignored() {
        let mut s = state();
        handle_event(&mut s, Event::Digit(4)).unwrap();

        let (render, actions) = handle_event(
            &mut s,
            Event::StoreChanged {
                path: KEY_X.to_string(),
                value: StoredValue::Str("4".to_string()),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn external_non_finite_value_is_repaired() {
        let mut s = state();
        handle_event(
            &mut s,
            Event::StoreChanged {
                path: KEY_X.to_string(),
                value: StoredValue::Num(f64::NAN),
            },
        )
        .unwrap();
        assert_eq!(s.display_text(), "0");
    }

    #[test]
    fn close_focus_requests_hide_without_render() {
        let mut s = state();
        let (render, actions) = handle_event(&mut s, Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
