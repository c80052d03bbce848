//! Application state and the calculator engine transitions.
//!
//! This module defines [`CalcState`], the single source of truth for the
//! widget, together with the input state machine: digit entry, the two-phase
//! operator pipeline, unary minus, the two clears, display repair, and the
//! readout fit step. All transitions are synchronous and pure with respect to
//! the outside world; persistence and rendering happen around them.
//!
//! # State machine (operator entry)
//!
//! ```text
//! IDLE (no operator pending) --op--> OP_PENDING (replace_op = true)
//! OP_PENDING --digit--> OPERAND_BUILDING (replace_op = false)
//! OPERAND_BUILDING --op--> evaluates, re-enters OP_PENDING
//! OP_PENDING --op (no digit since)--> OP_PENDING (operator replaced, no eval)
//! ```
//!
//! `clear_all` returns to IDLE from anywhere; there is no terminal state.

use crate::app::modes::{DisplayMode, OpEmphasis};
use crate::domain::accumulator::Accumulator;
use crate::domain::operator::Operator;
use crate::storage::bridge::StateSnapshot;
use crate::ui::display_fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, KeyStyle, KeyView, ReadoutView, UIViewModel};

/// Default readout font size before any fitting has happened.
pub const DEFAULT_READOUT_SIZE: f64 = 32.0;

/// A digit-row button press: a digit `0`–`9` or the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitKey {
    /// A digit key, `0..=9`.
    Digit(u8),
    /// The decimal point key.
    Point,
}

/// Central application state container.
///
/// Holds the arithmetic pipeline (`x`, `y`, pending operator, flags) plus the
/// presentation-facing state (emphasis, display mode, readout size, theme).
/// Mutated only by the engine transitions below, in response to one UI event
/// at a time.
#[derive(Debug, Clone)]
pub struct CalcState {
    /// Accumulator: the value currently shown or being typed.
    pub x: Accumulator,

    /// The previously committed operand, left-hand side of the next
    /// evaluation.
    pub y: f64,

    /// Pending operator, applied on the next operator press. `None` until an
    /// operator has been entered in the current chain.
    pub operation: Option<Operator>,

    /// True once an operand has been committed to `y` at least once;
    /// distinguishes first entry from a chained operation.
    pub y_committed: bool,

    /// True immediately after an operator commit: the next digit press starts
    /// a fresh number instead of appending.
    pub fresh_entry: bool,

    /// True immediately after an operator commit: a further operator press
    /// replaces the pending operator instead of evaluating.
    pub replace_op: bool,

    /// How the pending operator's key is currently emphasized.
    pub emphasis: OpEmphasis,

    /// Host display mode; presentation hides the frame chrome.
    pub display_mode: DisplayMode,

    /// Current readout font size, adjusted by the display-fit loop. Not
    /// persisted.
    pub readout_size: f64,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl CalcState {
    /// Creates a fresh state with engine defaults.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            x: Accumulator::Value(0.0),
            y: 0.0,
            operation: None,
            y_committed: false,
            fresh_entry: false,
            replace_op: false,
            emphasis: OpEmphasis::Foreground,
            display_mode: DisplayMode::Normal,
            readout_size: DEFAULT_READOUT_SIZE,
            theme,
        }
    }

    /// Enters a digit or the decimal point.
    ///
    /// Entering a digit always cancels the operator-replace window. When the
    /// fresh-entry flag is set (right after an operator commit) the current
    /// accumulator moves to `y` and a new number starts. The leading zero is
    /// dropped before appending, except for the textual `"0."` form which is
    /// how a decimal fraction starts. A second decimal point in the same
    /// entry is ignored, and a lone `"."` normalizes to `"0."`.
    pub fn enter_digit(&mut self, key: DigitKey) {
        let _span = tracing::debug_span!("enter_digit", key = ?key).entered();

        // A digit press restores foreground-only emphasis on the pending op.
        self.emphasis = OpEmphasis::Foreground;
        self.replace_op = false;

        if self.fresh_entry {
            self.y = self.x.value();
            self.x = Accumulator::Value(0.0);
            self.fresh_entry = false;
        }

        let mut text = if matches!(&self.x, Accumulator::Entry(s) if s == "0.") {
            "0.".to_string()
        } else if self.x.is_zero()
            || matches!(&self.x, Accumulator::Entry(s) if s.is_empty())
        {
            String::new()
        } else {
            self.x.display()
        };

        let digit = match key {
            DigitKey::Point => {
                if text.contains('.') {
                    None
                } else {
                    Some('.')
                }
            }
            DigitKey::Digit(d) => Some(char::from(b'0' + d.min(9))),
        };

        if let Some(d) = digit {
            text.push(d);
        }

        if text == "." {
            text = "0.".to_string();
        }

        tracing::trace!(entry = %text, "entry updated");
        self.x = Accumulator::Entry(text);
    }

    /// Enters an operator (including equals).
    ///
    /// Two-phase behavior. Inside the replace window (an operator was just
    /// committed and no digit typed since) the pending operator is simply
    /// replaced, letting the user correct a mispress without evaluating.
    /// Otherwise the previously pending operator is applied to `y` and `x`
    /// (when an operand chain is in progress), the result is committed to
    /// both, and the newly pressed operator becomes pending for the next
    /// evaluation.
    ///
    /// `Equals` participates identically except that applying it leaves `x`
    /// unchanged (so `=` commits the chain's result) and it stays pending
    /// afterwards; a second consecutive `=` lands in the replace window and
    /// performs no arithmetic.
    pub fn enter_op(&mut self, op: Operator) {
        let _span = tracing::debug_span!("enter_op", op = op.id()).entered();

        if self.replace_op {
            tracing::debug!(op = op.id(), "replacing pending operator");
            self.operation = Some(op);
            self.emphasis = OpEmphasis::Background;
            return;
        }

        self.replace_op = true;

        let x = self.x.value();
        let result = if self.y_committed {
            match self.operation {
                Some(pending) => pending.apply(self.y, x),
                None => x,
            }
        } else {
            x
        };

        tracing::debug!(
            y = self.y,
            x = x,
            result = result,
            previous = ?self.operation,
            "evaluated pending operation"
        );

        self.y = result;
        self.y_committed = true;
        self.operation = Some(op);
        self.emphasis = OpEmphasis::Background;
        self.fresh_entry = true;
        self.x = Accumulator::Value(result);
    }

    /// Negates the accumulator. No-op when it reads as zero.
    ///
    /// Negation finalizes an entry in progress into a value.
    pub fn unary_minus(&mut self) -> bool {
        if self.x.is_zero() {
            return false;
        }
        self.x = Accumulator::Value(-self.x.value());
        true
    }

    /// Clears the accumulator and the pending operator.
    ///
    /// `y` and the flags are untouched; a chain in progress can continue with
    /// a re-entered operand.
    pub fn clear(&mut self) {
        tracing::debug!("clear");
        self.x = Accumulator::Value(0.0);
        self.operation = None;
    }

    /// Resets everything to the documented defaults.
    pub fn clear_all(&mut self) {
        tracing::debug!("clear all");
        self.x = Accumulator::Value(0.0);
        self.y = 0.0;
        self.operation = None;
        self.y_committed = false;
        self.fresh_entry = false;
        self.replace_op = false;
        self.emphasis = OpEmphasis::Foreground;
    }

    /// Resets a non-finite display value to `0`.
    ///
    /// Division by zero and malformed entries surface as infinity/NaN; the
    /// display never shows them. Returns whether a repair happened.
    pub fn repair_display(&mut self) -> bool {
        if self.x.is_non_finite() {
            tracing::debug!(sentinel = %self.x.display(), "resetting non-finite display value");
            self.x = Accumulator::Value(0.0);
            true
        } else {
            false
        }
    }

    /// Adjusts the readout font size so the rendered text width stays within
    /// the fit band.
    pub fn fit_readout(&mut self) {
        let text = self.x.display();
        self.readout_size =
            display_fit::fit_size(self.readout_size, |size| display_fit::text_width(&text, size));
    }

    /// Captures the persistable arithmetic fields.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            x: self.x.clone(),
            y: self.y,
            operation: self.operation,
            y_committed: self.y_committed,
            fresh_entry: self.fresh_entry,
            replace_op: self.replace_op,
        }
    }

    /// Restores the arithmetic fields from a persisted snapshot.
    pub fn apply_snapshot(&mut self, snapshot: StateSnapshot) {
        self.x = snapshot.x;
        self.y = snapshot.y;
        self.operation = snapshot.operation;
        self.y_committed = snapshot.y_committed;
        self.fresh_entry = snapshot.fresh_entry;
        self.replace_op = snapshot.replace_op;
    }

    /// Computes the renderable view model from current state.
    ///
    /// Pre-computes the readout text and size, the keypad grid with operator
    /// emphasis styles, and the footer hints.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        UIViewModel {
            readout: ReadoutView {
                text: self.x.display(),
                size: self.readout_size,
            },
            keypad: self.compute_keypad(),
            footer: FooterInfo {
                keybindings:
                    "0-9 .: digits  + - * / =: operate  n: negate  c: clear  C: clear all  q: quit"
                        .to_string(),
            },
            frame_hidden: self.display_mode == DisplayMode::Presentation,
        }
    }

    /// Builds the keypad grid with per-key styles.
    ///
    /// The pending operator's key carries the current emphasis; `equals` is
    /// never emphasized as a pending operator.
    fn compute_keypad(&self) -> Vec<Vec<KeyView>> {
        let rows: [&[(&str, Key)]; 5] = [
            &[
                ("C", Key::Plain),
                ("AC", Key::Plain),
                ("±", Key::Plain),
                ("÷", Key::Op(Operator::Divide)),
            ],
            &[
                ("7", Key::Plain),
                ("8", Key::Plain),
                ("9", Key::Plain),
                ("×", Key::Op(Operator::Multiply)),
            ],
            &[
                ("4", Key::Plain),
                ("5", Key::Plain),
                ("6", Key::Plain),
                ("−", Key::Op(Operator::Subtract)),
            ],
            &[
                ("1", Key::Plain),
                ("2", Key::Plain),
                ("3", Key::Plain),
                ("+", Key::Op(Operator::Add)),
            ],
            &[
                ("0", Key::Plain),
                (".", Key::Plain),
                ("=", Key::Op(Operator::Equals)),
            ],
        ];

        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|&(label, kind)| KeyView {
                        label: label.to_string(),
                        style: self.key_style(kind),
                    })
                    .collect()
            })
            .collect()
    }

    fn key_style(&self, kind: Key) -> KeyStyle {
        match kind {
            Key::Plain => KeyStyle::Plain,
            Key::Op(op) => {
                if op != Operator::Equals && self.operation == Some(op) {
                    match self.emphasis {
                        OpEmphasis::Background => KeyStyle::OperatorCommitted,
                        OpEmphasis::Foreground => KeyStyle::OperatorPending,
                    }
                } else {
                    KeyStyle::OperatorNeutral
                }
            }
        }
    }

    /// Convenience accessor for the formatted display text.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.x.display()
    }
}

/// Internal keypad key kind used when computing styles.
#[derive(Debug, Clone, Copy)]
enum Key {
    Plain,
    Op(Operator),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CalcState {
        CalcState::new(Theme::default())
    }

    fn press_digits(state: &mut CalcState, digits: &[u8]) {
        for &d in digits {
            state.enter_digit(DigitKey::Digit(d));
        }
    }

    #[test]
    fn digit_entry_has_no_leading_zero() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(5));
        assert_eq!(s.x, Accumulator::Entry("5".to_string()));
    }

    #[test]
    fn at_most_one_decimal_point() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(1));
        s.enter_digit(DigitKey::Point);
        s.enter_digit(DigitKey::Digit(5));
        s.enter_digit(DigitKey::Point);
        s.enter_digit(DigitKey::Digit(2));
        assert_eq!(s.x, Accumulator::Entry("1.52".to_string()));
    }

    #[test]
    fn lone_point_becomes_zero_point() {
        let mut s = state();
        s.enter_digit(DigitKey::Point);
        assert_eq!(s.x, Accumulator::Entry("0.".to_string()));

        s.enter_digit(DigitKey::Digit(5));
        assert_eq!(s.x, Accumulator::Entry("0.5".to_string()));
    }

    #[test]
    fn digit_after_operator_starts_fresh_operand() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Add);
        assert!(s.fresh_entry);

        s.enter_digit(DigitKey::Digit(3));
        assert_eq!(s.x, Accumulator::Entry("3".to_string()));
        assert_eq!(s.y, 2.0);
        assert!(!s.fresh_entry);
    }

    #[test]
    fn operator_replacement_is_evaluation_free() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Add);
        let (x, y) = (s.x.clone(), s.y);

        s.enter_op(Operator::Subtract);
        assert_eq!(s.operation, Some(Operator::Subtract));
        assert_eq!(s.x, x);
        assert_eq!(s.y, y);
    }

    #[test]
    fn chained_evaluation() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Add);
        assert_eq!(s.y, 2.0);
        assert_eq!(s.operation, Some(Operator::Add));

        s.enter_digit(DigitKey::Digit(3));
        s.enter_op(Operator::Add);
        assert_eq!(s.x, Accumulator::Value(5.0));
        assert_eq!(s.y, 5.0);
        assert_eq!(s.operation, Some(Operator::Add));
    }

    #[test]
    fn equals_commits_the_result() {
        let mut s = state();
        press_digits(&mut s, &[1, 2]);
        s.enter_op(Operator::Multiply);
        s.enter_digit(DigitKey::Digit(3));
        s.enter_op(Operator::Equals);

        assert_eq!(s.x, Accumulator::Value(36.0));
        assert_eq!(s.operation, Some(Operator::Equals));
    }

    #[test]
    fn second_equals_performs_no_arithmetic() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Add);
        s.enter_digit(DigitKey::Digit(3));
        s.enter_op(Operator::Equals);
        assert_eq!(s.x, Accumulator::Value(5.0));

        s.enter_op(Operator::Equals);
        assert_eq!(s.x, Accumulator::Value(5.0));
        assert_eq!(s.y, 5.0);
    }

    #[test]
    fn operator_after_equals_result_chains_from_it() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Add);
        s.enter_digit(DigitKey::Digit(3));
        s.enter_op(Operator::Equals);

        // Typing a digit leaves the equals result committed in y; the next
        // operator press applies the pending Equals, which keeps x as typed.
        s.enter_digit(DigitKey::Digit(4));
        s.enter_op(Operator::Add);
        assert_eq!(s.x, Accumulator::Value(4.0));
        assert_eq!(s.y, 4.0);
        assert_eq!(s.operation, Some(Operator::Add));
    }

    #[test]
    fn float_noise_is_cleaned() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(0));
        s.enter_digit(DigitKey::Point);
        s.enter_digit(DigitKey::Digit(1));
        s.enter_op(Operator::Add);
        s.enter_digit(DigitKey::Digit(0));
        s.enter_digit(DigitKey::Point);
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Equals);

        assert_eq!(s.display_text(), "0.3");
    }

    #[test]
    fn unary_minus_on_zero_is_noop() {
        let mut s = state();
        assert!(!s.unary_minus());
        assert_eq!(s.x, Accumulator::Value(0.0));

        s.enter_digit(DigitKey::Point);
        assert!(!s.unary_minus());
        assert_eq!(s.x, Accumulator::Entry("0.".to_string()));
    }

    #[test]
    fn unary_minus_negates_and_finalizes() {
        let mut s = state();
        press_digits(&mut s, &[1, 2]);
        assert!(s.unary_minus());
        assert_eq!(s.x, Accumulator::Value(-12.0));
        assert_eq!(s.display_text(), "-12");
    }

    #[test]
    fn clear_keeps_the_chain() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Add);
        s.enter_digit(DigitKey::Digit(9));
        s.clear();

        assert_eq!(s.x, Accumulator::Value(0.0));
        assert_eq!(s.operation, None);
        assert_eq!(s.y, 2.0);
        assert!(s.y_committed);
    }

    #[test]
    fn clear_all_resets_to_defaults_mid_chain() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(7));
        s.enter_op(Operator::Multiply);
        s.enter_digit(DigitKey::Digit(3));
        s.clear_all();

        assert_eq!(s.x, Accumulator::Value(0.0));
        assert_eq!(s.y, 0.0);
        assert_eq!(s.operation, None);
        assert!(!s.y_committed);
        assert!(!s.fresh_entry);
        assert!(!s.replace_op);
    }

    #[test]
    fn divide_by_zero_repairs_to_zero() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(5));
        s.enter_op(Operator::Divide);
        s.enter_digit(DigitKey::Digit(0));
        s.enter_op(Operator::Equals);

        assert!(s.x.is_non_finite());
        assert!(s.repair_display());
        assert_eq!(s.x, Accumulator::Value(0.0));
        assert_eq!(s.display_text(), "0");
    }

    #[test]
    fn pending_operator_emphasis_tracks_presses() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Add);
        assert_eq!(s.emphasis, OpEmphasis::Background);

        s.enter_digit(DigitKey::Digit(3));
        assert_eq!(s.emphasis, OpEmphasis::Foreground);
    }

    #[test]
    fn equals_key_is_never_emphasized() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Equals);

        let vm = s.compute_viewmodel();
        let equals_key = vm
            .keypad
            .iter()
            .flatten()
            .find(|k| k.label == "=")
            .unwrap()
            .clone();
        assert_eq!(equals_key.style, KeyStyle::OperatorNeutral);
    }

    #[test]
    fn committed_operator_key_gets_background_emphasis() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(2));
        s.enter_op(Operator::Add);

        let vm = s.compute_viewmodel();
        let add_key = vm
            .keypad
            .iter()
            .flatten()
            .find(|k| k.label == "+")
            .unwrap()
            .clone();
        assert_eq!(add_key.style, KeyStyle::OperatorCommitted);

        s.enter_digit(DigitKey::Digit(3));
        let vm = s.compute_viewmodel();
        let add_key = vm
            .keypad
            .iter()
            .flatten()
            .find(|k| k.label == "+")
            .unwrap()
            .clone();
        assert_eq!(add_key.style, KeyStyle::OperatorPending);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut s = state();
        s.enter_digit(DigitKey::Digit(8));
        s.enter_op(Operator::Subtract);
        let snapshot = s.snapshot();

        let mut restored = state();
        restored.apply_snapshot(snapshot.clone());
        assert_eq!(restored.snapshot(), snapshot);
    }
}
