//! Binary operator domain model.
//!
//! This module defines the [`Operator`] type for the calculator's two-operand
//! arithmetic pipeline. Operators are identified by the same string ids the
//! widget's buttons carry (`add`, `subtract`, `multiply`, `divide`, `equals`),
//! which is also how they are persisted in the key-value store.

use serde::{Deserialize, Serialize};

/// A pending binary operator.
///
/// `Equals` is an operator like any other as far as the entry state machine is
/// concerned: pressing it evaluates the pending operation and becomes the new
/// pending operator. It differs in two ways: it never receives highlight
/// emphasis, and applying it leaves the right-hand operand unchanged (so a
/// chain ending in `=` simply commits the result).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition (`y + x`).
    Add,
    /// Subtraction (`y - x`).
    Subtract,
    /// Multiplication (`y * x`).
    Multiply,
    /// Division (`y / x`). Division by zero follows IEEE float semantics;
    /// the resulting infinity is repaired to `0` at display time.
    Divide,
    /// Evaluate-and-commit. Applying it returns `x` unchanged.
    Equals,
}

impl Operator {
    /// The button id string for this operator, as used on the UI surface and
    /// in the persisted `state/operation` key.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Equals => "equals",
        }
    }

    /// Parses a button id back into an operator.
    ///
    /// Returns `None` for unknown ids, which callers treat as "no operator"
    /// rather than an error (a malformed stored value degrades to the
    /// fresh-state default).
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            "multiply" => Some(Self::Multiply),
            "divide" => Some(Self::Divide),
            "equals" => Some(Self::Equals),
            _ => None,
        }
    }

    /// Applies the operator to `y` (left, previously committed) and `x`
    /// (right, current accumulator).
    ///
    /// `Equals` returns `x` unchanged. No special-casing of division by
    /// zero: the result may be infinite or NaN and is normalized downstream.
    #[must_use]
    pub fn apply(self, y: f64, x: f64) -> f64 {
        match self {
            Self::Add => y + x,
            Self::Subtract => y - x,
            Self::Multiply => y * x,
            Self::Divide => y / x,
            Self::Equals => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
            Operator::Equals,
        ] {
            assert_eq!(Operator::from_id(op.id()), Some(op));
        }
        assert_eq!(Operator::from_id("modulo"), None);
    }

    #[test]
    fn apply_arithmetic() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(Operator::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(Operator::Multiply.apply(2.0, 3.0), 6.0);
        assert_eq!(Operator::Divide.apply(6.0, 3.0), 2.0);
    }

    #[test]
    fn equals_passes_x_through() {
        assert_eq!(Operator::Equals.apply(2.0, 3.0), 3.0);
    }

    #[test]
    fn divide_by_zero_is_infinite() {
        assert!(Operator::Divide.apply(5.0, 0.0).is_infinite());
    }
}
