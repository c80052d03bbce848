//! The tagged accumulator type and display formatting.
//!
//! The accumulator (`x` in the calculator's data model) holds either a number
//! in progress, the exact text the user has typed so far such as `"12."`, or
//! a finalized numeric value produced by an evaluation. The two states are an
//! explicit tagged enum with defined transitions between them, so the engine
//! never guesses whether a value is text or a number.

/// The display value: a number under construction or a finalized number.
///
/// `Entry` preserves entry text verbatim (string concatenation semantics while
/// typing), including transient forms like `"0."`. `Value` is a committed
/// float, rendered through [`format_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Accumulator {
    /// Digits being typed, kept as text. May be empty mid-transition.
    Entry(String),
    /// A finalized numeric value.
    Value(f64),
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::Value(0.0)
    }
}

impl Accumulator {
    /// Numeric reading of the accumulator.
    ///
    /// Entry text that fails to parse (an empty entry, for instance) reads as
    /// NaN; the display normalization step repairs NaN to `0` before anything
    /// persists.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Entry(text) => text.parse::<f64>().unwrap_or(f64::NAN),
            Self::Value(v) => *v,
        }
    }

    /// The text shown on the readout (and published to the public slot).
    ///
    /// Entries display verbatim; values display through the 10-digit clean
    /// formatting of [`format_value`].
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Entry(text) => text.clone(),
            Self::Value(v) => format_value(*v),
        }
    }

    /// Whether the accumulator reads as exactly zero.
    ///
    /// The transient `"0."` entry reads as zero here; the digit-entry
    /// transition handles its textual special case separately.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value() == 0.0
    }

    /// Whether the numeric reading is NaN or infinite.
    #[must_use]
    pub fn is_non_finite(&self) -> bool {
        !self.value().is_finite()
    }
}

/// Formats a finalized value for display without float representation noise.
///
/// Renders with 10 digits after the decimal point, strips trailing zeros
/// after the point, then strips a bare trailing point. `0.1 + 0.2` therefore
/// formats as `"0.3"` rather than `"0.30000000000000004"`, while up to 10
/// significant fraction digits survive.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }

    let mut text = format!("{value:.10}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }

    // {:.10} keeps the sign of negative zero; the readout should not.
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_strips_float_noise() {
        assert_eq!(format_value(0.1 + 0.2), "0.3");
    }

    #[test]
    fn format_strips_trailing_zeros_and_point() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-3.25), "-3.25");
    }

    #[test]
    fn format_keeps_ten_fraction_digits() {
        assert_eq!(format_value(1.0 / 3.0), "0.3333333333");
    }

    #[test]
    fn format_normalizes_negative_zero() {
        assert_eq!(format_value(-0.0), "0");
    }

    #[test]
    fn format_non_finite_sentinels() {
        assert_eq!(format_value(f64::INFINITY), "Infinity");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn entry_text_displays_verbatim() {
        assert_eq!(Accumulator::Entry("12.".to_string()).display(), "12.");
        assert_eq!(Accumulator::Entry("0.".to_string()).display(), "0.");
    }

    #[test]
    fn entry_parses_as_number() {
        assert_eq!(Accumulator::Entry("12.".to_string()).value(), 12.0);
        assert!(Accumulator::Entry(String::new()).value().is_nan());
    }

    #[test]
    fn zero_detection() {
        assert!(Accumulator::Value(0.0).is_zero());
        assert!(Accumulator::Entry("0.".to_string()).is_zero());
        assert!(!Accumulator::Entry("0.5".to_string()).is_zero());
    }
}
