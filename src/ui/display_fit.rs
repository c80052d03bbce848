//! Readout font-size fitting.
//!
//! The readout keeps a nominal font size that is nudged after every display
//! change so the rendered value stays within a target width band. The fit is
//! iterative: shrink by 10% while the text overflows the band, then grow by
//! 10% while it underfills, with hard size bounds on both loops. Sizes and
//! widths are abstract display units; the terminal renderer only consumes the
//! relative result.

/// Lower edge of the target width band.
pub const MIN_WIDTH: f64 = 180.0;
/// Upper edge of the target width band.
pub const MAX_WIDTH: f64 = 210.0;
/// Smallest font size the shrink loop may pass below once.
pub const MIN_SIZE: f64 = 8.0;
/// Largest font size the grow loop may pass above once.
pub const MAX_SIZE: f64 = 80.0;

/// Approximate advance width of one glyph relative to the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// Adjusts a font size until the measured width lands in the target band.
///
/// `measure` maps a candidate size to the text's rendered width. The loops
/// guard on the size bounds, not the result, so the returned size can land
/// one 10% step beyond `MIN_SIZE` or `MAX_SIZE`.
pub fn fit_size(initial: f64, measure: impl Fn(f64) -> f64) -> f64 {
    let mut size = initial;

    while measure(size) > MAX_WIDTH && size > MIN_SIZE {
        size *= 0.9;
    }

    while measure(size) < MIN_WIDTH && size < MAX_SIZE {
        size *= 1.1;
    }

    size
}

/// Estimates the rendered width of `text` at `size`.
///
/// A flat per-glyph advance is a good enough stand-in for the numeric glyphs
/// the readout shows.
#[must_use]
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_ASPECT
}
