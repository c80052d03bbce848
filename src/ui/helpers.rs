//! Shared rendering utilities and helpers.
//!
//! Low-level utilities used across the UI components: cursor positioning and
//! width-aware padding. Padding operates on character counts, not bytes, so
//! multi-byte labels like `÷` align correctly.

/// Positions the cursor at a specific row and column.
///
/// Uses the ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are
/// 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Centers `text` within `width` characters, padding with spaces.
///
/// Text wider than `width` is returned unchanged.
#[must_use]
pub fn pad_center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Right-aligns `text` within `width` characters.
///
/// Text wider than `width` is truncated from the left, keeping the least
/// significant digits visible.
#[must_use]
pub fn pad_right_align(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() >= width {
        return chars[chars.len() - width..].iter().collect();
    }
    format!("{}{}", " ".repeat(width - chars.len()), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_with_uneven_padding() {
        assert_eq!(pad_center("AC", 5), " AC  ");
        assert_eq!(pad_center("7", 5), "  7  ");
    }

    #[test]
    fn centering_counts_characters_not_bytes() {
        assert_eq!(pad_center("÷", 5), "  ÷  ");
    }

    #[test]
    fn right_align_truncates_from_the_left() {
        assert_eq!(pad_right_align("42", 6), "    42");
        assert_eq!(pad_right_align("123456789", 6), "456789");
    }
}
