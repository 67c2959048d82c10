//! Shared rendering utilities.
//!
//! Text helpers measure in `char`s, not bytes, so labels containing category
//! icons and star glyphs are cut on character boundaries.

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are 1-indexed.
///
/// # Example
///
/// ```rust
/// use atlasphere::ui::helpers::position_cursor;
///
/// position_cursor(5, 1); // Move to start of row 5
/// print!("Content at row 5");
/// ```
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Width of `text` in characters.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters, ending in `…` when cut.
///
/// # Example
///
/// ```rust
/// use atlasphere::ui::helpers::truncate;
///
/// assert_eq!(truncate("Brooklyn Bridge", 9), "Brooklyn…");
/// assert_eq!(truncate("SoHo", 9), "SoHo");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates `text` to `width` and pads it with spaces to exactly `width`.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let padding = width.saturating_sub(text_width(&cut));
    format!("{cut}{}", " ".repeat(padding))
}

/// Left and right padding that centers `text_len` characters in `width`.
///
/// Odd remainders go to the right.
#[must_use]
pub const fn centered_padding(text_len: usize, width: usize) -> (usize, usize) {
    let left = width.saturating_sub(text_len) / 2;
    let right = width.saturating_sub(left + text_len);
    (left, right)
}

/// Greedy word wrap into lines of at most `width` characters.
///
/// Words longer than `width` are truncated onto their own line.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            text_width(word)
        } else {
            text_width(&line) + 1 + text_width(word)
        };

        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);

        if text_width(&line) > width {
            lines.push(truncate(&line, width));
            line.clear();
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap("Iconic suspension bridge with stunning views", 16),
            vec!["Iconic", "suspension", "bridge with", "stunning views"]
        );
    }

    #[test]
    fn test_wrap_truncates_long_words() {
        assert_eq!(wrap("Supercalifragilistic", 6), vec!["Super…"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("⭐⭐⭐⭐", 3), "⭐⭐…");
        assert_eq!(truncate("⭐⭐⭐", 3), "⭐⭐⭐");
    }

    #[test]
    fn test_truncate_to_zero_is_empty() {
        assert_eq!(truncate("Central Park", 0), "");
    }

    #[test]
    fn test_fit_pads_and_cuts() {
        assert_eq!(fit("Met", 5), "Met  ");
        assert_eq!(fit("High Line", 5), "High…");
    }

    #[test]
    fn test_centered_padding() {
        assert_eq!(centered_padding(4, 10), (3, 3));
        assert_eq!(centered_padding(5, 10), (2, 3));
        assert_eq!(centered_padding(12, 10), (0, 0));
    }
}
