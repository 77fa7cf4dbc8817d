//! Shared rendering utilities.
//!
//! Cursor positioning, search match highlighting, and width handling used by
//! several components. Widths and ranges are counted in characters, not bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-based `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// A screen rectangle in 1-based terminal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Leftmost column.
    pub x: usize,
    /// Top line.
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    /// Returns `true` if the 1-based `line`/`column` falls inside.
    #[must_use]
    pub const fn contains(&self, line: usize, column: usize) -> bool {
        line >= self.y && line < self.y + self.height && column >= self.x && column < self.x + self.width
    }

    /// Last line inside the rectangle.
    #[must_use]
    pub const fn bottom(&self) -> usize {
        (self.y + self.height).saturating_sub(1)
    }
}

/// Shortens `text` to at most `max_chars` characters, ending in `...` when cut.
///
/// ```rust
/// use zcontacts::ui::helpers::truncate;
///
/// assert_eq!(truncate("Alexandria", 7), "Alex...");
/// assert_eq!(truncate("Ann", 7), "Ann");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Left padding that centres `len` characters in `width`.
#[must_use]
pub const fn center_offset(len: usize, width: usize) -> usize {
    width.saturating_sub(len) / 2
}

/// Builds `text` with the given character ranges in match highlight colours.
///
/// Selected rows are returned unstyled so the selection colours win. Ranges
/// past the end of `text` are clipped; overlapping or reversed ranges are
/// skipped.
#[must_use]
pub fn highlighted(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) -> String {
    if ranges.is_empty() || is_selected {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 32);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Zoë Åberg", 9), "Zoë Åberg");
        assert_eq!(truncate("Zoë Åberg-Lindqvist", 9), "Zoë Åb...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn fit_pads_to_width() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdefgh", 6), "abc...");
    }

    #[test]
    fn rect_bounds_are_inclusive_exclusive() {
        let rect = Rect { x: 3, y: 2, width: 4, height: 2 };
        assert!(rect.contains(2, 3));
        assert!(rect.contains(3, 6));
        assert!(!rect.contains(4, 3));
        assert!(!rect.contains(2, 7));
        assert!(!rect.contains(1, 3));
        assert_eq!(rect.bottom(), 3);
    }

    #[test]
    fn highlight_wraps_only_the_range() {
        let theme = Theme::default();
        let out = highlighted("Alice", &[(1, 3)], &theme, false);

        assert!(out.starts_with('A'));
        assert!(out.contains("li"));
        assert!(out.ends_with("ce"));
        assert_eq!(highlighted("Alice", &[(1, 3)], &theme, true), "Alice");
    }

    #[test]
    fn highlight_clips_out_of_range() {
        let theme = Theme::default();
        let out = highlighted("Al", &[(5, 9)], &theme, false);
        assert_eq!(out, "Al");
    }
}
