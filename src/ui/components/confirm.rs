//! Delete confirmation overlay.

use super::modal::{centered, render_box};
use crate::ui::helpers::{center_offset, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ConfirmInfo;

const CONFIRM_WIDTH: usize = 50;
const CONFIRM_HEIGHT: usize = 5;

pub fn render_confirm(confirm: &ConfirmInfo, theme: &Theme, rows: usize, cols: usize) {
    let area = centered(
        rows,
        cols,
        CONFIRM_WIDTH.min(cols.saturating_sub(4)),
        CONFIRM_HEIGHT.min(rows),
    );
    let inner = area.width.saturating_sub(2);

    let lines = [
        centered_line(&confirm.message, &Theme::fg(&theme.colors.text_normal), inner),
        " ".repeat(inner),
        centered_line(&confirm.hint, &Theme::fg(&theme.colors.text_dim), inner),
    ];
    render_box(area, "Delete Contact", &lines, theme);
}

fn centered_line(text: &str, style: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    let left = center_offset(len, width);
    format!(
        "{style}{}{text}{}{}",
        " ".repeat(left),
        " ".repeat(width - left - len),
        Theme::reset()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_message_is_truncated_to_box() {
        let line = centered_line(&"x".repeat(80), "", 10);
        assert!(line.starts_with("xxxxxxx..."));
    }

    #[test]
    fn short_message_is_centred() {
        let line = centered_line("ab", "", 6);
        assert!(line.starts_with("  ab  "));
    }
}
