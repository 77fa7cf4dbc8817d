//! Footer component: status line, centred keybinding hints, copyright.

use crate::ui::helpers::{center_offset, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the three footer lines starting at `row`.
///
/// Text wider than the terminal is truncated. An absent status still clears
/// its line so a stale message does not linger.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let status = footer.status.as_deref().map(|s| truncate(s, cols.saturating_sub(1))).unwrap_or_default();
    print!("{}", Theme::fg(&theme.colors.status_fg));
    print!(" {status}");
    print!("{}", " ".repeat(cols.saturating_sub(status.chars().count() + 1)));
    print!("{}", Theme::reset());

    centered_dim(row + 1, &footer.keybindings, theme, cols);
    centered_dim(row + 2, &footer.copyright, theme, cols);

    row + 3
}

fn centered_dim(row: usize, text: &str, theme: &Theme, cols: usize) {
    let text = truncate(text, cols);
    let text_len = text.chars().count();
    let padding = center_offset(text_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
}
