//! Search bar component renderer.
//!
//! A bordered box holding the query. The border uses the accent colour while
//! the query is being typed and the plain border colour once focus moves to
//! the results.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the 3-line search box at `row` and returns the row below it.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, width: usize) -> usize {
    let box_width = width.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.typing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.typing { "▏" } else { "" };
    let search_text = truncate(&format!(" Search: {}{cursor}", search.query), inner_width);
    let padding = inner_width.saturating_sub(search_text.chars().count());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
