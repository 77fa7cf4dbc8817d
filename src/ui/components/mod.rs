//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title and contact counters
//! - [`footer`]: Status line, keybinding hints, copyright
//! - [`search`]: Search input box
//! - [`table`]: Contact list (avatar, name, phone, email, group, flags)
//! - [`empty`]: Empty list message
//! - [`side_panel`]: Favorites and emergency lists
//! - [`modal`]: Add/edit form overlay
//! - [`confirm`]: Delete confirmation overlay
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Title]
//! [Counters]
//! [Border]
//! [Search Bar - 3 lines, search mode only]     [Favorites]
//! [Table Headers]                              [Emergency]
//! [Table Rows]
//! [Border]
//! [Status]
//! [Keybindings]
//! [Copyright]
//! ```
//!
//! Side panels only appear when the terminal is at least
//! [`SIDE_PANEL_MIN_COLS`] wide. Overlays are drawn last, on top.

mod confirm;
mod empty;
mod footer;
mod header;
mod modal;
mod search;
mod side_panel;
mod table;

pub use modal::modal_area;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Avatar, UIViewModel};

use confirm::render_confirm;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use modal::render_modal;
use search::render_search_bar;
use side_panel::render_side_panels;
use table::{render_table_headers, render_table_rows};

/// Narrowest terminal that still gets the side column.
pub const SIDE_PANEL_MIN_COLS: usize = 90;
const SIDE_PANEL_WIDTH: usize = 32;

/// Lines below the list: border, status, keybindings, copyright.
const FOOTER_LINES: usize = 4;

/// Draws a horizontal rule from column 1 and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Three-column avatar badge. Leaves styling reset.
fn avatar_badge(avatar: &Avatar, theme: &Theme) -> String {
    match avatar {
        Avatar::Initial { letter, color } => format!(
            "{}{}{} {letter} {}",
            Theme::bold(),
            Theme::fg(&theme.colors.avatar_fg),
            Theme::bg(color),
            Theme::reset()
        ),
        Avatar::Photo => format!("{} ◉ {}", Theme::fg(&theme.colors.header_fg), Theme::reset()),
        Avatar::Placeholder => format!("{} ? {}", Theme::fg(&theme.colors.text_dim), Theme::reset()),
    }
}

/// Width of the main list area, leaving room for the side column if shown.
const fn main_width(cols: usize) -> usize {
    if cols >= SIDE_PANEL_MIN_COLS {
        cols - SIDE_PANEL_WIDTH
    } else {
        cols
    }
}

/// Renders the whole screen for a view model.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let width = main_width(cols);

    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let body_top = current_row;

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, width);
    }
    current_row = render_table_headers(current_row, theme, width);

    let border_row = rows.saturating_sub(FOOTER_LINES - 1);
    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, width);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, width);
    }

    if width < cols {
        render_side_panels(
            body_top,
            border_row,
            width + 1,
            &vm.favorites,
            &vm.emergency,
            theme,
            SIDE_PANEL_WIDTH,
        );
    }

    let footer_row = render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, rows, cols);
    }
    if let Some(confirm) = &vm.confirm {
        render_confirm(confirm, theme, rows, cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_badge_uses_palette_background() {
        let theme = Theme::default();
        let badge = avatar_badge(
            &Avatar::Initial {
                letter: 'A',
                color: "#ef4444",
            },
            &theme,
        );
        assert!(badge.contains(&Theme::bg("#ef4444")));
        assert!(badge.contains(" A "));
        assert!(badge.ends_with(Theme::reset()));
    }

    #[test]
    fn side_column_needs_wide_terminal() {
        assert_eq!(main_width(80), 80);
        assert_eq!(main_width(89), 89);
        assert_eq!(main_width(120), 88);
    }
}
