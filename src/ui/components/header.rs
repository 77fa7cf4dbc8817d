//! Header component: centred title with counter badges below.

use crate::ui::helpers::{center_offset, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title and counter lines starting at `row`.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = center_offset(title_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let counters = counters_line(header);
    let counters_len = counters.chars().count();
    let padding = center_offset(counters_len, cols);

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{counters}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + counters_len)));
    print!("{}", Theme::reset());

    row + 2
}

fn counters_line(header: &HeaderInfo) -> String {
    format!(
        "Total: {}  Favorites: {}  Emergency: {}  All Contacts: {}",
        header.total, header.favorites, header.emergency, header.all_contacts
    )
}
