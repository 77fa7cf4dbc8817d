//! Favorites and emergency side column.

use super::avatar_badge;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SidePanel;

const SIDE_NAME_COL: usize = 12;

/// Renders both panels in rows `top..bottom`, starting at column `col`.
///
/// A vertical separator runs down the first column. Lines that do not fit
/// above `bottom` are dropped.
pub fn render_side_panels(
    top: usize,
    bottom: usize,
    col: usize,
    favorites: &SidePanel,
    emergency: &SidePanel,
    theme: &Theme,
    width: usize,
) {
    let content_width = width.saturating_sub(1);

    let mut lines = panel_lines(favorites, &theme.colors.favorite_fg, theme, content_width);
    lines.push(String::new());
    lines.extend(panel_lines(emergency, &theme.colors.emergency_fg, theme, content_width));

    for (offset, row) in (top..bottom).enumerate() {
        position_cursor(row, col);
        print!("{}│{}", Theme::fg(&theme.colors.border), Theme::reset());
        match lines.get(offset) {
            Some(line) => print!("{line}"),
            None => print!("{}", " ".repeat(content_width)),
        }
        print!("{}", Theme::reset());
    }
}

fn panel_lines(panel: &SidePanel, title_color: &str, theme: &Theme, width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(panel.items.len() + 1);
    lines.push(format!(
        "{}{} {}",
        Theme::bold(),
        Theme::fg(title_color),
        fit(&panel.title, width.saturating_sub(1))
    ));

    if panel.items.is_empty() {
        lines.push(format!(
            "{}{}  {}",
            Theme::dim(),
            Theme::fg(&theme.colors.text_dim),
            fit(&panel.empty_message, width.saturating_sub(2))
        ));
        return lines;
    }

    let phone_width = width.saturating_sub(SIDE_NAME_COL + 6);
    for item in &panel.items {
        lines.push(format!(
            " {}{} {} {}",
            avatar_badge(&item.avatar, theme),
            Theme::fg(&theme.colors.text_normal),
            fit(&item.name, SIDE_NAME_COL),
            fit(&item.phone, phone_width),
        ));
    }
    lines
}
