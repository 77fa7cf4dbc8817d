//! Table component renderer.
//!
//! Renders the contact list as columns: avatar, NAME, PHONE, EMAIL, GROUP and
//! the favorite/emergency markers. EMAIL is dropped on narrow terminals.

use super::avatar_badge;
use crate::ui::helpers::{fit, highlighted, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const AVATAR_COL: usize = 5;
const NAME_COL: usize = 25;
const PHONE_COL: usize = 17;
const GROUP_COL: usize = 10;
const FLAGS_COL: usize = 3;
const MIN_EMAIL_COL: usize = 8;

/// Column widths for a list `width` columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    email: usize,
}

impl Columns {
    const fn for_width(width: usize) -> Self {
        let fixed = AVATAR_COL + NAME_COL + PHONE_COL + GROUP_COL + FLAGS_COL;
        let email = width.saturating_sub(fixed);
        Self {
            email: if email < MIN_EMAIL_COL { 0 } else { email },
        }
    }

    const fn used(self) -> usize {
        AVATAR_COL + NAME_COL + PHONE_COL + self.email + GROUP_COL + FLAGS_COL
    }
}

pub fn render_table_headers(row: usize, theme: &Theme, width: usize) -> usize {
    let columns = Columns::for_width(width);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(AVATAR_COL));
    print!("{}", fit("NAME", NAME_COL));
    print!("{}", fit("PHONE", PHONE_COL));
    if columns.email > 0 {
        print!("{}", fit("EMAIL", columns.email));
    }
    print!("{}", fit("GROUP", GROUP_COL));
    print!("{}", " ".repeat(FLAGS_COL + width.saturating_sub(columns.used())));
    print!("{}", Theme::reset());
    row + 1
}

pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, width: usize) {
    let columns = Columns::for_width(width);
    for (offset, item) in items.iter().enumerate() {
        render_table_row(row + offset, item, theme, width, columns);
    }
}

fn row_style(item: &DisplayItem, theme: &Theme) -> String {
    if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, width: usize, columns: Columns) {
    let style = row_style(item, theme);
    position_cursor(row, 1);

    print!("{style} ");
    print!("{}", avatar_badge(&item.avatar, theme));
    print!("{style} ");

    let name_len = item.name.chars().count();
    print!(
        "{}",
        highlighted(&item.name, &item.highlight_ranges, theme, item.is_selected)
    );
    print!("{style}");
    print!("{}", " ".repeat(NAME_COL.saturating_sub(name_len)));

    print!("{}", fit(&item.phone, PHONE_COL));
    if columns.email > 0 {
        print!("{}", fit(&item.email, columns.email));
    }
    print!("{}", fit(&item.group, GROUP_COL));

    print!("{}", flag_marker(item.is_favorite, "★", &theme.colors.favorite_fg, &style));
    print!("{}", flag_marker(item.is_emergency, "✚", &theme.colors.emergency_fg, &style));
    print!(" ");

    print!("{}", " ".repeat(width.saturating_sub(columns.used())));
    print!("{}", Theme::reset());
}

fn flag_marker(set: bool, glyph: &str, color: &str, style: &str) -> String {
    if set {
        format!("{}{glyph}{style}", Theme::fg(color))
    } else {
        " ".to_string()
    }
}
