//! Empty state component renderer.

use crate::ui::helpers::{center_offset, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message and subtitle centred in the list area, one blank line
/// below `row`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, width: usize) {
    let msg_len = empty.message.chars().count();
    let msg_padding = center_offset(msg_len, width);

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", empty.message);
    print!("{}", " ".repeat(width.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let sub_len = empty.subtitle.chars().count();
    let sub_padding = center_offset(sub_len, width);

    position_cursor(row + 2, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{}", empty.subtitle);
    print!("{}", " ".repeat(width.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
