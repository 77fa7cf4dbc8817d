//! Add/edit form overlay.
//!
//! The form is a bordered box centred over the list. Each field takes one
//! line; Name, Phone and Email keep a line below for their validation
//! message so the layout does not jump when errors appear.

use super::avatar_badge;
use crate::ui::helpers::{fit, position_cursor, truncate, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

const MODAL_WIDTH: usize = 64;
const MODAL_HEIGHT: usize = 19;
const LABEL_COL: usize = 11;

/// Screen area covered by the form for a terminal of `rows` x `cols`.
///
/// Clicks outside this rectangle close the form.
///
/// ```rust
/// use zcontacts::ui::components::modal_area;
///
/// let area = modal_area(40, 100);
/// assert_eq!((area.x, area.y, area.width, area.height), (19, 11, 64, 19));
/// assert!(area.contains(20, 50));
/// assert!(!area.contains(1, 1));
/// ```
#[must_use]
pub fn modal_area(rows: usize, cols: usize) -> Rect {
    centered(rows, cols, MODAL_WIDTH.min(cols.saturating_sub(4)), MODAL_HEIGHT.min(rows))
}

/// A `width` x `height` rectangle centred in the terminal.
pub(super) const fn centered(rows: usize, cols: usize, width: usize, height: usize) -> Rect {
    Rect {
        x: cols.saturating_sub(width) / 2 + 1,
        y: rows.saturating_sub(height) / 2 + 1,
        width,
        height,
    }
}

/// Draws a bordered box with `title` in the top edge and `lines` inside.
///
/// Each line must already be exactly `area.width - 2` visible characters.
/// Lines beyond the box height are dropped.
pub(super) fn render_box(area: Rect, title: &str, lines: &[String], theme: &Theme) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let inner = area.width - 2;
    let border = Theme::fg(&theme.colors.modal_border);

    let title = truncate(&format!(" {title} "), inner);
    position_cursor(area.y, area.x);
    print!(
        "{border}{}┌{title}{}┐{}",
        Theme::bold(),
        "─".repeat(inner.saturating_sub(title.chars().count())),
        Theme::reset()
    );

    for (offset, row) in (area.y + 1..area.bottom()).enumerate() {
        position_cursor(row, area.x);
        print!("{border}│{}", Theme::reset());
        match lines.get(offset) {
            Some(line) => print!("{line}"),
            None => print!("{}", " ".repeat(inner)),
        }
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
    }

    position_cursor(area.bottom(), area.x);
    print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());
}

pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let area = modal_area(rows, cols);
    let lines = modal_lines(modal, theme, area.width.saturating_sub(2));
    render_box(area, &modal.title, &lines, theme);
}

fn modal_lines(modal: &ModalInfo, theme: &Theme, inner: usize) -> Vec<String> {
    let normal = Theme::fg(&theme.colors.text_normal);
    let mut lines = Vec::with_capacity(MODAL_HEIGHT);

    let saving = if modal.submitting { "Saving..." } else { "" };
    lines.push(format!(
        " {}{normal} {}",
        avatar_badge(&modal.avatar, theme),
        fit(saving, inner.saturating_sub(5))
    ));
    lines.push(" ".repeat(inner));

    let value_width = inner.saturating_sub(LABEL_COL + 3);
    for field in &modal.fields {
        let (style, marker) = if field.focused {
            (
                format!(
                    "{}{}",
                    Theme::fg(&theme.colors.selection_fg),
                    Theme::bg(&theme.colors.selection_bg)
                ),
                "›",
            )
        } else {
            (normal.clone(), " ")
        };
        lines.push(format!(
            "{style} {marker} {}{}{}",
            fit(field.label, LABEL_COL),
            fit(&field.value, value_width),
            Theme::reset()
        ));

        if field.has_error_line {
            let message = field.error.as_deref().unwrap_or_default();
            lines.push(format!(
                "{}   {}{}",
                Theme::fg(&theme.colors.error_fg),
                fit(message, inner.saturating_sub(3)),
                Theme::reset()
            ));
        }
    }

    lines.push(" ".repeat(inner));
    lines.push(format!(
        "{} {}{}",
        Theme::fg(&theme.colors.status_fg),
        fit(modal.notice.as_deref().unwrap_or_default(), inner.saturating_sub(1)),
        Theme::reset()
    ));
    lines.push(format!(
        "{}{} {}{}",
        Theme::dim(),
        Theme::fg(&theme.colors.text_dim),
        fit("Enter: save or load photo  Ctrl+s: save  Esc: cancel", inner.saturating_sub(1)),
        Theme::reset()
    ));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{Avatar, ModalField};

    fn field(label: &'static str, has_error_line: bool) -> ModalField {
        ModalField {
            label,
            value: String::new(),
            focused: false,
            error: None,
            has_error_line,
        }
    }

    #[test]
    fn area_shrinks_with_terminal() {
        let area = modal_area(10, 30);
        assert_eq!(area.width, 26);
        assert_eq!(area.height, 10);
        assert_eq!(area.x, 3);
        assert_eq!(area.y, 1);
    }

    #[test]
    fn full_form_fills_the_box() {
        let labels = [
            ("Name", true),
            ("Phone", true),
            ("Email", true),
            ("Address", false),
            ("Group", false),
            ("Notes", false),
            ("Photo", false),
            ("Favorite", false),
            ("Emergency", false),
        ];
        let modal = ModalInfo {
            title: "Add Contact".to_string(),
            avatar: Avatar::Placeholder,
            fields: labels.iter().map(|&(l, e)| field(l, e)).collect(),
            notice: None,
            submitting: false,
        };

        let lines = modal_lines(&modal, &Theme::default(), 62);
        assert_eq!(lines.len(), MODAL_HEIGHT - 2);
    }

    #[test]
    fn error_shown_under_its_field() {
        let mut name = field("Name", true);
        name.error = Some("Name is required".to_string());
        let modal = ModalInfo {
            title: "Edit Contact".to_string(),
            avatar: Avatar::Photo,
            fields: vec![name],
            notice: Some("Loading photo...".to_string()),
            submitting: true,
        };

        let lines = modal_lines(&modal, &Theme::default(), 62);
        assert!(lines[0].contains("Saving..."));
        assert!(lines[2].contains("Name"));
        assert!(lines[3].contains("Name is required"));
        assert!(lines[5].contains("Loading photo..."));
    }

    #[test]
    fn hint_describes_enter_as_save() {
        let modal = ModalInfo {
            title: "Add Contact".to_string(),
            avatar: Avatar::Placeholder,
            fields: vec![field("Name", true)],
            notice: None,
            submitting: false,
        };

        let lines = modal_lines(&modal, &Theme::default(), 62);
        let hint = lines.last().unwrap();
        assert!(hint.contains("Enter: save or load photo"));
        assert!(!hint.contains("next"));
    }
}
