//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: counters already counted,
//! lists already filtered and capped, avatar colours already picked.

use crate::domain::Contact;

/// Avatar background colours, indexed by the initial's code point.
pub const AVATAR_PALETTE: [&str; 8] = [
    "#6366f1", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

/// How a contact's avatar is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// The contact has an embedded photo.
    Photo,
    /// First letter of the name on a palette colour.
    Initial { letter: char, color: &'static str },
    /// Nothing to show (empty name, no photo).
    Placeholder,
}

impl Avatar {
    /// Picks the avatar for a name and optional photo.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcontacts::ui::viewmodel::Avatar;
    ///
    /// // 'A' is code point 65, 65 % 8 == 1
    /// assert_eq!(
    ///     Avatar::for_parts("alice", false),
    ///     Avatar::Initial { letter: 'A', color: "#ef4444" }
    /// );
    /// assert_eq!(Avatar::for_parts("alice", true), Avatar::Photo);
    /// ```
    #[must_use]
    pub fn for_parts(name: &str, has_photo: bool) -> Self {
        if has_photo {
            return Self::Photo;
        }
        let initial = name
            .trim_start()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c));
        Self::from_initial(initial)
    }

    #[must_use]
    pub fn for_contact(contact: &Contact) -> Self {
        if contact.photo.is_some() {
            return Self::Photo;
        }
        Self::from_initial(contact.initial())
    }

    fn from_initial(initial: Option<char>) -> Self {
        initial.map_or(Self::Placeholder, |letter| Self::Initial {
            letter,
            color: AVATAR_PALETTE[letter as usize % AVATAR_PALETTE.len()],
        })
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Rows of the main list inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Shown instead of the list when it has no rows.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    pub favorites: SidePanel,
    pub emergency: SidePanel,

    /// Add/edit form overlay.
    pub modal: Option<ModalInfo>,

    /// Delete confirmation overlay.
    pub confirm: Option<ConfirmInfo>,
}

/// One row of the main contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Group display label, empty when unset.
    pub group: String,
    pub avatar: Avatar,
    pub is_favorite: bool,
    pub is_emergency: bool,
    pub is_selected: bool,

    /// Character ranges of the name matching the search query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Title and counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub total: usize,
    pub favorites: usize,
    pub emergency: usize,
    /// Always equal to `total`; shown on its own badge.
    pub all_contacts: usize,
}

/// Bottom lines: help, status, copyright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
    pub status: Option<String>,
    pub copyright: String,
}

/// Empty list message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// `true` while the cursor is in the query box.
    pub typing: bool,
}

/// One capped side list (favorites or emergency).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidePanel {
    pub title: String,
    pub items: Vec<SideItem>,
    /// Shown when `items` is empty.
    pub empty_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideItem {
    pub name: String,
    pub phone: String,
    pub avatar: Avatar,
}

/// Form overlay contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInfo {
    pub title: String,
    pub avatar: Avatar,
    pub fields: Vec<ModalField>,
    pub notice: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalField {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
    /// Inline validation message.
    pub error: Option<String>,
    /// Reserves a line below the field for `error`.
    pub has_error_line: bool,
}

/// Delete confirmation overlay contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmInfo {
    pub message: String,
    pub hint: String,
}
