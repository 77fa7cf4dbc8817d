//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: it owns the
//! [`ContactStore`] and all transient UI state (selection, search query, form,
//! pending delete). View models are computed on demand from it.
//!
//! # State Components
//!
//! - **Store**: The persisted contact collection
//! - **Selection**: Cursor position within the visible (filtered) contacts
//! - **Input Mode**: Normal or search, with search focus
//! - **Form**: Closed, or an open add/edit form
//! - **Pending Delete**: Contact awaiting confirmation
//! - **Status**: One-line message from the last operation

use super::form::{FormField, FormState, OpenForm};
use super::modes::{Focus, InputMode, SearchFocus};
use crate::domain::search::{match_range, visible_contacts};
use crate::domain::{Contact, ContactGroup, Flag, PhonePolicy, ValidationError};
use crate::storage::ContactStore;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Avatar, ConfirmInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ModalField, ModalInfo,
    SearchBarInfo, SideItem, SidePanel, UIViewModel,
};
use chrono::Datelike;

/// Widest name shown in the main list, in characters.
const NAME_WIDTH: usize = 24;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// The contact collection and its storage backend.
    pub store: ContactStore,

    /// Zero-based index into the visible contacts.
    ///
    /// Clamped after every change to the visible set; wraps during navigation.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Current search query. Cleared when search mode exits.
    pub search_query: String,

    pub theme: Theme,

    pub form: FormState,

    /// Id of the contact awaiting delete confirmation.
    pub pending_delete: Option<String>,

    /// Accepted phone format for form submissions.
    pub phone_policy: PhonePolicy,

    /// Transient message for the status line.
    pub status: Option<String>,

    last_photo_request: u64,
}

impl AppState {
    #[must_use]
    pub fn new(store: ContactStore, theme: Theme, phone_policy: PhonePolicy) -> Self {
        Self {
            store,
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme,
            form: FormState::Closed,
            pending_delete: None,
            phone_policy,
            status: None,
            last_photo_request: 0,
        }
    }

    /// Returns which part of the UI currently receives keys.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        if self.form.is_open() {
            Focus::Form
        } else if self.pending_delete.is_some() {
            Focus::ConfirmDelete
        } else {
            Focus::List(self.input_mode)
        }
    }

    /// Returns the contacts matching the current search query, in
    /// collection order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Contact> {
        visible_contacts(self.store.contacts(), &self.search_query)
    }

    #[must_use]
    pub fn selected_contact(&self) -> Option<&Contact> {
        self.visible().get(self.selected_index).copied()
    }

    /// Moves selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the selection inside the visible contacts.
    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected_index = if len == 0 {
            0
        } else {
            self.selected_index.min(len - 1)
        };
    }

    /// Moves the selection onto the contact with `id`, if visible.
    pub fn select_id(&mut self, id: &str) {
        if let Some(index) = self.visible().iter().position(|c| c.id == id) {
            self.selected_index = index;
        } else {
            self.clamp_selection();
        }
    }

    /// Allocates the next photo read request id.
    pub fn next_photo_request(&mut self) -> u64 {
        self.last_photo_request += 1;
        self.last_photo_request
    }

    /// Computes a renderable view model for the given terminal size.
    ///
    /// The main list is windowed around the selection so the selected row is
    /// always visible.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows = rows, cols = cols).entered();

        let visible = self.visible();
        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(visible.len());
        if visible_end - visible_start < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = visible
            .get(visible_start..visible_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(relative_idx, contact)| {
                self.compute_display_item(contact, visible_start + relative_idx)
            })
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(visible.is_empty()),
            search_bar: self.compute_search_bar(),
            favorites: self.compute_side_panel(Flag::Favorite),
            emergency: self.compute_side_panel(Flag::Emergency),
            modal: self.form.as_open().map(Self::compute_modal),
            confirm: self.compute_confirm(),
        }
    }

    fn compute_display_item(&self, contact: &Contact, absolute_idx: usize) -> DisplayItem {
        let name = truncate(&contact.name, NAME_WIDTH);
        let name_len = name.chars().count();

        let highlight_ranges = match_range(&contact.name, &self.search_query)
            .filter(|&(start, _)| start < name_len)
            .map(|(start, end)| vec![(start, end.min(name_len))])
            .unwrap_or_default();

        DisplayItem {
            name,
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            group: ContactGroup::parse(&contact.group)
                .map(ContactGroup::label)
                .unwrap_or_default()
                .to_string(),
            avatar: Avatar::for_contact(contact),
            is_favorite: contact.is_favorite,
            is_emergency: contact.is_emergency,
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let counts = self.store.counts();
        HeaderInfo {
            title: " Contacts ".to_string(),
            total: counts.total,
            favorites: counts.favorites,
            emergency: counts.emergency,
            all_contacts: counts.total,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus() {
            Focus::Form => {
                "Tab/Shift+Tab: field  Space: toggle  ←/→: group  Enter: save or load photo  Ctrl+s: save  Esc: cancel"
            }
            Focus::ConfirmDelete => "y: delete  n/Esc: cancel",
            Focus::List(InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter/Tab: results  Ctrl+n/p: navigate  Type to filter"
            }
            Focus::List(InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k: navigate  e: edit  d: delete  f/m: flag"
            }
            Focus::List(InputMode::Normal) => {
                "j/k: navigate  a: add  e: edit  d: delete  f: favorite  m: emergency  /: search  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            status: self.status.clone(),
            copyright: format!("© {} zcontacts. All rights reserved.", chrono::Utc::now().year()),
        }
    }

    fn compute_empty_state(&self, nothing_visible: bool) -> Option<EmptyState> {
        if !nothing_visible {
            return None;
        }
        let subtitle = if self.store.is_empty() {
            "Press 'a' to add your first contact"
        } else {
            "No contacts match your search"
        };
        Some(EmptyState {
            message: "No contacts found".to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                typing: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_side_panel(&self, flag: Flag) -> SidePanel {
        let (title, empty_message) = match flag {
            Flag::Favorite => ("Favorites", "No favorites yet."),
            Flag::Emergency => ("Emergency", "No emergency contacts."),
        };

        SidePanel {
            title: title.to_string(),
            items: self
                .store
                .flagged(flag)
                .into_iter()
                .map(|contact| SideItem {
                    name: contact.name.clone(),
                    phone: contact.phone.clone(),
                    avatar: Avatar::for_contact(contact),
                })
                .collect(),
            empty_message: empty_message.to_string(),
        }
    }

    fn compute_modal(form: &OpenForm) -> ModalInfo {
        let fields = FormField::ALL
            .into_iter()
            .map(|field| {
                let value = match field {
                    FormField::Name => form.name.clone(),
                    FormField::Phone => form.phone.clone(),
                    FormField::Email => form.email.clone(),
                    FormField::Address => form.address.clone(),
                    FormField::Notes => form.notes.clone(),
                    FormField::Photo => form.photo_path.clone(),
                    FormField::Group => form
                        .group
                        .map_or_else(|| "Select group".to_string(), |g| g.label().to_string()),
                    FormField::Favorite => checkbox(form.is_favorite),
                    FormField::Emergency => checkbox(form.is_emergency),
                };
                let error = match field {
                    FormField::Name if form.errors.name => Some(ValidationError::Name),
                    FormField::Phone if form.errors.phone => Some(ValidationError::Phone),
                    FormField::Email if form.errors.email => Some(ValidationError::Email),
                    _ => None,
                };
                ModalField {
                    label: field.label(),
                    value,
                    focused: form.focus == field,
                    error: error.map(|e| e.to_string()),
                    has_error_line: matches!(
                        field,
                        FormField::Name | FormField::Phone | FormField::Email
                    ),
                }
            })
            .collect();

        let avatar = if form.preview.is_some() {
            Avatar::Photo
        } else {
            Avatar::for_parts(&form.name, false)
        };

        let title = if form.is_editing() { "Edit Contact" } else { "Add Contact" };

        ModalInfo {
            title: title.to_string(),
            avatar,
            fields,
            notice: form.notice.clone(),
            submitting: form.is_submitting(),
        }
    }

    fn compute_confirm(&self) -> Option<ConfirmInfo> {
        let id = self.pending_delete.as_ref()?;
        let name = self.store.find_by_id(id).map_or("this contact", |c| c.name.as_str());
        Some(ConfirmInfo {
            message: format!("Are you sure you want to delete {name}?"),
            hint: "y: delete  n/Esc: cancel".to_string(),
        })
    }

    /// Rows left for the list after header, counters, borders, table header,
    /// status, footer, copyright, and the search box when shown.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(9),
            InputMode::Search(_) => total_rows.saturating_sub(12),
        }
    }
}

fn checkbox(checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    mark.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, DEFAULT_STORAGE_KEY};

    fn state_with(names: &[&str]) -> AppState {
        let store = ContactStore::load(Box::new(MemoryStore::default()), DEFAULT_STORAGE_KEY).unwrap();
        let mut state = AppState::new(store, Theme::default(), PhonePolicy::default());
        for name in names {
            state.store.add(Contact::new(*name, "01012345678")).unwrap();
        }
        state
    }

    #[test]
    fn empty_collection_prompts_to_add() {
        let state = state_with(&[]);
        let vm = state.compute_viewmodel(30, 120);

        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "No contacts found");
        assert_eq!(empty.subtitle, "Press 'a' to add your first contact");
        assert_eq!(vm.favorites.empty_message, "No favorites yet.");
        assert_eq!(vm.emergency.empty_message, "No emergency contacts.");
        assert_eq!(vm.header.total, 0);
    }

    #[test]
    fn unmatched_search_has_its_own_message() {
        let mut state = state_with(&["Mona Said"]);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.search_query = "zzz".to_string();

        let vm = state.compute_viewmodel(30, 120);
        assert_eq!(vm.empty_state.unwrap().subtitle, "No contacts match your search");
        assert!(vm.search_bar.unwrap().typing);
    }

    #[test]
    fn counters_match_collection() {
        let mut state = state_with(&["Mona", "Omar", "Hany"]);
        let ids: Vec<String> = state.store.contacts().iter().map(|c| c.id.clone()).collect();
        state.store.toggle_flag(&ids[0], Flag::Favorite).unwrap();
        state.store.toggle_flag(&ids[1], Flag::Favorite).unwrap();
        state.store.toggle_flag(&ids[2], Flag::Emergency).unwrap();

        let header = state.compute_viewmodel(30, 120).header;
        assert_eq!(header.total, 3);
        assert_eq!(header.all_contacts, 3);
        assert_eq!(header.favorites, 2);
        assert_eq!(header.emergency, 1);
    }

    #[test]
    fn window_keeps_selection_visible() {
        let names: Vec<String> = (0..40).map(|i| format!("Person {}", char::from(b'A' + (i % 26) as u8))).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.selected_index = 35;

        let vm = state.compute_viewmodel(20, 120);
        assert_eq!(vm.display_items.len(), 11);
        assert!(vm.display_items[vm.selected_index].is_selected);
    }

    #[test]
    fn search_highlights_name_match() {
        let mut state = state_with(&["Mona Said", "Omar Ali"]);
        state.search_query = "said".to_string();
        state.input_mode = InputMode::Search(SearchFocus::Navigating);

        let vm = state.compute_viewmodel(30, 120);
        assert_eq!(vm.display_items.len(), 1);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(5, 9)]);
    }

    #[test]
    fn selection_wraps() {
        let mut state = state_with(&["Mona", "Omar"]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn modal_shows_inline_errors() {
        let mut state = state_with(&[]);
        let mut form = OpenForm::create();
        form.name = "X".to_string();
        form.phone = "01012345678".to_string();
        form.submit(&PhonePolicy::default());
        state.form = FormState::Open(form);

        let modal = state.compute_viewmodel(30, 120).modal.unwrap();
        assert_eq!(modal.title, "Add Contact");
        assert!(modal.fields[0].error.is_some());
        assert!(modal.fields[1].error.is_none());
        assert!(modal.fields[0].focused);
    }
}
