//! Input mode state types for the contact list.
//!
//! The list runs in one of two input modes:
//! - **Normal**: navigation and per-contact commands
//! - **Search**: typing a query, or navigating the filtered results
//!
//! The form and the delete confirmation are overlays on top of either mode
//! and take keyboard input while shown.

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating the filtered results.
    ///
    /// Accepts j/k for movement and the per-contact commands; `/` returns to
    /// Typing.
    Navigating,
}

/// Current list input mode.
///
/// Controls which keybindings are active and the footer help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), a (add), e/enter (edit),
    /// d (delete), f (favorite), m (emergency), / (search), q (quit).
    Normal,

    /// Active search with focus state.
    Search(SearchFocus),
}

/// Which part of the screen currently owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List(InputMode),
    Form,
    ConfirmDelete,
}
