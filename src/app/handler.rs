//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that happens to
//! the plugin: key presses and mouse clicks already mapped by the shim, and
//! responses from the photo worker. It mutates [`AppState`], writes through the
//! store where the event changes contacts, and returns the actions the shim
//! must execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Contacts**: `AddContact`, `EditSelected`, `DeleteSelected`,
//!   `ConfirmDelete`, `CancelDelete`, `ToggleFavorite`, `ToggleEmergency`
//! - **Form**: `FormNextField`, `FormPrevField`, `FormCycleGroup`,
//!   `FormEnter`, `SubmitForm`, `CancelForm`, `Click`
//! - **Worker**: `WorkerResponse`

use super::form::{FormField, FormState, OpenForm, PhotoOutcome, Submission, SubmitOutcome};
use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{ContactsError, Flag};
use crate::infrastructure::paths;
use crate::ui::components::modal_area;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection down by one position (wraps to top).
    KeyDown,
    /// Moves selection up by one position (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating).
    FocusSearchBar,
    /// Focuses the search results list (from typing).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,

    /// Types a character into the search query or the focused form field.
    Char(char),
    /// Removes the last character from the search query or focused field.
    Backspace,
    /// Closes whatever overlay or mode is active.
    Escape,

    /// Opens an empty create form.
    AddContact,
    /// Opens the edit form for the selected contact.
    EditSelected,
    /// Asks for confirmation to delete the selected contact.
    DeleteSelected,
    ConfirmDelete,
    CancelDelete,
    ToggleFavorite,
    ToggleEmergency,

    FormNextField,
    FormPrevField,
    FormCycleGroup {
        forward: bool,
    },
    /// Loads the photo when the Photo field is focused, submits otherwise.
    FormEnter,
    SubmitForm,
    CancelForm,

    /// Left click at a 1-based cell, with the pane size at the time.
    Click {
        line: usize,
        column: usize,
        rows: usize,
        cols: usize,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`.
///
/// # Errors
///
/// Store write failures are not returned: they are logged, shown on the
/// status line, and the in-memory change stands. Errors are reserved for
/// failures the shim should log.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if !matches!(event, Event::WorkerResponse(_)) {
        state.status = None;
    }

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.trim().is_empty() {
                exit_search(state);
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            exit_search(state);
            Ok((true, vec![]))
        }

        Event::Char(c) => {
            if let Some(form) = state.form.as_open_mut() {
                if form.is_submitting() {
                    return Ok((false, vec![]));
                }
                form.insert_char(*c);
                return Ok((true, vec![]));
            }

            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }

            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, "search query updated");
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if let Some(form) = state.form.as_open_mut() {
                if !form.is_submitting() {
                    form.backspace();
                }
                return Ok((true, vec![]));
            }

            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }

            state.search_query.pop();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.form.is_open() {
                close_form(state);
            } else if state.pending_delete.is_some() {
                state.pending_delete = None;
            } else if matches!(state.input_mode, InputMode::Search(_)) {
                exit_search(state);
            } else {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }

        Event::AddContact => {
            tracing::debug!("opening create form");
            state.form = FormState::Open(OpenForm::create());
            Ok((true, vec![]))
        }
        Event::EditSelected => {
            let Some(contact) = state.selected_contact() else {
                tracing::debug!("no contact selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(id = %contact.id, "opening edit form");
            state.form = FormState::Open(OpenForm::edit(contact));
            Ok((true, vec![]))
        }
        Event::DeleteSelected => {
            let Some(id) = state.selected_contact().map(|c| c.id.clone()) else {
                return Ok((false, vec![]));
            };
            state.pending_delete = Some(id);
            Ok((true, vec![]))
        }
        Event::ConfirmDelete => {
            let Some(id) = state.pending_delete.take() else {
                return Ok((false, vec![]));
            };
            match state.store.remove(&id) {
                Ok(true) => state.status = Some("Contact deleted".to_string()),
                Ok(false) => tracing::debug!(id = %id, "contact already gone"),
                Err(e) => report_write_error(state, &e),
            }
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::CancelDelete => {
            state.pending_delete = None;
            Ok((true, vec![]))
        }
        Event::ToggleFavorite => toggle_selected(state, Flag::Favorite),
        Event::ToggleEmergency => toggle_selected(state, Flag::Emergency),

        Event::FormNextField | Event::FormPrevField => {
            let Some(form) = state.form.as_open_mut() else {
                return Ok((false, vec![]));
            };
            if matches!(event, Event::FormNextField) {
                form.focus_next();
            } else {
                form.focus_prev();
            }
            Ok((true, vec![]))
        }
        Event::FormCycleGroup { forward } => {
            let Some(form) = state.form.as_open_mut() else {
                return Ok((false, vec![]));
            };
            if form.focus != FormField::Group || form.is_submitting() {
                return Ok((false, vec![]));
            }
            form.cycle_group(*forward);
            Ok((true, vec![]))
        }
        Event::FormEnter => {
            let on_photo = state
                .form
                .as_open()
                .is_some_and(|form| form.focus == FormField::Photo);
            if on_photo {
                Ok((true, start_photo_read(state)))
            } else {
                submit_form(state)
            }
        }
        Event::SubmitForm => submit_form(state),
        Event::CancelForm => {
            if !state.form.is_open() {
                return Ok((false, vec![]));
            }
            close_form(state);
            Ok((true, vec![]))
        }
        Event::Click {
            line,
            column,
            rows,
            cols,
        } => {
            if state.form.is_open() && !modal_area(*rows, *cols).contains(*line, *column) {
                tracing::debug!(line = line, column = column, "click outside form, closing");
                close_form(state);
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }

        Event::WorkerResponse(response) => match response {
            WorkerResponse::PhotoLoaded {
                request_id,
                data_uri,
            } => complete_photo(state, *request_id, Ok(data_uri.clone())),
            WorkerResponse::PhotoFailed {
                request_id,
                message,
            } => complete_photo(state, *request_id, Err(message.clone())),
            WorkerResponse::Error { message } => {
                tracing::error!(error = %message, "worker error");
                state.status = Some(format!("Worker error: {message}"));
                abandon_photo_read(state, message);
                Ok((true, vec![]))
            }
        },
    }
}

fn exit_search(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.search_query.clear();
    state.clamp_selection();
}

fn close_form(state: &mut AppState) {
    tracing::debug!("closing form");
    state.form = FormState::Closed;
}

fn report_write_error(state: &mut AppState, error: &ContactsError) {
    tracing::error!(error = %error, "failed to save contacts");
    state.status = Some(format!("Failed to save contacts: {error}"));
}

fn toggle_selected(state: &mut AppState, flag: Flag) -> Result<(bool, Vec<Action>)> {
    let Some(id) = state.selected_contact().map(|c| c.id.clone()) else {
        return Ok((false, vec![]));
    };
    if let Err(e) = state.store.toggle_flag(&id, flag) {
        report_write_error(state, &e);
    }
    Ok((true, vec![]))
}

fn start_photo_read(state: &mut AppState) -> Vec<Action> {
    let request_id = state.next_photo_request();
    let Some(form) = state.form.as_open_mut() else {
        return vec![];
    };
    if form.is_submitting() {
        return vec![];
    }

    let path = form.photo_path.trim();
    if path.is_empty() {
        form.notice = Some("Type a path to an image first".to_string());
        return vec![];
    }
    let path = paths::expand_tilde(path);

    tracing::debug!(request_id = request_id, path = %path, "requesting photo read");
    form.begin_photo_read(request_id);
    vec![Action::PostToWorker(WorkerMessage::read_photo(request_id, path))]
}

fn submit_form(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let policy = state.phone_policy.clone();
    let Some(form) = state.form.as_open_mut() else {
        return Ok((false, vec![]));
    };

    match form.submit(&policy) {
        SubmitOutcome::Invalid => {
            tracing::debug!(errors = ?form.errors.errors(), "submission rejected");
        }
        SubmitOutcome::Waiting => {
            form.notice = Some("Saving once the photo has loaded...".to_string());
        }
        SubmitOutcome::Ready(submission) => apply_submission(state, submission),
    }
    Ok((true, vec![]))
}

fn complete_photo(
    state: &mut AppState,
    request_id: u64,
    result: std::result::Result<String, String>,
) -> Result<(bool, Vec<Action>)> {
    let Some(form) = state.form.as_open_mut() else {
        tracing::debug!(request_id = request_id, "photo arrived after form closed");
        return Ok((false, vec![]));
    };

    if form.complete_photo_read(request_id, result) == PhotoOutcome::Stale {
        return Ok((false, vec![]));
    }

    if let Some(submission) = form.take_deferred_submission() {
        apply_submission(state, submission);
    }
    Ok((true, vec![]))
}

/// The worker could not name the failed request, so whatever read the form
/// is waiting on will never answer.
fn abandon_photo_read(state: &mut AppState, message: &str) {
    let Some(form) = state.form.as_open_mut() else {
        return;
    };
    if !form.abandon_photo_read(message) {
        return;
    }
    if let Some(submission) = form.take_deferred_submission() {
        apply_submission(state, submission);
    }
}

/// Writes a validated submission to the store and closes the form.
fn apply_submission(state: &mut AppState, submission: Submission) {
    let (id, result, done) = match submission {
        Submission::Create(contact) => {
            let id = contact.id.clone();
            (id, state.store.add(contact).map(|()| true), "Contact added")
        }
        Submission::Update { id, patch } => {
            let result = state.store.update(&id, patch);
            (id, result, "Contact updated")
        }
    };

    match result {
        Ok(true) => state.status = Some(done.to_string()),
        Ok(false) => {
            tracing::warn!(id = %id, "edited contact no longer exists");
            state.status = Some("Contact no longer exists".to_string());
        }
        Err(ContactsError::DuplicateId(id)) => {
            tracing::error!(id = %id, "generated id already in use");
            state.status = Some("Could not add contact, please try again".to_string());
        }
        Err(e) => report_write_error(state, &e),
    }

    close_form(state);
    state.select_id(&id);
}
