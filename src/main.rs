//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the zcontacts library and Zellij: it maps Zellij
//! events to library [`Event`]s, executes returned [`Action`]s, and hosts the
//! photo worker.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling, storage
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   PhotoWorker    │   │  ← Photo file reads
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! List:
//! - `j`/`Down`, `k`/`Up`, `Ctrl+n`/`Ctrl+p`: Navigate
//! - `a`: Add, `e`/`Enter`: Edit, `d`: Delete
//! - `f`: Toggle favorite, `m`: Toggle emergency
//! - `/`: Search, `q`: Close plugin
//!
//! Search:
//! - Type to filter, `Enter`/`Tab`: Move to results, `Esc`: Exit
//! - In results, `/` returns to the query
//!
//! Form:
//! - `Tab`/`Down`, `Shift+Tab`/`Up`: Move between fields
//! - `Left`/`Right`: Change group, `Space`: Toggle checkbox
//! - `Enter`: Load photo (on the photo field) or save
//! - `Ctrl+s`: Save, `Esc`: Cancel
//!
//! Delete confirmation: `y` confirms, `n`/`Esc` cancels.
//!
//! A left click outside the form closes it.

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use zcontacts::worker::{ContactsWorker, WorkerMessage, WorkerResponse};
use zcontacts::{handle_event, Action, Config, Event, Focus, InputMode, SearchFocus};

register_plugin!(State);
register_worker!(PhotoWorker, zcontacts_worker, ZCONTACTS_WORKER);

const WORKER_NAME: &str = "zcontacts";

struct State {
    app: zcontacts::AppState,

    /// Pane size from the last render, used to hit-test mouse clicks.
    rows: usize,
    cols: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zcontacts::AppState::new(
                zcontacts::storage::ContactStore::in_memory(zcontacts::storage::DEFAULT_STORAGE_KEY),
                zcontacts::Theme::default(),
                zcontacts::domain::PhonePolicy::default(),
            ),
            rows: 0,
            cols: 0,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zcontacts::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(data_dir = %config.data_dir.display(), storage_key = %config.storage_key, "parsed configuration");
        self.app = zcontacts::initialize(&config);

        request_permission(&[PermissionType::FullHdAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match self.map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                if matches!(permissions, PermissionStatus::Denied) {
                    tracing::warn!("host filesystem access denied, contacts and photos cannot be read");
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in actions {
                    Self::execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        zcontacts::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        match self.app.focus() {
            Focus::Form => Self::map_form_key(key),
            Focus::ConfirmDelete => match key.bare_key {
                BareKey::Char('y' | 'Y') => Some(Event::ConfirmDelete),
                BareKey::Char('n' | 'N') | BareKey::Esc => Some(Event::CancelDelete),
                _ => None,
            },
            Focus::List(mode) => Self::map_list_key(key, mode),
        }
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        let shift = key.has_modifiers(&[KeyModifier::Shift]);

        Some(match key.bare_key {
            BareKey::Char('s') if ctrl => Event::SubmitForm,
            BareKey::Tab if shift => Event::FormPrevField,
            BareKey::Tab | BareKey::Down => Event::FormNextField,
            BareKey::Up => Event::FormPrevField,
            BareKey::Left => Event::FormCycleGroup { forward: false },
            BareKey::Right => Event::FormCycleGroup { forward: true },
            BareKey::Enter => Event::FormEnter,
            BareKey::Esc => Event::CancelForm,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !ctrl => Event::Char(c),
            _ => return None,
        })
    }

    fn map_list_key(key: &KeyWithModifier, mode: InputMode) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        Some(match (mode, key.bare_key) {
            (_, BareKey::Down) => Event::KeyDown,
            (_, BareKey::Up) => Event::KeyUp,

            (InputMode::Search(SearchFocus::Typing), bare) => match bare {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter | BareKey::Tab => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },

            (InputMode::Search(SearchFocus::Navigating), BareKey::Esc) => Event::ExitSearch,
            (InputMode::Search(SearchFocus::Navigating), BareKey::Char('/') | BareKey::Backspace) => {
                Event::FocusSearchBar
            }
            (InputMode::Normal, BareKey::Esc) => Event::Escape,
            (InputMode::Normal, BareKey::Char('/')) => Event::SearchMode,
            (InputMode::Normal, BareKey::Char('q')) => Event::CloseFocus,

            (_, BareKey::Char('j')) => Event::KeyDown,
            (_, BareKey::Char('k')) => Event::KeyUp,
            (_, BareKey::Char('a')) => Event::AddContact,
            (_, BareKey::Char('e') | BareKey::Enter) => Event::EditSelected,
            (_, BareKey::Char('d')) => Event::DeleteSelected,
            (_, BareKey::Char('f')) => Event::ToggleFavorite,
            (_, BareKey::Char('m')) => Event::ToggleEmergency,
            _ => return None,
        })
    }

    /// Zellij reports 0-based positions; the UI works in 1-based terminal
    /// coordinates.
    fn map_mouse_event(&self, mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, column) => {
                let line = usize::try_from(line).ok()?;
                Some(Event::Click {
                    line: line + 1,
                    column: column + 1,
                    rows: self.rows,
                    cols: self.cols,
                })
            }
            _ => None,
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match WorkerResponse::from_payload(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::error!(error = %e, "dropping worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}

/// Worker thread entry, wrapping the library worker with Zellij's IPC.
#[derive(Default, Serialize, Deserialize)]
struct PhotoWorker(ContactsWorker);

impl ZellijWorker<'_> for PhotoWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if let Some(payload) = self.0.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}
