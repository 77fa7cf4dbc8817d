//! zcontacts: a Zellij plugin for managing a personal address book.
//!
//! - Create, edit, and delete contacts with inline validation
//! - Live search across name, phone, email, address, and group
//! - Favorite and emergency flags with capped side lists
//! - Photos read from disk on a worker thread and stored as data URIs
//! - Persistent JSON storage behind a key-value backend

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, form state machine               │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON array  │   │ - Photo reads │
//! │ - Theming     │   │ - Key-value   │   │ - IPC bridge  │
//! │ - Overlays    │   │   backends    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Contact model, validation, search (domain/)      │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, JSON lines file export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zcontacts.wasm" {
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!         data_dir "/host/.local/share/zellij/zcontacts"
//!         storage_key "contacts"
//!         phone_pattern "^\\+?[0-9 ()-]{7,20}$"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zcontacts::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     data_dir: std::env::temp_dir().join("zcontacts-lib-doc"),
//!     storage_key: "doc-contacts".to_string(),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_render, actions) = handle_event(&mut state, &Event::AddContact)?;
//! assert!(actions.is_empty());
//! # Ok::<(), zcontacts::ContactsError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus, InputMode, SearchFocus};
pub use domain::{Contact, ContactsError, Result};
pub use ui::Theme;

use domain::PhonePolicy;
use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::{ContactStore, FileStore, DEFAULT_STORAGE_KEY};

/// Plugin configuration parsed from the Zellij layout block.
#[derive(Debug, Clone)]
pub struct Config {
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans and events. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory holding the contact store and trace files.
    pub data_dir: PathBuf,

    /// Key the contact array is stored under.
    pub storage_key: String,

    /// Regular expression phone numbers must match.
    pub phone_pattern: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: None,
            theme_file: None,
            trace_level: None,
            data_dir: infrastructure::get_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            phone_pattern: None,
        }
    }
}

impl Config {
    /// Reads options from Zellij's configuration map.
    ///
    /// Empty values count as unset. `data_dir` accepts a leading `~`.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zcontacts::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "~/contacts".to_string());
    /// map.insert("storage_key".to_string(), " ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.data_dir, std::path::PathBuf::from("/host/contacts"));
    /// assert_eq!(config.storage_key, "contacts");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let defaults = Self::default();
        Self {
            theme_name: get("theme"),
            theme_file: get("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: get("trace_level"),
            data_dir: get("data_dir")
                .map_or(defaults.data_dir, |p| PathBuf::from(infrastructure::expand_tilde(&p))),
            storage_key: get("storage_key").unwrap_or(defaults.storage_key),
            phone_pattern: get("phone_pattern"),
        }
    }
}

/// Builds the initial application state.
///
/// Nothing here is fatal. An unusable theme, phone pattern, or storage
/// location is logged and replaced by its default; if the store cannot be
/// opened at all the session runs on an in-memory store.
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize", data_dir = %config.data_dir.display()).entered();

    let theme = Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref());

    let phone_policy = config.phone_pattern.as_deref().map_or_else(PhonePolicy::default, |pattern| {
        PhonePolicy::from_pattern(pattern).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default phone pattern");
            PhonePolicy::default()
        })
    });

    let store = open_store(config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "contact storage unavailable, changes will not persist");
        ContactStore::in_memory(config.storage_key.clone())
    });

    tracing::debug!(contacts = store.len(), theme = %theme.name, "plugin initialized");
    AppState::new(store, theme, phone_policy)
}

fn open_store(config: &Config) -> Result<ContactStore> {
    let backend = FileStore::open(config.data_dir.clone())?;
    ContactStore::load(Box::new(backend), config.storage_key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_missing_options() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert!(config.theme_name.is_none());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.data_dir, infrastructure::get_data_dir());
    }

    #[test]
    fn initialize_loads_existing_contacts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("book.json"),
            r#"[{"id":"1","name":"Ada","phone":"555-0100","email":"","address":"","group":"","notes":"","photo":null,"isFavorite":true,"isEmergency":false}]"#,
        )
        .unwrap();

        let config = Config {
            data_dir: dir.path().to_path_buf(),
            storage_key: "book".to_string(),
            ..Default::default()
        };
        let state = initialize(&config);

        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.counts().favorites, 1);
    }

    #[test]
    fn bad_phone_pattern_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            phone_pattern: Some("([".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.phone_policy.pattern(), PhonePolicy::default().pattern());
    }

    #[test]
    fn unusable_data_dir_runs_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let config = Config {
            data_dir: blocker.join("nested"),
            ..Default::default()
        };
        let state = initialize(&config);
        assert!(state.store.is_empty());
    }
}
