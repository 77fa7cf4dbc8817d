//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin shim (`main.rs`) and the
//! domain/storage/worker layers.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State + Store Mutations → Actions → Side Effects
//!                           ↑                                           ↓
//!                           └─────────── Worker Responses ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Add/edit form state machine
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode types
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::{FormField, FormMode, FormState, OpenForm};
pub use handler::{handle_event, Event};
pub use modes::{Focus, InputMode, SearchFocus};
pub use state::AppState;
