//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready data (rows, counters, side lists, overlays)
//! - [`renderer`]: Entry point
//! - [`components`]: Per-region renderers and overlay geometry
//! - [`helpers`]: Cursor, highlighting, and width utilities
//! - [`theme`]: Colour schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    Avatar, ConfirmInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ModalField, ModalInfo, SearchBarInfo,
    SideItem, SidePanel, UIViewModel,
};
