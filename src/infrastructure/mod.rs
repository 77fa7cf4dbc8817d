//! Sandbox environment helpers.
//!
//! The plugin only sees the host filesystem under `/host`; these helpers map
//! user-facing paths onto it and pick the default data location.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, strip_host_prefix};
