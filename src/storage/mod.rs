//! Storage layer for the contact collection.
//!
//! The collection is persisted as one JSON array under a single key of a
//! key-value store. Backends are interchangeable behind [`KeyValueStore`].
//!
//! # Modules
//!
//! - `backend`: Key-value trait and the in-memory backend
//! - `file`: File-per-key backend with atomic writes
//! - `contacts`: The owned contact collection and its mutations

pub mod backend;
pub mod contacts;
pub mod file;

pub use backend::{KeyValueStore, MemoryStore};
pub use contacts::{ContactCounts, ContactStore, DEFAULT_STORAGE_KEY, SIDE_LIST_LIMIT};
pub use file::FileStore;
