//! Key-value storage abstraction.
//!
//! The contact collection is persisted as a single string value under one key.
//! [`KeyValueStore`] is the minimal interface the rest of the crate needs for
//! that: read a value, overwrite a value. Backends decide where the bytes live.

use crate::domain::error::Result;
use std::collections::HashMap;

/// String-valued key-value storage.
///
/// # Implementations
///
/// - [`crate::storage::FileStore`]: one file per key with atomic writes (default)
/// - [`MemoryStore`]: in-process map, used in tests and as a fallback
///
/// # Examples
///
/// ```
/// use zcontacts::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("contacts", "[]")?;
/// assert_eq!(store.get("contacts")?.as_deref(), Some("[]"));
/// assert_eq!(store.get("missing")?, None);
/// # Ok::<(), zcontacts::domain::ContactsError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been written for the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. The previous value must stay
    /// readable in that case.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
