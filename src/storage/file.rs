//! File-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling file
//! first and are then renamed over the target, so a crash mid-write leaves the
//! previous value intact.

use crate::domain::error::{ContactsError, Result};
use crate::storage::backend::KeyValueStore;
use std::path::{Path, PathBuf};

/// [`KeyValueStore`] keeping one file per key inside a directory.
///
/// This type is `Send` but not `Sync`. It is owned by the plugin thread.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zcontacts::storage::FileStore;
    ///
    /// let store = FileStore::open("/tmp/zcontacts")?;
    /// # Ok::<(), zcontacts::domain::ContactsError>(())
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tracing::debug!(dir = ?dir, "opening file store");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::Storage`] for keys that would escape the
    /// store directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(ContactsError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("file_store_get", path = ?path).entered();

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "value loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no value stored");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("file_store_set", path = ?path, bytes = value.len()).entered();

        let tmp_path = path.with_extension("json.tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("value saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("contacts").unwrap(), None);
    }

    #[test]
    fn value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.set("contacts", r#"[{"id":"1"}]"#).unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("contacts").unwrap().as_deref(), Some(r#"[{"id":"1"}]"#));
        assert!(dir.path().join("contacts.json").exists());
        assert!(!dir.path().join("contacts.json.tmp").exists());
    }

    #[test]
    fn creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = FileStore::open(&nested).unwrap();
        store.set("contacts", "[]").unwrap();
        assert!(nested.join("contacts.json").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.set("../evil", "x"), Err(ContactsError::Storage(_))));
        assert!(matches!(store.get(""), Err(ContactsError::Storage(_))));
    }
}
