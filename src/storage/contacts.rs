//! The contact collection and its persistence.
//!
//! [`ContactStore`] is the single owner of the in-memory collection. Every
//! mutation is applied in memory first and then written back as the full JSON
//! array under the storage key.
//!
//! # Malformed payloads
//!
//! A stored value that does not parse is not fatal: the store starts empty,
//! logs at `warn`, and copies the raw payload to `<key>.corrupt` so the next
//! save cannot destroy it.

use crate::domain::error::{ContactsError, Result};
use crate::domain::{Contact, ContactPatch, Flag};
use crate::storage::backend::{KeyValueStore, MemoryStore};

/// Default storage key for the contact array.
pub const DEFAULT_STORAGE_KEY: &str = "contacts";

/// Number of entries shown in each side list.
pub const SIDE_LIST_LIMIT: usize = 5;

/// Aggregate counters over the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactCounts {
    pub total: usize,
    pub favorites: usize,
    pub emergency: usize,
}

/// Owned, insertion-ordered contact collection bound to a storage backend.
pub struct ContactStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    contacts: Vec<Contact>,
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore")
            .field("key", &self.key)
            .field("contacts", &self.contacts.len())
            .finish_non_exhaustive()
    }
}

impl ContactStore {
    /// An empty collection that lives only in memory.
    ///
    /// Used when the configured storage cannot be opened, so the plugin still
    /// runs for the session.
    #[must_use]
    pub fn in_memory(key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(MemoryStore::default()),
            key: key.into(),
            contacts: Vec::new(),
        }
    }

    /// Loads the collection stored under `key`.
    ///
    /// An absent key yields an empty collection. So does a payload that fails
    /// to parse, after it has been copied to `<key>.corrupt`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcontacts::storage::{ContactStore, MemoryStore};
    ///
    /// let store = ContactStore::load(Box::new(MemoryStore::default()), "contacts")?;
    /// assert!(store.is_empty());
    /// # Ok::<(), zcontacts::domain::ContactsError>(())
    /// ```
    pub fn load(mut backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let _span = tracing::debug_span!("contact_store_load", key = %key).entered();

        let contacts = match backend.get(&key)? {
            None => {
                tracing::debug!("no stored contacts, starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Contact>>(&raw) {
                Ok(contacts) => contacts,
                Err(e) => {
                    tracing::warn!(error = %e, "stored contacts are malformed, starting empty");
                    let backup_key = format!("{key}.corrupt");
                    if let Err(e) = backend.set(&backup_key, &raw) {
                        tracing::error!(error = %e, backup_key = %backup_key, "failed to preserve malformed payload");
                    }
                    Vec::new()
                }
            },
        };

        tracing::debug!(count = contacts.len(), "contacts loaded");

        Ok(Self {
            backend,
            key,
            contacts,
        })
    }

    /// Writes the whole collection back to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("contact_store_save", count = self.contacts.len()).entered();

        let json = serde_json::to_string(&self.contacts)
            .map_err(|e| ContactsError::Storage(format!("failed to serialize contacts: {e}")))?;
        self.backend.set(&self.key, &json)
    }

    /// Appends a contact and persists.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::DuplicateId`] if the id is already present
    /// (nothing is changed), or the save error if persisting fails.
    pub fn add(&mut self, contact: Contact) -> Result<()> {
        let _span = tracing::debug_span!("contact_store_add", id = %contact.id).entered();

        if self.find_by_id(&contact.id).is_some() {
            return Err(ContactsError::DuplicateId(contact.id));
        }

        self.contacts.push(contact);
        self.save()
    }

    /// Applies an edit to the contact with `id` and persists.
    ///
    /// Returns `Ok(false)` without writing if no such contact exists.
    ///
    /// # Errors
    ///
    /// Returns the save error if persisting fails.
    pub fn update(&mut self, id: &str, patch: ContactPatch) -> Result<bool> {
        let _span = tracing::debug_span!("contact_store_update", id = %id).entered();

        let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) else {
            tracing::debug!("contact not found");
            return Ok(false);
        };

        contact.apply(patch);
        self.save()?;
        Ok(true)
    }

    /// Removes the contact with `id` and persists.
    ///
    /// Returns `Ok(false)` and leaves the collection untouched if no such
    /// contact exists.
    ///
    /// # Errors
    ///
    /// Returns the save error if persisting fails.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("contact_store_remove", id = %id).entered();

        let Some(index) = self.contacts.iter().position(|c| c.id == id) else {
            tracing::debug!("contact not found");
            return Ok(false);
        };

        self.contacts.remove(index);
        self.save()?;
        Ok(true)
    }

    /// Flips a flag on the contact with `id` and persists.
    ///
    /// Returns the new flag value, or `None` if no such contact exists.
    ///
    /// # Errors
    ///
    /// Returns the save error if persisting fails.
    pub fn toggle_flag(&mut self, id: &str, flag: Flag) -> Result<Option<bool>> {
        let _span = tracing::debug_span!("contact_store_toggle_flag", id = %id, flag = ?flag).entered();

        let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) else {
            tracing::debug!("contact not found");
            return Ok(None);
        };

        let value = match flag {
            Flag::Favorite => {
                contact.is_favorite = !contact.is_favorite;
                contact.is_favorite
            }
            Flag::Emergency => {
                contact.is_emergency = !contact.is_emergency;
                contact.is_emergency
            }
        };

        self.save()?;
        tracing::debug!(value = value, "flag toggled");
        Ok(Some(value))
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Returns the collection in insertion order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> ContactCounts {
        ContactCounts {
            total: self.contacts.len(),
            favorites: self.contacts.iter().filter(|c| c.is_favorite).count(),
            emergency: self.contacts.iter().filter(|c| c.is_emergency).count(),
        }
    }

    /// Returns the first [`SIDE_LIST_LIMIT`] contacts with `flag` set, in
    /// collection order.
    #[must_use]
    pub fn flagged(&self, flag: Flag) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.flag(flag))
            .take(SIDE_LIST_LIMIT)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::MemoryStore;
    use crate::storage::file::FileStore;

    fn empty_store() -> ContactStore {
        ContactStore::load(Box::new(MemoryStore::default()), DEFAULT_STORAGE_KEY).unwrap()
    }

    fn contact(id: &str, name: &str) -> Contact {
        let mut c = Contact::new(name, "01012345678");
        c.id = id.to_string();
        c
    }

    #[test]
    fn loads_existing_array() {
        let json = r#"[{"id":"a","name":"Mona","phone":"01012345678","isFavorite":true}]"#;
        let store = ContactStore::load(
            Box::new(MemoryStore::with_entry("contacts", json)),
            "contacts",
        )
        .unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.contacts()[0].is_favorite);
    }

    #[test]
    fn save_reproduces_loaded_payload() {
        let input = serde_json::json!([
            {
                "id": "_k2j4h5g6f",
                "name": "Mona Said",
                "phone": "01012345678",
                "email": "mona@example.com",
                "address": "12 Nile St",
                "group": "family",
                "notes": "",
                "photo": null,
                "isFavorite": true,
                "isEmergency": false
            },
            {
                "id": "_p9o8i7u6y",
                "name": "Omar Ali",
                "phone": "+201198765432",
                "email": "",
                "address": "",
                "group": "",
                "notes": "night shift",
                "photo": "data:image/png;base64,iVBORw0KGgo=",
                "isFavorite": false,
                "isEmergency": true
            }
        ]);

        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileStore::open(dir.path()).unwrap();
        backend.set("contacts", &input.to_string()).unwrap();

        let mut store = ContactStore::load(Box::new(backend), "contacts").unwrap();
        store.save().unwrap();

        let saved = FileStore::open(dir.path()).unwrap().get("contacts").unwrap().unwrap();
        let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved, input);
    }

    #[test]
    fn added_contact_is_found_unchanged() {
        let mut store = empty_store();
        let mut c = contact("a", "Mona");
        c.email = "mona@example.com".to_string();
        c.is_emergency = true;
        c.photo = Some("data:image/png;base64,AA==".to_string());

        store.add(c.clone()).unwrap();
        assert_eq!(store.find_by_id(&c.id), Some(&c));
    }

    #[test]
    fn add_then_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStore::open(dir.path()).unwrap();
        let mut store = ContactStore::load(Box::new(backend), "contacts").unwrap();
        store.add(contact("a", "Mona")).unwrap();
        store.add(contact("b", "Omar")).unwrap();

        let backend = FileStore::open(dir.path()).unwrap();
        let reopened = ContactStore::load(Box::new(backend), "contacts").unwrap();
        let ids: Vec<&str> = reopened.contacts().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut store = empty_store();
        store.add(contact("a", "Mona")).unwrap();
        let err = store.add(contact("a", "Other")).unwrap_err();

        assert!(matches!(err, ContactsError::DuplicateId(id) if id == "a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut store = empty_store();
        store.add(contact("a", "Mona")).unwrap();

        assert!(!store.remove("zzz").unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.remove("a").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut store = empty_store();
        store.add(contact("a", "Mona")).unwrap();

        assert_eq!(store.toggle_flag("a", Flag::Favorite).unwrap(), Some(true));
        assert_eq!(store.toggle_flag("a", Flag::Favorite).unwrap(), Some(false));
        assert_eq!(store.toggle_flag("a", Flag::Emergency).unwrap(), Some(true));
        assert_eq!(store.toggle_flag("missing", Flag::Emergency).unwrap(), None);
    }

    #[test]
    fn update_keeps_id_and_photo() {
        let mut store = empty_store();
        let mut c = contact("a", "Mona");
        c.photo = Some("data:image/png;base64,AA==".to_string());
        store.add(c).unwrap();

        let updated = store
            .update(
                "a",
                ContactPatch {
                    name: "Mona Said".to_string(),
                    phone: "01112345678".to_string(),
                    ..ContactPatch::default()
                },
            )
            .unwrap();

        assert!(updated);
        let stored = store.find_by_id("a").unwrap();
        assert_eq!(stored.name, "Mona Said");
        assert_eq!(stored.photo.as_deref(), Some("data:image/png;base64,AA=="));
        assert!(!store.update("missing", ContactPatch::default()).unwrap());
    }

    #[test]
    fn malformed_payload_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileStore::open(dir.path()).unwrap();
        backend.set("contacts", "{not json").unwrap();

        let store = ContactStore::load(Box::new(backend.clone()), "contacts").unwrap();
        assert!(store.is_empty());
        assert_eq!(
            backend.get("contacts.corrupt").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn flagged_lists_are_capped_in_order() {
        let mut store = empty_store();
        for i in 0..7 {
            let mut c = contact(&format!("id{i}"), "Friend");
            c.is_favorite = i != 2;
            store.add(c).unwrap();
        }

        let ids: Vec<&str> = store
            .flagged(Flag::Favorite)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["id0", "id1", "id3", "id4", "id5"]);
        assert!(store.flagged(Flag::Emergency).is_empty());
        assert_eq!(
            store.counts(),
            ContactCounts {
                total: 7,
                favorites: 6,
                emergency: 0
            }
        );
    }
}
