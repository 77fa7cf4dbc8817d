//! Contact domain model.
//!
//! A [`Contact`] is the single record type of the address book. Its serde
//! representation is the persisted format: a camelCase JSON object per contact,
//! stored together as one JSON array under the storage key.
//!
//! Decoding is lenient so that hand-edited payloads still load: text fields
//! other than `id` may be missing or `null`, flags default to `false`.

use serde::{Deserialize, Deserializer, Serialize};

/// A single address-book record.
///
/// `id` is assigned once at creation and never changes. `name` and `phone`
/// are validated at submit time only; records loaded from storage are taken
/// as they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub address: String,
    /// Storage value of a [`ContactGroup`], or empty.
    #[serde(default, deserialize_with = "nullable_string")]
    pub group: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub notes: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_emergency: bool,
    /// Embedded image as a data URI.
    #[serde(default)]
    pub photo: Option<String>,
}

impl Contact {
    /// Creates a contact with a freshly generated id and no flags or photo.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcontacts::domain::Contact;
    ///
    /// let contact = Contact::new("Mona Said", "01012345678");
    /// assert!(!contact.id.is_empty());
    /// assert!(!contact.is_favorite);
    /// assert!(contact.photo.is_none());
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            phone: phone.into(),
            email: String::new(),
            address: String::new(),
            group: String::new(),
            notes: String::new(),
            is_favorite: false,
            is_emergency: false,
            photo: None,
        }
    }

    /// Returns the uppercased first character of the name, if any.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name
            .trim_start()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
    }

    /// Returns the value of the given flag.
    #[must_use]
    pub const fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Favorite => self.is_favorite,
            Flag::Emergency => self.is_emergency,
        }
    }

    /// Overwrites the editable fields from a patch.
    ///
    /// The photo is replaced only when the patch carries one.
    pub fn apply(&mut self, patch: ContactPatch) {
        self.name = patch.name;
        self.phone = patch.phone;
        self.email = patch.email;
        self.address = patch.address;
        self.group = patch.group;
        self.notes = patch.notes;
        self.is_favorite = patch.is_favorite;
        self.is_emergency = patch.is_emergency;
        if let Some(photo) = patch.photo {
            self.photo = Some(photo);
        }
    }
}

/// Generates an opaque, collection-unique contact id.
#[must_use]
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Field values submitted by an edit.
///
/// `photo` is `None` when the user did not pick a new image, in which case
/// the stored photo is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactPatch {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub group: String,
    pub notes: String,
    pub is_favorite: bool,
    pub is_emergency: bool,
    pub photo: Option<String>,
}

/// The two user-settable boolean flags of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Favorite,
    Emergency,
}

/// The fixed set of groups a contact can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactGroup {
    Family,
    Friends,
    Work,
    Other,
}

impl ContactGroup {
    /// All groups in selection order.
    pub const ALL: [Self; 4] = [Self::Family, Self::Friends, Self::Work, Self::Other];

    /// Returns the value persisted in [`Contact::group`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Friends => "friends",
            Self::Work => "work",
            Self::Other => "other",
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Friends => "Friends",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }

    /// Parses a stored group value. Unknown or empty values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Steps through `None → Family → Friends → Work → Other → None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcontacts::domain::ContactGroup;
    ///
    /// assert_eq!(ContactGroup::cycle(None, true), Some(ContactGroup::Family));
    /// assert_eq!(ContactGroup::cycle(Some(ContactGroup::Other), true), None);
    /// assert_eq!(ContactGroup::cycle(None, false), Some(ContactGroup::Other));
    /// ```
    #[must_use]
    pub fn cycle(current: Option<Self>, forward: bool) -> Option<Self> {
        // Slot 0 is "no group".
        let slots = Self::ALL.len() + 1;
        let index = current
            .and_then(|group| Self::ALL.iter().position(|g| *g == group))
            .map_or(0, |pos| pos + 1);

        let next = if forward {
            (index + 1) % slots
        } else {
            (index + slots - 1) % slots
        };

        next.checked_sub(1).map(|pos| Self::ALL[pos])
    }
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sparse_record() {
        let json = r#"{"id":"_abc123xyz","name":"Ali","phone":"01012345678","email":null}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();

        assert_eq!(contact.id, "_abc123xyz");
        assert_eq!(contact.email, "");
        assert_eq!(contact.address, "");
        assert!(!contact.is_favorite);
        assert!(!contact.is_emergency);
        assert!(contact.photo.is_none());
    }

    #[test]
    fn null_name_and_phone_still_decode() {
        let json = r#"[{"id":"a","name":null,"phone":null},{"id":"b","name":"Ali","phone":"01012345678"}]"#;
        let contacts: Vec<Contact> = serde_json::from_str(json).unwrap();

        assert_eq!(contacts.len(), 2);
        assert!(contacts[0].name.is_empty());
        assert!(contacts[0].phone.is_empty());
        assert_eq!(contacts[0].initial(), None);
        assert_eq!(contacts[1].name, "Ali");
    }

    #[test]
    fn encodes_camel_case_keys_and_null_photo() {
        let mut contact = Contact::new("Sara", "01112345678");
        contact.is_favorite = true;
        let value = serde_json::to_value(&contact).unwrap();

        assert_eq!(value["isFavorite"], serde_json::Value::Bool(true));
        assert_eq!(value["isEmergency"], serde_json::Value::Bool(false));
        assert!(value["photo"].is_null());
    }

    #[test]
    fn apply_keeps_photo_without_new_one() {
        let mut contact = Contact::new("Sara", "01112345678");
        contact.photo = Some("data:image/png;base64,AAAA".to_string());

        contact.apply(ContactPatch {
            name: "Sara Adel".to_string(),
            phone: "01112345679".to_string(),
            ..ContactPatch::default()
        });

        assert_eq!(contact.name, "Sara Adel");
        assert_eq!(contact.photo.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn initial_is_uppercased() {
        let contact = Contact::new("omar", "01012345678");
        assert_eq!(contact.initial(), Some('O'));
    }

    #[test]
    fn group_cycle_visits_every_slot() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            current = ContactGroup::cycle(current, true);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(ContactGroup::Family),
                Some(ContactGroup::Friends),
                Some(ContactGroup::Work),
                Some(ContactGroup::Other),
                None,
            ]
        );
    }

    #[test]
    fn group_parse_ignores_case() {
        assert_eq!(ContactGroup::parse("Work"), Some(ContactGroup::Work));
        assert_eq!(ContactGroup::parse(""), None);
        assert_eq!(ContactGroup::parse("club"), None);
    }
}
