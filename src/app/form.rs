//! Add/edit form state machine.
//!
//! ```text
//!            add / edit(id)
//!   Closed ─────────────────▶ Open(Create | Edit(id))
//!     ▲                          │
//!     └──── cancel / submit ─────┘
//! ```
//!
//! The form owns its field buffers and the photo selection for the current
//! session. Photo reads are asynchronous: each read gets a request id from the
//! caller and only the most recent id is accepted when results come back.
//! Submitting while a read is in flight validates immediately and defers
//! completion until the read resolves.

use crate::domain::validation::{self, FieldErrors, PhonePolicy};
use crate::domain::{Contact, ContactGroup, ContactPatch};

/// Focusable fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Email,
    Address,
    Group,
    Notes,
    Photo,
    Favorite,
    Emergency,
}

impl FormField {
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::Group,
        Self::Notes,
        Self::Photo,
        Self::Favorite,
        Self::Emergency,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Address => "Address",
            Self::Group => "Group",
            Self::Notes => "Notes",
            Self::Photo => "Photo",
            Self::Favorite => "Favorite",
            Self::Emergency => "Emergency",
        }
    }

    /// Returns `true` for fields edited by typing.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Phone | Self::Email | Self::Address | Self::Notes | Self::Photo
        )
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What a submission creates or changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// A validated form, ready to be applied to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(Contact),
    Update { id: String, patch: ContactPatch },
}

/// Result of asking the form to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are recorded on the form.
    Invalid,
    /// Valid, but a photo read is still pending.
    Waiting,
    Ready(Submission),
}

/// Result of delivering a photo read to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoOutcome {
    /// The request id is not the latest one; nothing changed.
    Stale,
    Loaded,
    Failed,
}

/// Field buffers and selection state of an open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenForm {
    pub mode: FormMode,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub group: Option<ContactGroup>,
    pub notes: String,
    /// Path typed into the photo field.
    pub photo_path: String,
    pub is_favorite: bool,
    pub is_emergency: bool,
    pub focus: FormField,
    pub errors: FieldErrors,
    /// Avatar currently shown in the modal.
    pub preview: Option<String>,
    /// Photo read during this form session, if any.
    new_photo: Option<String>,
    pending_photo: Option<u64>,
    submit_requested: bool,
    /// Transient message shown under the fields.
    pub notice: Option<String>,
}

impl OpenForm {
    /// Opens an empty create form.
    #[must_use]
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            group: None,
            notes: String::new(),
            photo_path: String::new(),
            is_favorite: false,
            is_emergency: false,
            focus: FormField::Name,
            errors: FieldErrors::default(),
            preview: None,
            new_photo: None,
            pending_photo: None,
            submit_requested: false,
            notice: None,
        }
    }

    /// Opens an edit form pre-filled from a stored contact.
    #[must_use]
    pub fn edit(contact: &Contact) -> Self {
        Self {
            mode: FormMode::Edit(contact.id.clone()),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            address: contact.address.clone(),
            group: ContactGroup::parse(&contact.group),
            notes: contact.notes.clone(),
            is_favorite: contact.is_favorite,
            is_emergency: contact.is_emergency,
            preview: contact.photo.clone(),
            ..Self::create()
        }
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    #[must_use]
    pub const fn pending_photo(&self) -> Option<u64> {
        self.pending_photo
    }

    /// Returns `true` once a valid submit is waiting on a photo read.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submit_requested
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Phone => Some(&mut self.phone),
            FormField::Email => Some(&mut self.email),
            FormField::Address => Some(&mut self.address),
            FormField::Notes => Some(&mut self.notes),
            FormField::Photo => Some(&mut self.photo_path),
            FormField::Group | FormField::Favorite | FormField::Emergency => None,
        }
    }

    /// Types a character into the focused field.
    ///
    /// On non-text fields a space toggles the checkbox or cycles the group.
    pub fn insert_char(&mut self, c: char) {
        if let Some(buffer) = self.focused_text_mut() {
            buffer.push(c);
            return;
        }
        if c == ' ' {
            self.toggle();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.focused_text_mut() {
            buffer.pop();
        }
    }

    /// Activates the focused checkbox or steps the group selection.
    pub fn toggle(&mut self) {
        match self.focus {
            FormField::Favorite => self.is_favorite = !self.is_favorite,
            FormField::Emergency => self.is_emergency = !self.is_emergency,
            FormField::Group => self.group = ContactGroup::cycle(self.group, true),
            _ => {}
        }
    }

    pub fn cycle_group(&mut self, forward: bool) {
        self.group = ContactGroup::cycle(self.group, forward);
    }

    /// Marks `request_id` as the latest photo read.
    ///
    /// Any earlier read still in flight becomes stale. The preview is left as
    /// is until the read resolves.
    pub fn begin_photo_read(&mut self, request_id: u64) {
        self.pending_photo = Some(request_id);
        self.notice = Some("Loading photo...".to_string());
    }

    /// Applies the result of a photo read.
    pub fn complete_photo_read(
        &mut self,
        request_id: u64,
        result: std::result::Result<String, String>,
    ) -> PhotoOutcome {
        if self.pending_photo != Some(request_id) {
            tracing::debug!(request_id = request_id, latest = ?self.pending_photo, "discarding stale photo read");
            return PhotoOutcome::Stale;
        }
        self.pending_photo = None;

        match result {
            Ok(data_uri) => {
                self.preview = Some(data_uri.clone());
                self.new_photo = Some(data_uri);
                self.notice = None;
                PhotoOutcome::Loaded
            }
            Err(message) => {
                tracing::warn!(error = %message, "photo read failed, keeping current avatar");
                self.notice = Some(format!("Could not load photo: {message}"));
                PhotoOutcome::Failed
            }
        }
    }

    /// Drops the pending photo read without a result.
    ///
    /// Returns `false` if no read was pending.
    pub fn abandon_photo_read(&mut self, message: &str) -> bool {
        let Some(request_id) = self.pending_photo.take() else {
            return false;
        };
        tracing::warn!(request_id = request_id, error = %message, "photo read abandoned, keeping current avatar");
        self.notice = Some(format!("Could not load photo: {message}"));
        true
    }

    /// Validates the checked fields and, if valid, produces a submission.
    ///
    /// With a photo read pending the submission is deferred: call
    /// [`Self::take_deferred_submission`] after the read resolves.
    pub fn submit(&mut self, policy: &PhonePolicy) -> SubmitOutcome {
        let _span = tracing::debug_span!("form_submit", mode = ?self.mode).entered();

        self.trim_fields();
        if let Err(errors) =
            validation::validate(&self.name, &self.phone, &self.email, policy)
        {
            self.errors = errors;
            self.submit_requested = false;
            return SubmitOutcome::Invalid;
        }
        self.errors = FieldErrors::default();

        if self.pending_photo.is_some() {
            tracing::debug!("photo read pending, deferring submission");
            self.submit_requested = true;
            return SubmitOutcome::Waiting;
        }

        SubmitOutcome::Ready(self.build_submission())
    }

    /// Returns the deferred submission once no photo read is pending.
    pub fn take_deferred_submission(&mut self) -> Option<Submission> {
        if !self.submit_requested || self.pending_photo.is_some() {
            return None;
        }
        self.submit_requested = false;
        Some(self.build_submission())
    }

    fn trim_fields(&mut self) {
        for field in [
            &mut self.name,
            &mut self.phone,
            &mut self.email,
            &mut self.address,
            &mut self.notes,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
    }

    fn build_submission(&self) -> Submission {
        let group = self.group.map(ContactGroup::as_str).unwrap_or_default().to_string();

        match &self.mode {
            FormMode::Create => {
                let mut contact = Contact::new(self.name.clone(), self.phone.clone());
                contact.email.clone_from(&self.email);
                contact.address.clone_from(&self.address);
                contact.group = group;
                contact.notes.clone_from(&self.notes);
                contact.is_favorite = self.is_favorite;
                contact.is_emergency = self.is_emergency;
                contact.photo.clone_from(&self.new_photo);
                Submission::Create(contact)
            }
            FormMode::Edit(id) => Submission::Update {
                id: id.clone(),
                patch: ContactPatch {
                    name: self.name.clone(),
                    phone: self.phone.clone(),
                    email: self.email.clone(),
                    address: self.address.clone(),
                    group,
                    notes: self.notes.clone(),
                    is_favorite: self.is_favorite,
                    is_emergency: self.is_emergency,
                    photo: self.new_photo.clone(),
                },
            },
        }
    }
}

/// Whether the modal form is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    Open(OpenForm),
}

impl FormState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub const fn as_open(&self) -> Option<&OpenForm> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut OpenForm> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }
}
