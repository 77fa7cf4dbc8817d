//! Error types for the contacts plugin.
//!
//! This module defines the centralized error type [`ContactsError`] and a type alias
//! [`Result`] used throughout the crate. Form validation failures are not errors
//! in this sense; they are collected as [`FieldErrors`](super::validation::FieldErrors)
//! and shown inline.

use thiserror::Error;

/// The main error type for contact manager operations.
///
/// Most variants carry a description string; I/O and JSON failures wrap the
/// underlying error via `#[from]` so `?` converts them automatically.
///
/// # Examples
///
/// ```
/// use zcontacts::domain::ContactsError;
///
/// fn read_storage() -> Result<(), ContactsError> {
///     Err(ContactsError::Storage("failed to read key".to_string()))
/// }
/// assert!(read_storage().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ContactsError {
    /// Reading from or writing to the key-value backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing or parsing a JSON payload failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A contact with this id already exists in the collection.
    #[error("Duplicate contact id: {0}")]
    DuplicateId(String),

    /// A selected photo file could not be read or encoded.
    #[error("Photo read error: {0}")]
    PhotoRead(String),
}

/// A specialized `Result` type for contact manager operations.
pub type Result<T> = std::result::Result<T, ContactsError>;
