//! Domain layer for the contacts plugin.
//!
//! Core types and pure rules, independent of Zellij APIs and storage.
//!
//! # Organization
//!
//! - [`contact`]: Contact record, groups, flags, and edit patches
//! - [`error`]: Error types and result alias
//! - [`photo`]: Image file to data URI encoding
//! - [`search`]: Search predicate over the contact collection
//! - [`validation`]: Name, phone, and email checks

pub mod contact;
pub mod error;
pub mod photo;
pub mod search;
pub mod validation;

pub use contact::{Contact, ContactGroup, ContactPatch, Flag};
pub use error::{ContactsError, Result};
pub use validation::{FieldErrors, PhonePolicy, ValidationError};
