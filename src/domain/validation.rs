//! Field validation for submitted contact forms.
//!
//! Three pure predicates check name, phone, and email formats. The phone check
//! goes through a [`PhonePolicy`] so the accepted number format can be
//! configured; the default accepts Egyptian mobile numbers.
//!
//! Validation runs only when a form is submitted. Stored records are never
//! re-validated.

use crate::domain::error::{ContactsError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Default mobile-number pattern: optional `+20` or `0` prefix, then `1` and nine digits.
pub const DEFAULT_PHONE_PATTERN: &str = r"^(?:\+20|0)?1[0-9]{9}$";

static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z ]{2,50}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static DEFAULT_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_PHONE_PATTERN).unwrap());

/// Returns `true` if the name is 2–50 ASCII letters or spaces.
///
/// # Examples
///
/// ```
/// use zcontacts::domain::validation::is_valid_name;
///
/// assert!(is_valid_name("Mona Said"));
/// assert!(!is_valid_name("M"));
/// assert!(!is_valid_name("R2D2"));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// Returns `true` if the phone number matches the default policy.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    DEFAULT_PHONE_REGEX.is_match(phone)
}

/// Returns `true` if the email is empty or has a `local@domain.tld` shape.
///
/// # Examples
///
/// ```
/// use zcontacts::domain::validation::is_valid_email;
///
/// assert!(is_valid_email(""));
/// assert!(is_valid_email("a@b.com"));
/// assert!(!is_valid_email("a@b"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_REGEX.is_match(email)
}

/// Accepted phone-number format.
#[derive(Debug, Clone)]
pub struct PhonePolicy {
    regex: Regex,
}

impl PhonePolicy {
    /// Builds a policy from a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::Config`] if the pattern does not compile.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|e| ContactsError::Config(format!("invalid phone_pattern: {e}")))
    }

    /// Returns `true` if the phone number is accepted by this policy.
    #[must_use]
    pub fn is_valid(&self, phone: &str) -> bool {
        self.regex.is_match(phone)
    }

    /// Returns the underlying pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for PhonePolicy {
    fn default() -> Self {
        Self {
            regex: DEFAULT_PHONE_REGEX.clone(),
        }
    }
}

/// A single failed field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Name,
    Phone,
    Email,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Name => "Name must be 2-50 letters and spaces",
            Self::Phone => "Enter a valid mobile number",
            Self::Email => "Enter a valid email address",
        };
        f.write_str(message)
    }
}

/// Per-field outcome of validating a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: bool,
    pub phone: bool,
    pub email: bool,
}

impl FieldErrors {
    /// Returns `true` if no field failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.name || self.phone || self.email)
    }

    /// Returns the failed checks in form order.
    #[must_use]
    pub fn errors(&self) -> Vec<ValidationError> {
        [
            (self.name, ValidationError::Name),
            (self.phone, ValidationError::Phone),
            (self.email, ValidationError::Email),
        ]
        .into_iter()
        .filter_map(|(failed, error)| failed.then_some(error))
        .collect()
    }
}

/// Validates the three checked fields of a form submission.
///
/// Inputs are expected to be trimmed already.
///
/// # Errors
///
/// Returns the [`FieldErrors`] describing every failed field.
pub fn validate(
    name: &str,
    phone: &str,
    email: &str,
    policy: &PhonePolicy,
) -> std::result::Result<(), FieldErrors> {
    let errors = FieldErrors {
        name: !is_valid_name(name),
        phone: !policy.is_valid(phone),
        email: !is_valid_email(email),
    };

    tracing::debug!(
        name_ok = !errors.name,
        phone_ok = !errors.phone,
        email_ok = !errors.email,
        "form validated"
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_letters_and_spaces_within_bounds() {
        assert!(is_valid_name("Al"));
        assert!(is_valid_name("Mona Said"));
        assert!(is_valid_name(&"a".repeat(50)));
    }

    #[test]
    fn name_rejects_digits_symbols_and_bad_lengths() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("A"));
        assert!(!is_valid_name(&"a".repeat(51)));
        assert!(!is_valid_name("Mona2"));
        assert!(!is_valid_name("Mona-Said"));
        assert!(!is_valid_name("Moná"));
    }

    #[test]
    fn phone_examples() {
        assert!(is_valid_phone("01012345678"));
        assert!(is_valid_phone("+201123456789"));
        assert!(is_valid_phone("1012345678"));
        assert!(!is_valid_phone("0101234567"));
        assert!(!is_valid_phone("02012345678"));
        assert!(!is_valid_phone("+2001012345678"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn email_examples() {
        assert!(is_valid_email(""));
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn custom_policy_replaces_default() {
        let policy = PhonePolicy::from_pattern(r"^\d{3}-\d{4}$").unwrap();
        assert!(policy.is_valid("555-1234"));
        assert!(!policy.is_valid("01012345678"));
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let err = PhonePolicy::from_pattern("(").unwrap_err();
        assert!(matches!(err, ContactsError::Config(_)));
    }

    #[test]
    fn validate_reports_every_failed_field() {
        let errors = validate("X", "123", "nope", &PhonePolicy::default()).unwrap_err();
        assert_eq!(
            errors.errors(),
            vec![ValidationError::Name, ValidationError::Phone, ValidationError::Email]
        );

        assert!(validate("Mona", "01012345678", "", &PhonePolicy::default()).is_ok());
    }
}
