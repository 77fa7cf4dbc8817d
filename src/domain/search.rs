//! Contact search predicate.
//!
//! Filtering is a plain case-insensitive substring match over the searchable
//! text fields of a contact. Results keep the order of the source collection.

use crate::domain::Contact;

/// Returns the contacts visible for a search term.
///
/// An empty or whitespace-only term returns every contact. Otherwise a contact
/// is kept if the trimmed, lowercased term occurs in its name, phone, email,
/// address, or group. Empty optional fields never match.
///
/// # Examples
///
/// ```
/// use zcontacts::domain::{Contact, search::visible_contacts};
///
/// let contacts = vec![
///     Contact::new("Mona Said", "01012345678"),
///     Contact::new("Omar Ali", "01198765432"),
/// ];
///
/// assert_eq!(visible_contacts(&contacts, "").len(), 2);
/// assert_eq!(visible_contacts(&contacts, "omar")[0].name, "Omar Ali");
/// assert!(visible_contacts(&contacts, "zzz").is_empty());
/// ```
#[must_use]
pub fn visible_contacts<'a>(contacts: &'a [Contact], term: &str) -> Vec<&'a Contact> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return contacts.iter().collect();
    }

    contacts
        .iter()
        .filter(|contact| matches_term(contact, &term))
        .collect()
}

/// Returns `true` if any searchable field contains the already-lowercased term.
fn matches_term(contact: &Contact, term: &str) -> bool {
    [
        &contact.name,
        &contact.phone,
        &contact.email,
        &contact.address,
        &contact.group,
    ]
    .into_iter()
    .any(|field| !field.is_empty() && field.to_lowercase().contains(term))
}

/// Returns the character range `(start, end)` of the first case-insensitive
/// occurrence of `term` in `text`.
///
/// Used for highlighting matched names. Returns `None` for an empty term or
/// when the term does not occur.
///
/// # Examples
///
/// ```
/// use zcontacts::domain::search::match_range;
///
/// assert_eq!(match_range("Mona Said", "said"), Some((5, 9)));
/// assert_eq!(match_range("Mona Said", "x"), None);
/// ```
#[must_use]
pub fn match_range(text: &str, term: &str) -> Option<(usize, usize)> {
    let term: Vec<char> = term.trim().chars().flat_map(char::to_lowercase).collect();
    if term.is_empty() {
        return None;
    }

    // Compare per character so the range stays in character units.
    let chars: Vec<char> = text
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();

    chars
        .windows(term.len())
        .position(|window| window == term.as_slice())
        .map(|start| (start, start + term.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Contact> {
        let mut mona = Contact::new("Mona Said", "01012345678");
        mona.email = "mona@example.com".to_string();
        mona.group = "family".to_string();

        let mut omar = Contact::new("Omar Ali", "01198765432");
        omar.address = "12 Nile Street, Cairo".to_string();
        omar.group = "work".to_string();

        let hany = Contact::new("Hany", "01234567890");

        vec![mona, omar, hany]
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let contacts = sample();
        let names: Vec<&str> = visible_contacts(&contacts, "   ")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Mona Said", "Omar Ali", "Hany"]);
    }

    #[test]
    fn matches_each_searchable_field() {
        let contacts = sample();
        assert_eq!(visible_contacts(&contacts, "MONA")[0].name, "Mona Said");
        assert_eq!(visible_contacts(&contacts, "0119")[0].name, "Omar Ali");
        assert_eq!(visible_contacts(&contacts, "example.com")[0].name, "Mona Said");
        assert_eq!(visible_contacts(&contacts, "cairo")[0].name, "Omar Ali");
        assert_eq!(visible_contacts(&contacts, "Work")[0].name, "Omar Ali");
    }

    #[test]
    fn does_not_match_notes() {
        let mut contacts = sample();
        contacts[2].notes = "met at conference".to_string();
        assert!(visible_contacts(&contacts, "conference").is_empty());
    }

    #[test]
    fn preserves_source_order_for_multiple_hits() {
        let contacts = sample();
        let names: Vec<&str> = visible_contacts(&contacts, "a")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Mona Said", "Omar Ali", "Hany"]);
    }

    #[test]
    fn match_range_is_in_characters() {
        assert_eq!(match_range("Zoë Adams", "adams"), Some((4, 9)));
        assert_eq!(match_range("Hany", ""), None);
    }
}
