//! Field rules and the phone-uniqueness policy for contacts.
//!
//! Every rule is evaluated on every call; the result is the ordered list of
//! distinct failures, empty when the contact is acceptable.

use std::str::FromStr;

use thiserror::Error;

use crate::models::Contact;

pub const FIRST_NAME_MIN: usize = 2;
pub const FIRST_NAME_MAX: usize = 100;
/// Bounds on the cleaned phone text, `+` included.
pub const PHONE_LEN_MIN: usize = 10;
pub const PHONE_LEN_MAX: usize = 15;

/// A single rule violation. The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("First name is required")]
    FirstNameRequired,

    #[error("First name must be between 2 and 100 characters")]
    FirstNameLength,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid primary phone format")]
    InvalidPrimaryPhone,

    #[error("Invalid secondary phone format")]
    InvalidSecondaryPhone,

    /// Another contact already uses one of the candidate's phone numbers.
    #[error("Phone number already exists for contact: {name}")]
    DuplicatePhone { name: String },
}

impl ValidationError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicatePhone { .. })
    }
}

/// Run every rule against `candidate`.
///
/// `existing` is the full contact set; the record whose id equals
/// `exclude_id` (the one being updated) is ignored by the duplicate check.
pub fn validate(
    candidate: &Contact,
    existing: &[Contact],
    exclude_id: Option<i64>,
) -> Vec<ValidationError> {
    let mut errors = check_fields(candidate);
    if let Some(dup) = find_duplicate_phone(candidate, existing, exclude_id) {
        errors.push(dup);
    }

    let mut distinct = Vec::with_capacity(errors.len());
    for e in errors {
        if !distinct.contains(&e) {
            distinct.push(e);
        }
    }
    distinct
}

/// Field-level rules only (no access to other records).
pub fn check_fields(contact: &Contact) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let first = contact.first_name.trim();
    if first.is_empty() {
        errors.push(ValidationError::FirstNameRequired);
    } else {
        let len = first.chars().count();
        if !(FIRST_NAME_MIN..=FIRST_NAME_MAX).contains(&len) {
            errors.push(ValidationError::FirstNameLength);
        }
    }

    if let Some(email) = non_empty(&contact.email) {
        if !is_valid_email(email) {
            errors.push(ValidationError::InvalidEmail);
        }
    }

    if let Some(phone) = non_empty(&contact.primary_phone) {
        if !is_valid_phone(phone) {
            errors.push(ValidationError::InvalidPrimaryPhone);
        }
    }

    if let Some(phone) = non_empty(&contact.secondary_phone) {
        if !is_valid_phone(phone) {
            errors.push(ValidationError::InvalidSecondaryPhone);
        }
    }

    errors
}

/// Find the first other contact whose primary or secondary phone equals either
/// of the candidate's phones. Comparison is exact on the stored text.
pub fn find_duplicate_phone(
    candidate: &Contact,
    existing: &[Contact],
    exclude_id: Option<i64>,
) -> Option<ValidationError> {
    let wanted: Vec<&str> = candidate.phones().collect();
    if wanted.is_empty() {
        return None;
    }

    existing
        .iter()
        .filter(|c| Some(c.id) != exclude_id)
        .find(|c| c.phones().any(|p| wanted.contains(&p)))
        .map(|c| ValidationError::DuplicatePhone {
            name: c.full_name(),
        })
}

/// The address must parse as a single mailbox address whose canonical form is
/// the input itself (so display-name forms like `Bob <bob@x.com>` are rejected).
pub fn is_valid_email(email: &str) -> bool {
    lettre::Address::from_str(email)
        .map(|addr| addr.to_string() == email)
        .unwrap_or(false)
}

/// Keep digits and `+`; what remains must be 10-15 characters long.
pub fn is_valid_phone(phone: &str) -> bool {
    let len = normalize_phone(phone).chars().count();
    (PHONE_LEN_MIN..=PHONE_LEN_MAX).contains(&len)
}

/// Strip formatting characters, keeping only digits and `+`.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first: &str) -> Contact {
        Contact::new(first)
    }

    fn stored(id: i64, first: &str, last: Option<&str>, primary: Option<&str>, secondary: Option<&str>) -> Contact {
        let mut c = Contact::new(first);
        c.id = id;
        c.last_name = last.map(String::from);
        c.primary_phone = primary.map(String::from);
        c.secondary_phone = secondary.map(String::from);
        c
    }

    #[test]
    fn test_valid_contact_has_no_errors() {
        let mut c = contact("John");
        c.email = Some("john.doe@example.com".to_string());
        c.primary_phone = Some("+1 (234) 567-890".to_string());
        assert!(validate(&c, &[], None).is_empty());
    }

    #[test]
    fn test_first_name_required() {
        for name in ["", "   "] {
            assert_eq!(check_fields(&contact(name)), vec![ValidationError::FirstNameRequired]);
        }
    }

    #[test]
    fn test_first_name_length_bounds() {
        assert_eq!(check_fields(&contact("J")), vec![ValidationError::FirstNameLength]);
        assert_eq!(check_fields(&contact(" J ")), vec![ValidationError::FirstNameLength]);
        assert!(check_fields(&contact("Jo")).is_empty());
        assert!(check_fields(&contact(&"a".repeat(100))).is_empty());
        assert_eq!(
            check_fields(&contact(&"a".repeat(101))),
            vec![ValidationError::FirstNameLength]
        );
    }

    #[test]
    fn test_first_name_counts_characters_not_bytes() {
        // 50 two-byte characters
        assert!(check_fields(&contact(&"é".repeat(50))).is_empty());
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name+tag@domain.co.uk"));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email("Bob <bob@example.com>"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn test_empty_email_is_not_checked() {
        let mut c = contact("John");
        c.email = Some(String::new());
        assert!(check_fields(&c).is_empty());
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("+1234567890"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("phone"));
        assert_eq!(normalize_phone("+1 (555) 123-4567 ext"), "+15551234567");
    }

    #[test]
    fn test_phone_length_counts_plus_sign() {
        // Nine digits plus the sign make ten characters
        assert!(is_valid_phone("+123456789"));
        assert!(is_valid_phone("+12345678901234"));
        // Fifteen digits plus the sign make sixteen
        assert!(!is_valid_phone("+123456789012345"));
        assert!(!is_valid_phone("+12345678"));
        assert!(is_valid_phone("+1 (23) 456-789"));
    }

    #[test]
    fn test_all_rules_evaluated() {
        let mut c = contact("J");
        c.email = Some("bad".to_string());
        c.primary_phone = Some("123".to_string());
        c.secondary_phone = Some("456".to_string());

        let errors = check_fields(&c);
        assert_eq!(
            errors,
            vec![
                ValidationError::FirstNameLength,
                ValidationError::InvalidEmail,
                ValidationError::InvalidPrimaryPhone,
                ValidationError::InvalidSecondaryPhone,
            ]
        );
    }

    #[test]
    fn test_duplicate_primary_matches_other_secondary() {
        let existing = vec![stored(1, "John", Some("Doe"), Some("+1111111111"), Some("+1234567890"))];
        let mut c = contact("Jane");
        c.primary_phone = Some("+1234567890".to_string());

        let errors = validate(&c, &existing, None);
        assert_eq!(
            errors,
            vec![ValidationError::DuplicatePhone { name: "John Doe".to_string() }]
        );
        assert!(errors[0].is_duplicate());
        assert_eq!(errors[0].to_string(), "Phone number already exists for contact: John Doe");
    }

    #[test]
    fn test_duplicate_secondary_matches_other_primary() {
        let existing = vec![stored(1, "John", None, Some("+1234567890"), None)];
        let mut c = contact("Jane");
        c.secondary_phone = Some("+1234567890".to_string());

        let errors = validate(&c, &existing, None);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("John"));
    }

    #[test]
    fn test_single_duplicate_message_when_both_phones_collide() {
        let existing = vec![
            stored(1, "John", None, Some("+1234567890"), None),
            stored(2, "Mary", None, Some("+1987654321"), None),
        ];
        let mut c = contact("Jane");
        c.primary_phone = Some("+1234567890".to_string());
        c.secondary_phone = Some("+1987654321".to_string());

        let errors = validate(&c, &existing, None);
        assert_eq!(errors.iter().filter(|e| e.is_duplicate()).count(), 1);
    }

    #[test]
    fn test_duplicate_check_excludes_self() {
        let existing = vec![stored(1, "John", None, Some("+1234567890"), None)];
        let me = stored(1, "John", None, Some("+1234567890"), None);
        assert!(validate(&me, &existing, Some(1)).is_empty());
    }

    #[test]
    fn test_empty_phones_never_collide() {
        let existing = vec![stored(1, "John", None, Some(""), None)];
        let mut c = contact("Jane");
        c.primary_phone = Some(String::new());
        assert!(find_duplicate_phone(&c, &existing, None).is_none());
    }

    #[test]
    fn test_duplicate_reported_alongside_field_errors() {
        let existing = vec![stored(1, "John", None, Some("+1234567890"), None)];
        let mut c = contact("J");
        c.primary_phone = Some("+1234567890".to_string());

        let errors = validate(&c, &existing, None);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ValidationError::FirstNameLength);
        assert!(errors[1].is_duplicate());
    }
}
