use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single address-book entry.
///
/// `id` is assigned by storage; a value `<= 0` means the record has not been
/// persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub primary_phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    /// Filesystem path to a photo. Stored as opaque text.
    pub photo_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(first_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: None,
            company: None,
            primary_phone: None,
            secondary_phone: None,
            email: None,
            address: None,
            notes: None,
            photo_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// "First Last", or just the first name when there is no last name.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) => format!("{} {}", self.first_name, last).trim().to_string(),
            None => self.first_name.trim().to_string(),
        }
    }

    /// Non-empty phone numbers, primary first.
    pub fn phones(&self) -> impl Iterator<Item = &str> {
        [self.primary_phone.as_deref(), self.secondary_phone.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
    }

    /// Convert empty or whitespace-only optional fields to `None`.
    pub fn normalize_empty(&mut self) {
        for field in [
            &mut self.last_name,
            &mut self.company,
            &mut self.primary_phone,
            &mut self.secondary_phone,
            &mut self.email,
            &mut self.address,
            &mut self.notes,
            &mut self.photo_path,
        ] {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let mut c = Contact::new("John");
        assert_eq!(c.full_name(), "John");
        c.last_name = Some("Smith".to_string());
        assert_eq!(c.full_name(), "John Smith");
    }

    #[test]
    fn test_phones_skips_empty() {
        let mut c = Contact::new("John");
        c.primary_phone = Some(String::new());
        c.secondary_phone = Some("+1234567890".to_string());
        assert_eq!(c.phones().collect::<Vec<_>>(), vec!["+1234567890"]);
    }

    #[test]
    fn test_normalize_empty() {
        let mut c = Contact::new("John");
        c.company = Some("   ".to_string());
        c.notes = Some("keep".to_string());
        c.normalize_empty();
        assert!(c.company.is_none());
        assert_eq!(c.notes.as_deref(), Some("keep"));
    }

    #[test]
    fn test_new_is_unsaved() {
        let c = Contact::new("John");
        assert_eq!(c.id, 0);
        assert_eq!(c.created_at, c.updated_at);
    }
}
