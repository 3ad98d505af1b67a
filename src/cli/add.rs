use anyhow::{anyhow, Result};

use crate::cli::display::print_errors;
use crate::cli::ContactFields;
use crate::db::Database;
use crate::models::Contact;
use crate::service::ContactService;

/// Execute the add command
pub fn run_add(db: &Database, fields: ContactFields) -> Result<Contact> {
    let mut candidate = Contact::default();
    fields.apply_to(&mut candidate);

    match ContactService::new(db).add(candidate) {
        Ok(stored) => {
            println!("Created: {} (#{})", stored.full_name(), stored.id);
            Ok(stored)
        }
        Err(e) => {
            eprintln!("Contact not saved:");
            print_errors(&e);
            if e.is_duplicate() {
                eprintln!("Use `contactbook search <phone>` to find the existing contact.");
            }
            Err(anyhow!(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContactError;

    #[test]
    fn test_add_trims_values() {
        let db = Database::open_memory().unwrap();
        let fields = ContactFields {
            first: Some("  Ada ".to_string()),
            last: Some(" Lovelace".to_string()),
            phone: Some(" +44 20 7946 0958 ".to_string()),
            company: Some("   ".to_string()),
            ..Default::default()
        };

        let stored = run_add(&db, fields).unwrap();
        assert_eq!(stored.full_name(), "Ada Lovelace");
        assert_eq!(stored.primary_phone.as_deref(), Some("+44 20 7946 0958"));
        assert!(stored.company.is_none());
    }

    #[test]
    fn test_add_without_first_name_fails() {
        let db = Database::open_memory().unwrap();
        let err = run_add(&db, ContactFields::default()).unwrap_err();

        let err = err.downcast::<ContactError>().unwrap();
        assert_eq!(err.messages(), vec!["First name is required"]);
        assert_eq!(ContactService::new(&db).count().unwrap(), 0);
    }
}
