use anyhow::Result;

use crate::cli::display::print_full_contact;
use crate::db::Database;
use crate::service::ContactService;

/// Execute the show command
pub fn run_show(db: &Database, id: i64, json: bool) -> Result<()> {
    let contact = match ContactService::new(db).get_by_id(id)? {
        Some(c) => c,
        None => {
            println!("No contact found with ID: {}", id);
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else {
        print_full_contact(&contact);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;

    #[test]
    fn test_show_existing_and_missing() {
        let db = Database::open_memory().unwrap();
        let stored = ContactService::new(&db).add(Contact::new("John")).unwrap();

        run_show(&db, stored.id, false).unwrap();
        run_show(&db, stored.id, true).unwrap();
        run_show(&db, stored.id + 1, false).unwrap();
    }

    #[test]
    fn test_show_rejects_invalid_id() {
        let db = Database::open_memory().unwrap();
        let err = run_show(&db, 0, false).unwrap_err();
        assert_eq!(err.to_string(), "Invalid contact ID");
    }

    #[test]
    fn test_json_uses_field_names() {
        let mut c = Contact::new("John");
        c.email = Some("john@example.com".to_string());
        let value: serde_json::Value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["first_name"], "John");
        assert_eq!(value["email"], "john@example.com");
        assert!(value["company"].is_null());
    }
}
