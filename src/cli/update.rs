use anyhow::{anyhow, Result};

use crate::cli::display::print_errors;
use crate::cli::ContactFields;
use crate::db::Database;
use crate::models::Contact;
use crate::service::ContactService;

/// Execute the update command. Only the supplied fields change.
pub fn run_update(db: &Database, id: i64, fields: ContactFields) -> Result<Option<Contact>> {
    if fields.is_empty() {
        return Err(anyhow!(
            "No updates provided. Use --first, --last, --company, --phone, --secondary-phone, --email, --address, --notes or --photo."
        ));
    }

    let service = ContactService::new(db);
    let mut contact = match service.get_by_id(id)? {
        Some(c) => c,
        None => {
            println!("No contact found with ID: {}", id);
            return Ok(None);
        }
    };

    fields.apply_to(&mut contact);

    match service.update(contact) {
        Ok(stored) => {
            println!("Updated: {}", stored.full_name());
            Ok(Some(stored))
        }
        Err(e) => {
            eprintln!("Contact not saved:");
            print_errors(&e);
            Err(anyhow!(e))
        }
    }
}
