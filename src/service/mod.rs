//! Contact operations exposed to front ends.
//!
//! Every write goes through validation; storage is only touched once the
//! candidate is accepted.

use chrono::Utc;
use tracing::{debug, info};

use crate::db::Database;
use crate::error::{ContactError, ContactResult};
use crate::models::Contact;
use crate::validation;

mod listing;

pub use listing::{Page, SortField};

pub struct ContactService<'a> {
    db: &'a Database,
}

impl<'a> ContactService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every contact in storage order.
    pub fn all(&self) -> ContactResult<Vec<Contact>> {
        Ok(self.db.list_contacts()?)
    }

    pub fn count(&self) -> ContactResult<usize> {
        Ok(self.db.count_contacts()?)
    }

    pub fn get_by_id(&self, id: i64) -> ContactResult<Option<Contact>> {
        if id <= 0 {
            return Err(ContactError::InvalidId);
        }
        Ok(self.db.get_contact_by_id(id)?)
    }

    /// Validate and store a new contact. Any id on the candidate is ignored.
    /// Returns the stored record with its assigned id and timestamps.
    pub fn add(&self, candidate: Contact) -> ContactResult<Contact> {
        let mut contact = candidate;
        contact.normalize_empty();

        let existing = self.db.list_contacts()?;
        let errors = validation::validate(&contact, &existing, None);
        if !errors.is_empty() {
            debug!(first_name = %contact.first_name, errors = errors.len(), "rejected new contact");
            return Err(ContactError::Invalid(errors));
        }

        let now = Utc::now();
        contact.created_at = now;
        contact.updated_at = now;
        contact.id = self.db.insert_contact(&contact)?;

        info!(id = contact.id, "added contact");
        Ok(contact)
    }

    /// Validate and store changes to an existing contact. The original creation
    /// timestamp is kept; the update timestamp is refreshed.
    pub fn update(&self, candidate: Contact) -> ContactResult<Contact> {
        if candidate.id <= 0 {
            return Err(ContactError::InvalidId);
        }

        let original = self
            .db
            .get_contact_by_id(candidate.id)?
            .ok_or(ContactError::NotFound)?;

        let mut contact = candidate;
        contact.normalize_empty();

        let existing = self.db.list_contacts()?;
        let errors = validation::validate(&contact, &existing, Some(contact.id));
        if !errors.is_empty() {
            debug!(id = contact.id, errors = errors.len(), "rejected contact update");
            return Err(ContactError::Invalid(errors));
        }

        contact.created_at = original.created_at;
        // Never earlier than the stored value
        contact.updated_at = Utc::now().max(original.updated_at);

        if !self.db.replace_contact(&contact)? {
            return Err(ContactError::NotFound);
        }

        info!(id = contact.id, "updated contact");
        Ok(contact)
    }

    /// Returns `false` when the id is invalid or nothing was stored under it.
    pub fn delete(&self, id: i64) -> ContactResult<bool> {
        if id <= 0 {
            return Ok(false);
        }
        if self.db.get_contact_by_id(id)?.is_none() {
            return Ok(false);
        }

        let deleted = self.db.delete_contact(id)?;
        if deleted {
            info!(id, "deleted contact");
        }
        Ok(deleted)
    }

    /// Case-insensitive substring match on first name, last name, company and
    /// email, or a raw substring match on either phone. A blank term returns
    /// everything in storage order.
    pub fn search(&self, term: &str) -> ContactResult<Vec<Contact>> {
        let all = self.db.list_contacts()?;
        if term.trim().is_empty() {
            return Ok(all);
        }

        let lowered = term.to_lowercase();
        let text_match = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(&lowered))
        };
        let phone_match =
            |field: &Option<String>| field.as_deref().is_some_and(|v| v.contains(term));

        Ok(all
            .into_iter()
            .filter(|c| {
                c.first_name.to_lowercase().contains(&lowered)
                    || text_match(&c.last_name)
                    || text_match(&c.company)
                    || text_match(&c.email)
                    || phone_match(&c.primary_phone)
                    || phone_match(&c.secondary_phone)
            })
            .collect())
    }
}
