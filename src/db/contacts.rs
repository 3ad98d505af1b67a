use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tracing::debug;

use super::Database;
use crate::models::Contact;

/// Helper to convert timestamp parse errors to rusqlite errors
fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl Database {
    // ==================== CREATE ====================

    /// Insert a contact and return the identifier assigned by SQLite.
    /// Any `id` already on the contact is ignored.
    pub fn insert_contact(&self, contact: &Contact) -> Result<i64> {
        self.conn.execute(
            r#"INSERT INTO contacts (
                first_name, last_name, company, primary_phone, secondary_phone,
                email, address, notes, photo_path, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            params![
                contact.first_name,
                contact.last_name,
                contact.company,
                contact.primary_phone,
                contact.secondary_phone,
                contact.email,
                contact.address,
                contact.notes,
                contact.photo_path,
                contact.created_at.to_rfc3339(),
                contact.updated_at.to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted contact");
        Ok(id)
    }

    // ==================== READ ====================

    /// All contacts in storage order.
    pub fn list_contacts(&self) -> Result<Vec<Contact>> {
        let mut stmt = self.conn.prepare("SELECT * FROM contacts ORDER BY id ASC")?;

        let contacts = stmt
            .query_map([], Self::row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    pub fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>> {
        let mut stmt = self.conn.prepare("SELECT * FROM contacts WHERE id = ?")?;

        let result = stmt.query_row([id], Self::row_to_contact);

        match result {
            Ok(contact) => Ok(Some(contact)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn count_contacts(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ==================== UPDATE ====================

    /// Overwrite the stored row with the same id. Returns `false` (and changes
    /// nothing) when no such row exists.
    pub fn replace_contact(&self, contact: &Contact) -> Result<bool> {
        let rows = self.conn.execute(
            r#"UPDATE contacts SET
                first_name = ?, last_name = ?, company = ?, primary_phone = ?,
                secondary_phone = ?, email = ?, address = ?, notes = ?,
                photo_path = ?, created_at = ?, updated_at = ?
               WHERE id = ?"#,
            params![
                contact.first_name,
                contact.last_name,
                contact.company,
                contact.primary_phone,
                contact.secondary_phone,
                contact.email,
                contact.address,
                contact.notes,
                contact.photo_path,
                contact.created_at.to_rfc3339(),
                contact.updated_at.to_rfc3339(),
                contact.id,
            ],
        )?;
        debug!(id = contact.id, rows, "replaced contact");
        Ok(rows > 0)
    }

    // ==================== DELETE ====================

    pub fn delete_contact(&self, id: i64) -> Result<bool> {
        let rows = self.conn.execute("DELETE FROM contacts WHERE id = ?", [id])?;
        debug!(id, rows, "deleted contact");
        Ok(rows > 0)
    }

    // ==================== ROW MAPPERS ====================

    fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(Contact {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            company: row.get("company")?,
            primary_phone: row.get("primary_phone")?,
            secondary_phone: row.get("secondary_phone")?,
            email: row.get("email")?,
            address: row.get("address")?,
            notes: row.get("notes")?,
            photo_path: row.get("photo_path")?,
            created_at: parse_timestamp(10, &created_at)?,
            updated_at: parse_timestamp(11, &updated_at)?,
        })
    }
}
