use anyhow::{anyhow, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::debug;

mod contacts;
mod schema;

/// Persistence boundary for contacts. No validation happens here; every
/// mutating call commits before returning.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the store at `path`, creating missing parent
    /// directories and the contact table.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        debug!(path = %path.display(), "opening contact database");
        Self::with_connection(Connection::open(path)?)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// `<config dir>/contactbook/contacts.db`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("contactbook").join("contacts.db"))
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::CONTACTS_TABLE)?;
        Ok(Self { conn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;

    fn table_names(db: &Database) -> Vec<String> {
        db.conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn test_open_memory_creates_contacts_table() {
        let db = Database::open_memory().unwrap();
        assert_eq!(table_names(&db), vec!["contacts".to_string()]);
        assert_eq!(db.count_contacts().unwrap(), 0);
    }

    #[test]
    fn test_open_at_creates_file_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.insert_contact(&Contact::new("Alice")).unwrap();
        }
        assert!(path.exists());

        // Reopening keeps existing rows
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.count_contacts().unwrap(), 1);
        assert_eq!(table_names(&db), vec!["contacts".to_string()]);
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        if let Ok(path) = Database::default_path() {
            assert!(path.ends_with("contactbook/contacts.db"));
        }
    }
}
