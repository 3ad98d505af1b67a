/// The contact table. Every statement is idempotent, so it runs on each open.
pub const CONTACTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT,
    company TEXT,
    primary_phone TEXT,
    secondary_phone TEXT,
    email TEXT,
    address TEXT,
    notes TEXT,
    photo_path TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
