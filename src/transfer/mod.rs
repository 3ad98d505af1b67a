//! CSV import and export on top of the contact service.
//!
//! Import feeds each decoded row through [`ContactService::add`], so imported
//! rows get the same validation and duplicate checks as interactive entry.
//! Rows committed before a failure stay committed.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::error::ContactError;
use crate::models::Contact;
use crate::service::ContactService;

pub mod codec;

pub use codec::{DecodedRow, COLUMNS};

/// Outcome of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// `false` only for file-level failures; rejected rows do not clear it.
    pub success: bool,
    pub message: String,
    pub imported: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    fn failed(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            imported: 0,
            errors,
        }
    }
}

/// Outcome of a CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub success: bool,
    pub message: String,
    pub exported: usize,
}

impl ExportReport {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            exported: 0,
        }
    }
}

/// Result of checking a CSV file's structure without importing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvCheck {
    pub valid: bool,
    pub message: String,
    pub row_count: usize,
}

impl CsvCheck {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            row_count: 0,
        }
    }
}

const EMPTY_FILE: &str = "CSV file is empty or has no data rows";

pub struct ContactTransfer<'a> {
    contacts: ContactService<'a>,
}

impl<'a> ContactTransfer<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            contacts: ContactService::new(db),
        }
    }

    /// Write `contacts` (or every stored contact when `None`) to `path`. The
    /// file is either written completely or left untouched.
    pub fn export_to_csv(&self, path: impl AsRef<Path>, contacts: Option<&[Contact]>) -> ExportReport {
        let path = path.as_ref();

        let all;
        let contacts = match contacts {
            Some(given) => given,
            None => match self.contacts.all() {
                Ok(stored) => {
                    all = stored;
                    &all
                }
                Err(e) => return ExportReport::failed(format!("Export failed: {}", e)),
            },
        };

        if contacts.is_empty() {
            return ExportReport::failed("No contacts to export");
        }

        match write_replacing(path, contacts) {
            Ok(()) => {
                info!(count = contacts.len(), path = %path.display(), "exported contacts");
                ExportReport {
                    success: true,
                    message: format!(
                        "Successfully exported {} contacts to {}",
                        contacts.len(),
                        path.display()
                    ),
                    exported: contacts.len(),
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                ExportReport::failed(format!("Export failed: {:#}", e))
            }
        }
    }

    /// Import every data row of the CSV file at `path`.
    ///
    /// With `skip_duplicates`, duplicate-phone rejections are dropped silently;
    /// any other errors on the same row are still reported.
    pub fn import_from_csv(&self, path: impl AsRef<Path>, skip_duplicates: bool) -> ImportReport {
        let path = path.as_ref();
        if !path.exists() {
            return ImportReport::failed("File not found", vec!["File does not exist".to_string()]);
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => return ImportReport::failed(format!("Import failed: {}", e), Vec::new()),
        };
        let content = codec::strip_bom(&content);

        if content.lines().count() < 2 {
            return ImportReport::failed(EMPTY_FILE, vec!["No data to import".to_string()]);
        }

        let mut imported = 0;
        let mut errors = Vec::new();

        for row in codec::decode(content) {
            let (line, contact) = match row {
                DecodedRow::Parsed { line, contact } => (line, contact),
                DecodedRow::Malformed { line, reason } => {
                    warn!(line, %reason, "malformed CSV row");
                    errors.push(format!("Line {}: {}", line, reason));
                    continue;
                }
            };

            let label = format!(
                "{} {}",
                contact.first_name,
                contact.last_name.as_deref().unwrap_or("")
            );

            let err = match self.contacts.add(contact) {
                Ok(_) => {
                    imported += 1;
                    continue;
                }
                Err(err) => err,
            };

            let messages = row_messages(&err, skip_duplicates);
            if messages.is_empty() {
                debug!(line, "skipped duplicate row");
                continue;
            }

            warn!(line, errors = %messages.join(", "), "rejected CSV row");
            errors.push(format!("Line {} ({}): {}", line, label.trim(), messages.join(", ")));
        }

        let mut message = format!("Import completed. {} contacts imported successfully.", imported);
        if !errors.is_empty() {
            message.push_str(&format!(" {} errors occurred.", errors.len()));
        }
        info!(imported, errors = errors.len(), path = %path.display(), "import finished");

        ImportReport {
            success: true,
            message,
            imported,
            errors,
        }
    }
}

/// The messages to report for a rejected row; empty when the row should be
/// skipped without a report.
fn row_messages(err: &ContactError, skip_duplicates: bool) -> Vec<String> {
    match err {
        ContactError::Invalid(errors) => errors
            .iter()
            .filter(|e| !(skip_duplicates && e.is_duplicate()))
            .map(ToString::to_string)
            .collect(),
        other => other.messages(),
    }
}

/// Check that `path` has a header naming all nine columns (any order, any
/// case) and at least one data line.
pub fn validate_csv_file(path: impl AsRef<Path>) -> CsvCheck {
    let path = path.as_ref();
    if !path.exists() {
        return CsvCheck::invalid("File not found");
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return CsvCheck::invalid(format!("Validation failed: {}", e)),
    };

    let lines: Vec<&str> = codec::strip_bom(&content).lines().collect();
    if lines.len() < 2 {
        return CsvCheck::invalid(EMPTY_FILE);
    }

    let header: Vec<String> = lines[0]
        .split(',')
        .map(|col| col.trim().trim_matches('"').to_lowercase())
        .collect();

    for column in COLUMNS {
        let wanted = column.to_lowercase();
        if !header.contains(&wanted) {
            return CsvCheck::invalid(format!("Missing required column: {}", wanted));
        }
    }

    let row_count = lines.len() - 1;
    CsvCheck {
        valid: true,
        message: format!("Valid CSV file with {} data rows", row_count),
        row_count,
    }
}

/// Write a header and two example rows to `path`.
pub fn create_template(path: impl AsRef<Path>) -> Result<()> {
    let mut john = Contact::new("John");
    john.last_name = Some("Doe".to_string());
    john.company = Some("Acme Corp".to_string());
    john.primary_phone = Some("+1234567890".to_string());
    john.secondary_phone = Some("+0987654321".to_string());
    john.email = Some("john.doe@example.com".to_string());
    john.address = Some("123 Main St, City, State".to_string());
    john.notes = Some("Sample contact".to_string());

    let mut jane = Contact::new("Jane");
    jane.last_name = Some("Smith".to_string());
    jane.company = Some("Tech Inc".to_string());
    jane.primary_phone = Some("+1111111111".to_string());
    jane.email = Some("jane.smith@example.com".to_string());
    jane.address = Some("456 Oak Ave, Town, State".to_string());
    jane.notes = Some("Another example".to_string());

    write_replacing(path.as_ref(), &[john, jane])
}

/// Encode into a uniquely named temporary file beside `path`, then move it
/// over `path`. The temporary file is deleted if any step fails.
fn write_replacing(path: &Path, contacts: &[Contact]) -> Result<()> {
    let text = codec::encode(contacts)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
    let written = tmp.write_all(text.as_bytes()).and_then(|()| tmp.flush());
    written.with_context(|| format!("Failed to write {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
