//! CSV encoding and decoding of contacts.
//!
//! Nine fixed columns in both directions. A field is quoted only when it holds
//! a comma, a double quote or a line break; embedded quotes are doubled.

use anyhow::{anyhow, Result};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::models::Contact;

/// Header row, in column order.
pub const COLUMNS: [&str; 9] = [
    "FirstName",
    "LastName",
    "Company",
    "PrimaryPhone",
    "SecondaryPhone",
    "Email",
    "Address",
    "Notes",
    "PhotoPath",
];

/// One data record read from CSV text. `line` is the 1-based line on which the
/// record starts (the header is line 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRow {
    Parsed { line: u64, contact: Contact },
    Malformed { line: u64, reason: String },
}

impl DecodedRow {
    pub fn line(&self) -> u64 {
        match self {
            Self::Parsed { line, .. } | Self::Malformed { line, .. } => *line,
        }
    }
}

/// Render contacts as CSV text: header line, then one line per contact, each
/// terminated by `\n`. Absent fields are written as empty strings.
pub fn encode(contacts: &[Contact]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for contact in contacts {
        writer.write_record(to_record(contact))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn to_record(contact: &Contact) -> [&str; 9] {
    fn text(field: &Option<String>) -> &str {
        field.as_deref().unwrap_or("")
    }

    [
        contact.first_name.as_str(),
        text(&contact.last_name),
        text(&contact.company),
        text(&contact.primary_phone),
        text(&contact.secondary_phone),
        text(&contact.email),
        text(&contact.address),
        text(&contact.notes),
        text(&contact.photo_path),
    ]
}

/// Parse CSV text into rows. The first line is the header and is skipped
/// without inspection. Records with fewer than nine fields are reported as
/// malformed; extra fields are ignored. Quoted fields may contain commas,
/// doubled quotes and line breaks. Blank lines are skipped.
///
/// A quote that is never closed would otherwise swallow the rest of the file.
/// When a record spans several lines yet still comes up short, only its first
/// line is split on its own and decoding resumes on the line after it.
pub fn decode(content: &str) -> Vec<DecodedRow> {
    let body = match strip_bom(content).split_once('\n') {
        Some((_header, body)) => body,
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut offset = 0;
    let mut line = 2;

    while offset < body.len() {
        let rest = &body[offset..];
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(rest.as_bytes());

        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                let at = err.position().map_or(1, |p| p.line());
                rows.push(DecodedRow::Malformed {
                    line: line + at - 1,
                    reason: err.to_string(),
                });
                break;
            }
        }

        let end = reader.position();
        let end_byte = end.byte() as usize;
        if end_byte == 0 {
            break;
        }

        // Blank lines ahead of the record belong to neither this row nor its line
        let mut start = record.position().map_or(0, |p| p.byte() as usize);
        let blank = rest[start..end_byte].len() - rest[start..end_byte].trim_start_matches(['\r', '\n']).len();
        let row_line = line + rest[..start + blank].matches('\n').count() as u64;
        start += blank;

        let raw = rest[start..end_byte].trim_end_matches(['\r', '\n']);
        if record.len() < COLUMNS.len() && raw.contains('\n') {
            let first_end = raw.find('\n').map_or(raw.len(), |i| i + 1);
            let first = raw[..first_end].trim_end_matches(['\r', '\n']);
            rows.push(from_record(row_line, &StringRecord::from(split_line(first))));
            offset += start + first_end;
            line = row_line + 1;
        } else {
            rows.push(from_record(row_line, &record));
            offset += end_byte;
            line += rest[..end_byte].matches('\n').count() as u64;
        }
    }
    rows
}

/// Split a single line on commas outside quotes. Each unescaped quote toggles
/// the quoted state; `""` inside quotes is a literal quote.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn from_record(line: u64, record: &StringRecord) -> DecodedRow {
    if record.len() < COLUMNS.len() {
        return DecodedRow::Malformed {
            line,
            reason: format!(
                "Invalid format - expected {} fields, got {}",
                COLUMNS.len(),
                record.len()
            ),
        };
    }

    let opt = |idx: usize| {
        let value = &record[idx];
        (!value.is_empty()).then(|| value.to_string())
    };

    let mut contact = Contact::new(&record[0]);
    contact.last_name = opt(1);
    contact.company = opt(2);
    contact.primary_phone = opt(3);
    contact.secondary_phone = opt(4);
    contact.email = opt(5);
    contact.address = opt(6);
    contact.notes = opt(7);
    contact.photo_path = opt(8);

    DecodedRow::Parsed { line, contact }
}

/// Drop a leading UTF-8 byte-order mark.
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}
