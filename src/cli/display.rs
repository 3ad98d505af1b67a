use chrono::Local;

use crate::error::ContactError;
use crate::models::Contact;

/// Print a full contact with clean formatting (only non-empty fields)
pub fn print_full_contact(contact: &Contact) {
    println!("{}\n", contact.full_name());

    if let Some(ref company) = contact.company {
        println!("  {}", company);
    }
    if let Some(ref email) = contact.email {
        println!("  {}", email);
    }
    for phone in contact.phones() {
        println!("  {}", phone);
    }
    if let Some(ref address) = contact.address {
        for line in address.lines() {
            println!("  {}", line);
        }
    }
    if let Some(ref notes) = contact.notes {
        println!("  {}", truncate_notes(notes, 60));
    }
    if let Some(ref photo) = contact.photo_path {
        println!("  photo: {}", photo);
    }

    let created = contact.created_at.with_timezone(&Local);
    let updated = contact.updated_at.with_timezone(&Local);
    println!("\n  #{}  added {}", contact.id, created.format("%b %-d, %Y"));
    if updated.date_naive() != created.date_naive() {
        println!("  updated {}", updated.format("%b %-d, %Y"));
    }
}

/// One-line summary used in confirmations
pub fn summary_line(contact: &Contact) -> String {
    let mut parts = vec![contact.full_name()];
    if let Some(ref company) = contact.company {
        parts.push(company.clone());
    }
    if let Some(phone) = contact.phones().next() {
        parts.push(phone.to_string());
    }
    parts.join(", ")
}

/// Print every message carried by `err` to stderr.
pub fn print_errors(err: &ContactError) {
    for message in err.messages() {
        eprintln!("  {}", message);
    }
}

fn truncate_notes(notes: &str, max: usize) -> String {
    let flat = notes.replace(['\r', '\n'], " ");
    if flat.chars().count() > max {
        let text: String = flat.chars().take(max - 1).collect();
        format!("{}…", text.trim_end())
    } else {
        flat
    }
}
