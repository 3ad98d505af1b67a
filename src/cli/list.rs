use anyhow::Result;

use crate::db::Database;
use crate::models::Contact;
use crate::service::{ContactService, SortField};

/// Execute the list command
pub fn run_list(
    db: &Database,
    page: usize,
    limit: usize,
    sort: Option<String>,
    order: &str,
    all: bool,
) -> Result<()> {
    let field = sort.as_deref().map(SortField::parse).unwrap_or_default();
    let ascending = !order.trim().eq_ignore_ascii_case("desc");
    let service = ContactService::new(db);

    if all {
        let contacts = service.sorted_list(field, ascending)?;
        if contacts.is_empty() {
            println!("No contacts.");
            return Ok(());
        }
        println!("Contacts ({} total)\n", contacts.len());
        print_table(&contacts);
        return Ok(());
    }

    let page = service.paginate(page, limit, field, ascending)?;
    if page.total_count == 0 {
        println!("No contacts.");
        return Ok(());
    }

    println!("Contacts ({} total)\n", page.total_count);
    print_table(&page.contacts);
    println!(
        "\nPage {} of {} (sorted by {}, {})",
        page.page_number,
        page.total_pages,
        field.as_str(),
        if ascending { "asc" } else { "desc" }
    );
    Ok(())
}

/// Print a header and one row per contact, sized to the terminal.
pub fn print_table(contacts: &[Contact]) {
    let layout = ColumnLayout::for_width(get_term_width());
    print_table_header(&layout);
    for contact in contacts {
        println!("{}", format_row(contact, &layout));
    }
}

fn get_term_width() -> usize {
    crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80)
}

/// Column layout based on terminal width
struct ColumnLayout {
    name_width: usize,
    contact_width: usize,
    show_company: bool,
}

const ID_WIDTH: usize = 6;

impl ColumnLayout {
    fn for_width(width: usize) -> Self {
        if width >= 90 {
            // Full display: ID | Name | Phone/Email | Company
            ColumnLayout {
                name_width: 28,
                contact_width: 28,
                show_company: true,
            }
        } else {
            // Compact display: ID | Name | Phone/Email
            ColumnLayout {
                name_width: 22,
                contact_width: width.saturating_sub(ID_WIDTH + 26).max(10),
                show_company: false,
            }
        }
    }
}

fn print_table_header(layout: &ColumnLayout) {
    let head = format!(
        "{:<id_w$}  {:<name_w$}  {:<contact_w$}",
        "ID",
        "NAME",
        "PHONE/EMAIL",
        id_w = ID_WIDTH,
        name_w = layout.name_width,
        contact_w = layout.contact_width
    );
    if layout.show_company {
        println!("{}  COMPANY", head);
    } else {
        println!("{}", head.trim_end());
    }
}

fn format_row(contact: &Contact, layout: &ColumnLayout) -> String {
    let name = truncate(&contact.full_name(), layout.name_width);

    let contact_info = match (contact.phones().next(), contact.email.as_deref()) {
        (Some(phone), _) => truncate(phone, layout.contact_width),
        (None, Some(email)) => truncate(email, layout.contact_width),
        (None, None) => String::new(),
    };

    let line = format!(
        "{:<id_w$}  {:<name_w$}  {:<contact_w$}",
        contact.id,
        name,
        contact_info,
        id_w = ID_WIDTH,
        name_w = layout.name_width,
        contact_w = layout.contact_width
    );

    match (layout.show_company, contact.company.as_deref()) {
        (true, Some(company)) => format!("{}  {}", line, truncate(company, 24)),
        _ => line.trim_end().to_string(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
