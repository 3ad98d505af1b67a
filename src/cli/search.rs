use anyhow::Result;

use crate::cli::list::print_table;
use crate::db::Database;
use crate::service::ContactService;

/// Execute the search command
pub fn run_search(db: &Database, query: &str) -> Result<()> {
    let query = query.trim();
    let results = ContactService::new(db).search(query)?;

    if results.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    if query.is_empty() {
        println!("Contacts ({} total)\n", results.len());
    } else {
        println!("{} matching \"{}\"\n", results.len(), query);
    }
    print_table(&results);
    Ok(())
}
