use anyhow::{anyhow, Result};

use crate::db::Database;
use crate::service::ContactService;
use crate::transfer::{self, ContactTransfer, ImportReport};

/// Execute the export command
pub fn run_export(db: &Database, path: &str, search: Option<&str>) -> Result<()> {
    let transfer = ContactTransfer::new(db);

    let report = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => {
            let matches = ContactService::new(db).search(term)?;
            transfer.export_to_csv(path.trim(), Some(matches.as_slice()))
        }
        None => transfer.export_to_csv(path.trim(), None),
    };

    if report.success {
        println!("{}", report.message);
        Ok(())
    } else {
        Err(anyhow!(report.message))
    }
}

/// Execute the import command
pub fn run_import(db: &Database, path: &str, report_duplicates: bool) -> Result<ImportReport> {
    let report = ContactTransfer::new(db).import_from_csv(path.trim(), !report_duplicates);

    for error in &report.errors {
        eprintln!("  {}", error);
    }
    if !report.success {
        return Err(anyhow!(report.message));
    }

    println!("{}", report.message);
    Ok(report)
}

/// Execute the check command
pub fn run_check(path: &str) -> Result<()> {
    let check = transfer::validate_csv_file(path.trim());
    if check.valid {
        println!("{}", check.message);
        Ok(())
    } else {
        Err(anyhow!(check.message))
    }
}

/// Execute the template command
pub fn run_template(path: &str) -> Result<()> {
    let path = path.trim();
    transfer::create_template(path)?;
    println!("Template written to {}", path);
    Ok(())
}
