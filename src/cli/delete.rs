use anyhow::Result;
use inquire::ui::{RenderConfig, Styled};
use inquire::Confirm;

use crate::cli::display::summary_line;
use crate::db::Database;
use crate::service::ContactService;

/// Execute the delete command
pub fn run_delete(db: &Database, id: i64, force: bool) -> Result<bool> {
    let service = ContactService::new(db);

    let contact = match service.get_by_id(id)? {
        Some(c) => c,
        None => {
            println!("No contact found with ID: {}", id);
            return Ok(false);
        }
    };

    println!("{}\n", summary_line(&contact));

    if !force {
        let confirmed = Confirm::new(&format!("Delete {}?", contact.full_name()))
            .with_render_config(minimal_render_config())
            .with_default(false)
            .prompt()
            .unwrap_or(false);

        if !confirmed {
            println!("Cancelled.");
            return Ok(false);
        }
    }

    let deleted = service.delete(contact.id)?;
    if deleted {
        println!("Deleted.");
    } else {
        eprintln!("Error: failed to delete {}", contact.full_name());
    }
    Ok(deleted)
}

fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new(""))
        .with_answered_prompt_prefix(Styled::new(""))
}
