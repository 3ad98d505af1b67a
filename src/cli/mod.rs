use clap::{Args, Parser, Subcommand};

use crate::models::Contact;

pub mod add;
pub mod delete;
pub mod display;
pub mod list;
pub mod search;
pub mod show;
pub mod transfer;
pub mod update;

pub use add::run_add;
pub use delete::run_delete;
pub use display::print_full_contact;
pub use list::run_list;
pub use search::run_search;
pub use show::run_show;
pub use transfer::{run_check, run_export, run_import, run_template};
pub use update::run_update;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(about = "Contact book for the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List contacts with sorting and pagination
    List(ListArgs),
    /// Search contacts by name, company, email or phone
    Search(SearchArgs),
    /// Show full details for a contact
    Show(ShowArgs),
    /// Add a new contact
    Add(AddArgs),
    /// Change fields of an existing contact
    Update(UpdateArgs),
    /// Delete a contact
    Delete(DeleteArgs),
    /// Export contacts to a CSV file
    Export(ExportArgs),
    /// Import contacts from a CSV file
    Import(ImportArgs),
    /// Check a CSV file's header and row count without importing it
    Check(PathArgs),
    /// Write a sample CSV file to start from
    Template(PathArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short, long, default_value = "1")]
    pub page: usize,
    /// Rows per page (default: CONTACTBOOK_PAGE_SIZE or 20)
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// firstname, lastname, company, email or createdat
    #[arg(short, long)]
    pub sort: Option<String>,
    #[arg(short, long, default_value = "asc")]
    pub order: String,
    /// Print every contact on one page
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search term; empty lists everything
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: i64,
    /// Print the contact as JSON
    #[arg(long)]
    pub json: bool,
}

/// Contact fields shared by `add` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct ContactFields {
    #[arg(short, long)]
    pub first: Option<String>,
    #[arg(short, long)]
    pub last: Option<String>,
    #[arg(short, long)]
    pub company: Option<String>,
    /// Primary phone
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(short, long)]
    pub secondary_phone: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub address: Option<String>,
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Path to a photo file
    #[arg(long)]
    pub photo: Option<String>,
}

impl ContactFields {
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
            && self.last.is_none()
            && self.company.is_none()
            && self.phone.is_none()
            && self.secondary_phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.notes.is_none()
            && self.photo.is_none()
    }

    /// Overwrite the fields of `contact` that were supplied. Values are
    /// trimmed; a blank value clears an optional field.
    pub fn apply_to(self, contact: &mut Contact) {
        if let Some(first) = self.first {
            contact.first_name = first.trim().to_string();
        }
        let set = |target: &mut Option<String>, value: Option<String>| {
            if let Some(v) = value {
                *target = Some(v.trim().to_string());
            }
        };
        set(&mut contact.last_name, self.last);
        set(&mut contact.company, self.company);
        set(&mut contact.primary_phone, self.phone);
        set(&mut contact.secondary_phone, self.secondary_phone);
        set(&mut contact.email, self.email);
        set(&mut contact.address, self.address);
        set(&mut contact.notes, self.notes);
        set(&mut contact.photo_path, self.photo);
    }
}

#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: ContactFields,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: i64,
    #[command(flatten)]
    pub fields: ContactFields,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    pub path: String,
    /// Export only contacts matching this search term
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    pub path: String,
    /// Report rows whose phone number already exists instead of skipping them
    #[arg(long)]
    pub report_duplicates: bool,
}

#[derive(Args)]
pub struct PathArgs {
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_trims_and_leaves_unsupplied_fields() {
        let mut contact = Contact::new("John");
        contact.company = Some("Acme".to_string());
        contact.email = Some("john@example.com".to_string());

        let fields = ContactFields {
            first: Some("  Johnny ".to_string()),
            email: Some("   ".to_string()),
            phone: Some(" +1234567890 ".to_string()),
            ..Default::default()
        };
        assert!(!fields.is_empty());
        fields.apply_to(&mut contact);

        assert_eq!(contact.first_name, "Johnny");
        assert_eq!(contact.company.as_deref(), Some("Acme"));
        assert_eq!(contact.primary_phone.as_deref(), Some("+1234567890"));
        // Blank is cleared later by normalisation
        assert_eq!(contact.email.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_update_args() {
        let cli = Cli::try_parse_from(["contactbook", "update", "7", "--company", "Initech", "-n", "hi"]).unwrap();
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.id, 7);
                assert_eq!(args.fields.company.as_deref(), Some("Initech"));
                assert_eq!(args.fields.notes.as_deref(), Some("hi"));
                assert!(args.fields.first.is_none());
            }
            _ => panic!("expected update"),
        }
    }
}
