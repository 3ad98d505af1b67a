pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod transfer;
pub mod validation;

pub use config::Config;
pub use db::Database;
pub use error::{ContactError, ContactResult};
pub use models::Contact;
pub use service::ContactService;
