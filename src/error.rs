//! Error types surfaced by the contact core.

use thiserror::Error;

use crate::validation::ValidationError;

/// Failure of a contact service operation.
#[derive(Debug, Error)]
pub enum ContactError {
    /// One or more validation rules failed; nothing was persisted.
    #[error("{}", join_messages(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Invalid contact ID")]
    InvalidId,

    #[error("Contact not found")]
    NotFound,

    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl ContactError {
    /// The user-facing message list, one entry per failure.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Invalid(errors) => errors.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Invalid(errors) if errors.iter().any(ValidationError::is_duplicate))
    }
}

impl From<anyhow::Error> for ContactError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(err)
    }
}

pub type ContactResult<T> = Result<T, ContactError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    #[error("Could not determine a database location: {0}")]
    NoDatabasePath(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
