//! Runtime configuration read from environment variables.

use std::env;
use std::path::PathBuf;

use crate::db::Database;
use crate::error::ConfigError;

pub const ENV_DB_PATH: &str = "CONTACTBOOK_DB";
pub const ENV_PAGE_SIZE: &str = "CONTACTBOOK_PAGE_SIZE";
pub const ENV_LOG: &str = "RUST_LOG";

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding the contact store
    pub db_path: PathBuf,
    /// Rows per page for `list` when no limit is given
    pub page_size: usize,
    pub log_filter: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// - `CONTACTBOOK_DB`: database path (default: `<config dir>/contactbook/contacts.db`)
    /// - `CONTACTBOOK_PAGE_SIZE`: positive integer (default: 20)
    /// - `RUST_LOG`: log filter (default: "warn")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let db_path = match get(ENV_DB_PATH) {
            Some(path) => PathBuf::from(path.trim()),
            None => Database::default_path()
                .map_err(|e| ConfigError::NoDatabasePath(e.to_string()))?,
        };

        let page_size = match get(ENV_PAGE_SIZE) {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        let log_filter = get(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            db_path,
            page_size,
            log_filter,
        })
    }
}

fn parse_page_size(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            var: ENV_PAGE_SIZE.to_string(),
            reason: format!("Must be a positive number, got: {}", raw),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_explicit_values() {
        let config = load(&[
            (ENV_DB_PATH, "/tmp/book.db"),
            (ENV_PAGE_SIZE, "50"),
            (ENV_LOG, "contactbook=debug"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/book.db"));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.log_filter, "contactbook=debug");
    }

    #[test]
    fn test_defaults() {
        let config = load(&[(ENV_DB_PATH, "/tmp/book.db")]).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = load(&[(ENV_DB_PATH, "/tmp/book.db"), (ENV_PAGE_SIZE, "  ")]).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_rejects_bad_page_size() {
        for bad in ["0", "-3", "ten"] {
            let err = load(&[(ENV_DB_PATH, "/tmp/book.db"), (ENV_PAGE_SIZE, bad)]).unwrap_err();
            match err {
                ConfigError::InvalidValue { var, .. } => assert_eq!(var, ENV_PAGE_SIZE),
                other => panic!("unexpected error: {}", other),
            }
        }
    }
}
