// config.rs - Database configuration
//
// Values come from the environment (optionally from a .env file).
// Without any environment the tests run against a private in-memory SQLite
// database.

use crate::error::ConfigError;
use std::env;

pub const DATABASE_URL_VAR: &str = "FIXTURE_DATABASE_URL";
pub const MAX_CONNECTIONS_VAR: &str = "FIXTURE_DB_MAX_CONNECTIONS";

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    /// One connection keeps the in-memory database alive and rules out
    /// concurrent writers.
    pub max_connections: u32,
}

impl DbConfig {
    pub fn in_memory() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 1,
        }
    }

    /// Read the configuration from the environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::in_memory();

        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.database_url);

        let max_connections = match lookup(MAX_CONNECTIONS_VAR) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: MAX_CONNECTIONS_VAR,
                        value: raw,
                    })
                }
            },
            None => defaults.max_connections,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}
