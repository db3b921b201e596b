//! Process configuration from environment variables.
//!
//! `main` loads an optional `.env` file first, then reads:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | required |
//! | `PORT` | `3000` |
//! | `DB_MAX_CONNECTIONS` | `5` |
//! | `CORS_ALLOW_ORIGIN` | any origin |
//!
//! Parsing goes through [`Config::from_lookup`] so it can be tested without
//! touching the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use axum::http::HeaderValue;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<HeaderValue>,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value: "0".into() });
        }
        let cors_allow_origin = parse_origin(lookup("CORS_ALLOW_ORIGIN"))?;
        Ok(Self { database_url, port, db_max_connections, cors_allow_origin })
    }
}

/// Parse an optional value, falling back to `default` when unset or blank.
pub(crate) fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value: value.to_owned() }),
    }
}

/// `*` and unset both mean "any origin".
pub(crate) fn parse_origin(raw: Option<String>) -> Result<Option<HeaderValue>, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None | Some("" | "*") => Ok(None),
        Some(value) => HeaderValue::from_str(value)
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key: "CORS_ALLOW_ORIGIN", value: value.to_owned() }),
    }
}
