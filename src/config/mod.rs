//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (including a `.env` file)
//! - Configuration validation
//! - Default value handling
//! - Redaction of the connection string via [`ConnectionString`]
//!
//! # Example
//!
//! ```
//! use people_store::config::{Config, ConnectionString, DEFAULT_MAX_CONNECTIONS};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     database_url: ConnectionString::new("sqlite://./data/people.db?mode=rwc"),
//!     log_level: "info".to_string(),
//!     max_connections: DEFAULT_MAX_CONNECTIONS,
//! };
//!
//! let debug = format!("{:?}", config);
//! assert!(debug.contains("<REDACTED>"));
//! assert!(!debug.contains("people.db"));
//! ```

mod connection;
mod validation;

pub use connection::ConnectionString;
pub use validation::{validate_config, MAX_CONNECTIONS, SUPPORTED_SCHEME};

use crate::error::ConfigError;

/// Environment variable holding the store connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default size of the connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Store connection string (redacted in `Debug`).
    pub database_url: ConnectionString,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Maximum pooled connections to the store.
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DATABASE_URL`: store connection string, e.g. `sqlite://./data/people.db?mode=rwc`
    ///
    /// Optional environment variables (with defaults):
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: `5`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `DATABASE_URL` is missing
    /// - `DATABASE_MAX_CONNECTIONS` is not a valid positive integer
    /// - Any value fails validation (see [`validate_config`])
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_url =
            std::env::var(DATABASE_URL_VAR).map_err(|_| ConfigError::MissingRequired {
                var: DATABASE_URL_VAR.into(),
            })?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let max_connections = parse_env_u32("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let config = Self {
            database_url: ConnectionString::new(database_url),
            log_level,
            max_connections,
        };

        validate_config(&config)?;
        Ok(config)
    }
}

/// Parse an environment variable as u32, using a default if not set.
fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
