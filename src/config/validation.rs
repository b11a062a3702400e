//! Configuration validation.
//!
//! Ensures the connection string targets a supported store and the pool size
//! is within range.

use super::{Config, DATABASE_URL_VAR};
use crate::error::ConfigError;

/// The only connection scheme the store understands.
pub const SUPPORTED_SCHEME: &str = "sqlite";

/// Maximum allowed pool size.
pub const MAX_CONNECTIONS: u32 = 100;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `DATABASE_URL` must not be blank and must use the `sqlite` scheme
/// - `DATABASE_MAX_CONNECTIONS` must be between 1 and 100
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database_url.is_blank() {
        return Err(ConfigError::InvalidValue {
            var: DATABASE_URL_VAR.into(),
            reason: "must not be empty".into(),
        });
    }

    if config.database_url.scheme() != Some(SUPPORTED_SCHEME) {
        return Err(ConfigError::InvalidValue {
            var: DATABASE_URL_VAR.into(),
            reason: format!("must start with {SUPPORTED_SCHEME}:"),
        });
    }

    if config.max_connections == 0 || config.max_connections > MAX_CONNECTIONS {
        return Err(ConfigError::InvalidValue {
            var: "DATABASE_MAX_CONNECTIONS".into(),
            reason: format!("must be between 1 and {MAX_CONNECTIONS}"),
        });
    }

    Ok(())
}
