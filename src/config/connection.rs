//! Redacting wrapper for the store connection string.
//!
//! Connection strings may embed credentials or private file paths, so the
//! value is only reachable through [`ConnectionString::expose`]. `Debug` and
//! `Display` print the scheme and hide the rest.

use std::fmt;

/// Placeholder printed instead of the connection string body.
const REDACTED: &str = "<REDACTED>";

/// A store connection string that is never printed in full.
///
/// # Example
///
/// ```
/// use people_store::config::ConnectionString;
///
/// let url = ConnectionString::new("sqlite://./data/people.db?mode=rwc");
/// assert_eq!(format!("{url:?}"), "sqlite:<REDACTED>");
/// assert_eq!(url.scheme(), Some("sqlite"));
/// assert_eq!(url.expose(), "sqlite://./data/people.db?mode=rwc");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString(String);

impl ConnectionString {
    /// Wrap a raw connection string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw connection string, for handing to the driver.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The URL scheme (text before the first `:`), if any.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.0
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .filter(|scheme| !scheme.is_empty())
    }

    /// Returns true if the connection string is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme() {
            Some(scheme) => write!(f, "{scheme}:{REDACTED}"),
            None => f.write_str(REDACTED),
        }
    }
}

impl From<String> for ConnectionString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ConnectionString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
