//! Core `SQLite` storage implementation.
//!
//! This module provides the main [`PersonStore`] struct: connection
//! lifecycle, schema bootstrap, and row conversion helpers.

#![allow(clippy::missing_errors_doc)]

use crate::config::ConnectionString;
use crate::error::StorageError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

use super::types::Person;

/// Name of the collection (table) holding person records.
pub const PEOPLE_COLLECTION: &str = "people";

/// Column list shared by every query that returns full records.
pub(crate) const PERSON_COLUMNS: &str = "id, name, age, favorite_foods";

/// `SQLite`-backed person collection.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PersonStore {
    pub(crate) pool: SqlitePool,
}

impl PersonStore {
    /// Get a clone of the connection pool.
    #[must_use]
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Open the store described by `url`.
    ///
    /// The database file is created if missing and the schema is applied.
    /// In-memory URLs are limited to a single connection, since every
    /// `SQLite` memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the URL is invalid or the
    /// connection fails, and [`StorageError::MigrationFailed`] if the schema
    /// cannot be applied.
    pub async fn connect(
        url: &ConnectionString,
        max_connections: u32,
    ) -> Result<Self, StorageError> {
        let in_memory = url.expose().contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(url.expose())
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Invalid database url {url}: {e}"),
            })?
            .create_if_missing(true);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if in_memory {
            // The database lives only as long as its one connection.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to connect to database: {e}"),
            })?;

        let store = Self { pool };
        store.run_migrations().await?;

        tracing::debug!(%url, in_memory, "Person store opened");
        Ok(store)
    }

    /// Create a new in-memory store, mainly for tests.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new_in_memory() -> Result<Self, StorageError> {
        Self::connect(&ConnectionString::new("sqlite::memory:"), 1).await
    }

    /// Close the store, waiting for every pooled connection to be released.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!("Person store closed");
    }

    /// Apply the embedded schema. Idempotent.
    pub(crate) async fn run_migrations(&self) -> Result<(), StorageError> {
        let schema_001 = include_str!("../../migrations/001_people.sql");
        sqlx::query(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        Ok(())
    }

    /// Generate a new record id.
    pub(crate) fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Create a query error with the given query name and message.
    pub(crate) fn query_error(query: &str, message: String) -> StorageError {
        StorageError::QueryFailed {
            query: query.to_string(),
            message,
        }
    }

    /// Serialize favorite foods for the JSON column.
    pub(crate) fn encode_foods(foods: &[String]) -> Result<String, StorageError> {
        serde_json::to_string(foods).map_err(|e| StorageError::Internal {
            message: format!("Failed to encode favorite foods: {e}"),
        })
    }

    /// Parse the JSON favorite foods column.
    pub(crate) fn decode_foods(raw: &str) -> Result<Vec<String>, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Internal {
            message: format!("Failed to parse favorite foods '{raw}': {e}"),
        })
    }

    /// Decode one column, reporting values of the wrong type or range.
    fn column<'r, T>(row: &'r sqlx::sqlite::SqliteRow, name: &str) -> Result<T, StorageError>
    where
        T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
    {
        row.try_get(name).map_err(|e| StorageError::Internal {
            message: format!("Failed to decode column '{name}': {e}"),
        })
    }

    /// Convert a database row to a [`Person`].
    pub(crate) fn row_to_person(row: &sqlx::sqlite::SqliteRow) -> Result<Person, StorageError> {
        let id: String = Self::column(row, "id")?;
        let name: String = Self::column(row, "name")?;
        let age = Self::column::<Option<i64>>(row, "age")?
            .map(u32::try_from)
            .transpose()
            .map_err(|e| StorageError::Internal {
                message: format!("Failed to decode column 'age' for person {id}: {e}"),
            })?;
        let foods_raw: String = Self::column(row, "favorite_foods")?;

        Ok(Person {
            id,
            name,
            age,
            favorite_foods: Self::decode_foods(&foods_raw)?,
        })
    }
}
