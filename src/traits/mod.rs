//! Trait definitions for mockable dependencies.
//!
//! This module defines [`PersonStoreTrait`], the seam between the
//! repository operations and the concrete store.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates a mock implementation automatically for testing.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::storage::{DeleteSummary, NewPerson, Person, PersonQuery};

/// Person collection trait for mocking.
///
/// Each method is a single round trip to the store. A missing record is
/// `Ok(None)`, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonStoreTrait: Send + Sync {
    /// Insert one person and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn insert_person(&self, person: NewPerson) -> Result<Person, StorageError>;

    /// Insert many people atomically, returning them in input order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn insert_people(&self, people: Vec<NewPerson>) -> Result<Vec<Person>, StorageError>;

    /// Run a chained query.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn find_people(&self, query: &PersonQuery) -> Result<Vec<Person>, StorageError>;

    /// Run a chained query and return only the first match.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn find_first(&self, query: &PersonQuery) -> Result<Option<Person>, StorageError>;

    /// Get a person by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn get_person(&self, id: &str) -> Result<Option<Person>, StorageError>;

    /// Rewrite a full record if it still equals `current`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::WriteConflict`] if the record changed since it
    /// was read, or [`StorageError`] if the database operation fails.
    async fn replace_person(
        &self,
        current: &Person,
        updated: &Person,
    ) -> Result<Person, StorageError>;

    /// Set the age of the first person named `name`; returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn set_age_of_first_named(
        &self,
        name: &str,
        age: u32,
    ) -> Result<Option<Person>, StorageError>;

    /// Delete a person by id; returns the record as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn delete_person(&self, id: &str) -> Result<Option<Person>, StorageError>;

    /// Delete every person named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn delete_people_named(&self, name: &str) -> Result<DeleteSummary, StorageError>;
}
