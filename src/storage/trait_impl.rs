//! `PersonStoreTrait` implementation for `PersonStore`.

#![allow(clippy::missing_errors_doc)]

use async_trait::async_trait;

use crate::error::StorageError;
use crate::traits::PersonStoreTrait;

use super::core::PersonStore;
use super::query::PersonQuery;
use super::types::{DeleteSummary, NewPerson, Person};

#[async_trait]
impl PersonStoreTrait for PersonStore {
    async fn insert_person(&self, person: NewPerson) -> Result<Person, StorageError> {
        Self::insert_person(self, person).await
    }

    async fn insert_people(&self, people: Vec<NewPerson>) -> Result<Vec<Person>, StorageError> {
        Self::insert_people(self, people).await
    }

    async fn find_people(&self, query: &PersonQuery) -> Result<Vec<Person>, StorageError> {
        Self::find_people(self, query).await
    }

    async fn find_first(&self, query: &PersonQuery) -> Result<Option<Person>, StorageError> {
        Self::find_first(self, query).await
    }

    async fn get_person(&self, id: &str) -> Result<Option<Person>, StorageError> {
        Self::get_person(self, id).await
    }

    async fn replace_person(
        &self,
        current: &Person,
        updated: &Person,
    ) -> Result<Person, StorageError> {
        Self::replace_person(self, current, updated).await
    }

    async fn set_age_of_first_named(
        &self,
        name: &str,
        age: u32,
    ) -> Result<Option<Person>, StorageError> {
        Self::set_age_of_first_named(self, name, age).await
    }

    async fn delete_person(&self, id: &str) -> Result<Option<Person>, StorageError> {
        Self::delete_person(self, id).await
    }

    async fn delete_people_named(&self, name: &str) -> Result<DeleteSummary, StorageError> {
        Self::delete_people_named(self, name).await
    }
}
