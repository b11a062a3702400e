//! Person repository.
//!
//! The repository exposes the collection's everyday operations. Each one is
//! a thin pass-through to a [`PersonStoreTrait`] implementation: one store
//! call (two for [`PersonRepository::find_edit_then_save`]), no input
//! validation and no retries. Failures are logged and returned unchanged.
//!
//! Several operations work on fixed values, listed as constants below.
//!
//! # Example
//!
//! ```ignore
//! use people_store::repository::PersonRepository;
//! use people_store::storage::PersonStore;
//!
//! let repo = PersonRepository::new(PersonStore::new_in_memory().await?);
//! let miguel = repo.create_and_save_person().await?;
//! let same = repo.find_person_by_id(&miguel.id).await?;
//! assert_eq!(same, Some(miguel));
//! ```

use crate::error::StorageError;
use crate::storage::{DeleteSummary, Field, NewPerson, Person, PersonQuery, SortField, SortOrder};
use crate::traits::PersonStoreTrait;

/// Name of the sample person created by [`PersonRepository::create_and_save_person`].
pub const SAMPLE_NAME: &str = "Miguel Grullon Reinoso";

/// Age of the sample person.
pub const SAMPLE_AGE: u32 = 20;

/// Favorite foods of the sample person.
pub const SAMPLE_FOODS: [&str; 3] = ["pizza", "ice cream", "apple"];

/// Food appended by [`PersonRepository::find_edit_then_save`].
pub const FOOD_TO_ADD: &str = "hamburger";

/// Age written by [`PersonRepository::find_and_update`].
pub const AGE_TO_SET: u32 = 20;

/// Name removed by [`PersonRepository::remove_many_people`].
pub const NAME_TO_REMOVE: &str = "Mary";

/// Food searched by [`PersonRepository::query_chain`].
pub const FOOD_TO_SEARCH: &str = "burrito";

/// Maximum number of results from [`PersonRepository::query_chain`].
pub const QUERY_CHAIN_LIMIT: u32 = 2;

/// The sample person inserted by [`PersonRepository::create_and_save_person`].
#[must_use]
pub fn sample_person() -> NewPerson {
    NewPerson::new(SAMPLE_NAME)
        .with_age(SAMPLE_AGE)
        .with_foods(SAMPLE_FOODS)
}

/// Log a failed operation and hand the error back.
fn logged<T>(operation: &str, result: Result<T, StorageError>) -> Result<T, StorageError> {
    if let Err(e) = &result {
        tracing::error!(operation, error = %e, "Person repository operation failed");
    }
    result
}

/// Repository of person records.
///
/// Generic over the store so tests can run against a mock.
pub struct PersonRepository<S>
where
    S: PersonStoreTrait,
{
    store: S,
}

impl<S> PersonRepository<S>
where
    S: PersonStoreTrait,
{
    /// Create a repository over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Handle to the underlying collection.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying collection, e.g. to close it.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Insert the sample person (see [`sample_person`]).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the insert fails.
    pub async fn create_and_save_person(&self) -> Result<Person, StorageError> {
        let result = self.store.insert_person(sample_person()).await;
        logged("create_and_save_person", result)
    }

    /// Insert every person in `people`, returning them with their new ids.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the insert fails; nothing is inserted then.
    pub async fn create_many_people(
        &self,
        people: Vec<NewPerson>,
    ) -> Result<Vec<Person>, StorageError> {
        let result = self.store.insert_people(people).await;
        logged("create_many_people", result)
    }

    /// All people whose name is exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the query fails.
    pub async fn find_people_by_name(&self, name: &str) -> Result<Vec<Person>, StorageError> {
        let result = self.store.find_people(&PersonQuery::new().name(name)).await;
        logged("find_people_by_name", result)
    }

    /// The first person whose favorite foods include `food`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the query fails.
    pub async fn find_one_by_food(&self, food: &str) -> Result<Option<Person>, StorageError> {
        let result = self
            .store
            .find_first(&PersonQuery::new().favorite_food(food))
            .await;
        logged("find_one_by_food", result)
    }

    /// The person with id `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the lookup fails.
    pub async fn find_person_by_id(&self, id: &str) -> Result<Option<Person>, StorageError> {
        let result = self.store.get_person(id).await;
        logged("find_person_by_id", result)
    }

    /// Read a person, append [`FOOD_TO_ADD`] to their foods, and save the record.
    ///
    /// The save only applies if the record is unchanged since the read, so
    /// two concurrent edits cannot silently overwrite one another; the loser
    /// gets [`StorageError::WriteConflict`]. Returns `Ok(None)` if no person
    /// has that id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if either step fails.
    pub async fn find_edit_then_save(&self, id: &str) -> Result<Option<Person>, StorageError> {
        let Some(current) = logged("find_edit_then_save", self.store.get_person(id).await)? else {
            return Ok(None);
        };

        let mut updated = current.clone();
        updated.favorite_foods.push(FOOD_TO_ADD.to_string());

        let result = self.store.replace_person(&current, &updated).await;
        logged("find_edit_then_save", result).map(Some)
    }

    /// Set the age of the first person named `name` to [`AGE_TO_SET`].
    ///
    /// Returns the record after the update.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the update fails.
    pub async fn find_and_update(&self, name: &str) -> Result<Option<Person>, StorageError> {
        let result = self.store.set_age_of_first_named(name, AGE_TO_SET).await;
        logged("find_and_update", result)
    }

    /// Delete the person with id `id`, returning the record as it was.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the delete fails.
    pub async fn remove_by_id(&self, id: &str) -> Result<Option<Person>, StorageError> {
        let result = self.store.delete_person(id).await;
        logged("remove_by_id", result)
    }

    /// Delete every person named [`NAME_TO_REMOVE`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the delete fails.
    pub async fn remove_many_people(&self) -> Result<DeleteSummary, StorageError> {
        let result = self.store.delete_people_named(NAME_TO_REMOVE).await;
        logged("remove_many_people", result)
    }

    /// People who like [`FOOD_TO_SEARCH`], sorted by name, at most
    /// [`QUERY_CHAIN_LIMIT`] of them, without their age.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the query fails.
    pub async fn query_chain(&self) -> Result<Vec<Person>, StorageError> {
        let query = Self::query_chain_query();
        let result = self.store.find_people(&query).await;
        logged("query_chain", result)
    }

    fn query_chain_query() -> PersonQuery {
        PersonQuery::new()
            .favorite_food(FOOD_TO_SEARCH)
            .sort_by(SortField::Name, SortOrder::Ascending)
            .limit(QUERY_CHAIN_LIMIT)
            .exclude(Field::Age)
    }
}
