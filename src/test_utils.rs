//! Test utilities and mock factories.
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::error::StorageError;
use crate::storage::Person;
use crate::traits::MockPersonStoreTrait;

/// Build a person record without touching a store.
#[must_use]
pub fn person(id: &str, name: &str, foods: &[&str]) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        age: None,
        favorite_foods: foods.iter().map(|f| (*f).to_string()).collect(),
    }
}

/// The error every [`failing_store`] call returns.
#[must_use]
pub fn query_error() -> StorageError {
    StorageError::QueryFailed {
        query: "SELECT people".to_string(),
        message: "database is locked".to_string(),
    }
}

/// Create a mock store where every operation fails with [`query_error`].
#[must_use]
pub fn failing_store() -> MockPersonStoreTrait {
    let mut mock = MockPersonStoreTrait::new();
    mock.expect_insert_person().returning(|_| Err(query_error()));
    mock.expect_insert_people().returning(|_| Err(query_error()));
    mock.expect_find_people().returning(|_| Err(query_error()));
    mock.expect_find_first().returning(|_| Err(query_error()));
    mock.expect_get_person().returning(|_| Err(query_error()));
    mock.expect_replace_person()
        .returning(|_, _| Err(query_error()));
    mock.expect_set_age_of_first_named()
        .returning(|_, _| Err(query_error()));
    mock.expect_delete_person().returning(|_| Err(query_error()));
    mock.expect_delete_people_named()
        .returning(|_| Err(query_error()));
    mock
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PersonStoreTrait;

    #[test]
    fn test_person_fixture() {
        let p = person("p-1", "Ada", &["tea"]);
        assert_eq!(p.id, "p-1");
        assert_eq!(p.favorite_foods, vec!["tea"]);
        assert!(p.age.is_none());
    }

    #[tokio::test]
    async fn test_failing_store_fails() {
        let store = failing_store();
        assert_eq!(store.get_person("p-1").await, Err(query_error()));
        assert_eq!(
            store.delete_people_named("Mary").await,
            Err(query_error())
        );
    }
}
