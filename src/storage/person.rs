//! Person record operations.

#![allow(clippy::missing_errors_doc)]

use crate::error::StorageError;

use super::core::{PersonStore, PERSON_COLUMNS};
use super::types::{DeleteSummary, NewPerson, Person};

impl PersonStore {
    /// Insert one person and return it with its assigned id.
    pub async fn insert_person(&self, person: NewPerson) -> Result<Person, StorageError> {
        let person = Person::from_new(Self::generate_id(), person);
        let foods = Self::encode_foods(&person.favorite_foods)?;

        sqlx::query("INSERT INTO people (id, name, age, favorite_foods) VALUES (?, ?, ?, ?)")
            .bind(&person.id)
            .bind(&person.name)
            .bind(person.age)
            .bind(&foods)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("INSERT people", format!("{e}")))?;

        Ok(person)
    }

    /// Insert many people in one transaction.
    ///
    /// Either every record is inserted or none is. Results keep input order.
    pub async fn insert_people(&self, people: Vec<NewPerson>) -> Result<Vec<Person>, StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Self::query_error("BEGIN", format!("{e}")))?;

        let mut created = Vec::with_capacity(people.len());
        for new in people {
            let person = Person::from_new(Self::generate_id(), new);
            let foods = Self::encode_foods(&person.favorite_foods)?;

            sqlx::query("INSERT INTO people (id, name, age, favorite_foods) VALUES (?, ?, ?, ?)")
                .bind(&person.id)
                .bind(&person.name)
                .bind(person.age)
                .bind(&foods)
                .execute(&mut *tx)
                .await
                .map_err(|e| Self::query_error("INSERT people", format!("{e}")))?;

            created.push(person);
        }

        tx.commit()
            .await
            .map_err(|e| Self::query_error("COMMIT", format!("{e}")))?;

        Ok(created)
    }

    /// Get a person by id.
    pub async fn get_person(&self, id: &str) -> Result<Option<Person>, StorageError> {
        let row = sqlx::query(&format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT people", format!("{e}")))?;

        row.as_ref().map(Self::row_to_person).transpose()
    }

    /// Rewrite a whole person record, provided it still equals `current`.
    ///
    /// `current` is the copy the caller read; `updated` is the edited copy.
    /// Favorite foods are compared as JSON values, not text, so rows written
    /// with other spacing still match. Fails with
    /// [`StorageError::WriteConflict`] if the stored record was changed or
    /// removed since the read.
    pub async fn replace_person(
        &self,
        current: &Person,
        updated: &Person,
    ) -> Result<Person, StorageError> {
        if current.id != updated.id {
            return Err(StorageError::Internal {
                message: format!(
                    "Cannot replace person {} with a record for {}",
                    current.id, updated.id
                ),
            });
        }

        let current_foods = Self::encode_foods(&current.favorite_foods)?;
        let updated_foods = Self::encode_foods(&updated.favorite_foods)?;

        let result = sqlx::query(
            "UPDATE people SET name = ?, age = ?, favorite_foods = ?
             WHERE id = ? AND name = ? AND age IS ? AND json(favorite_foods) = json(?)",
        )
        .bind(&updated.name)
        .bind(updated.age)
        .bind(&updated_foods)
        .bind(&current.id)
        .bind(&current.name)
        .bind(current.age)
        .bind(&current_foods)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::query_error("UPDATE people", format!("{e}")))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::WriteConflict {
                person_id: current.id.clone(),
            });
        }

        Ok(updated.clone())
    }

    /// Set the age of the first person (insertion order) named `name`.
    ///
    /// Returns the record as it is after the update.
    pub async fn set_age_of_first_named(
        &self,
        name: &str,
        age: u32,
    ) -> Result<Option<Person>, StorageError> {
        let row = sqlx::query(&format!(
            "UPDATE people SET age = ?
             WHERE rowid = (SELECT rowid FROM people WHERE name = ? ORDER BY rowid LIMIT 1)
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(age)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::query_error("UPDATE people", format!("{e}")))?;

        row.as_ref().map(Self::row_to_person).transpose()
    }

    /// Delete a person by id, returning the record as it was.
    pub async fn delete_person(&self, id: &str) -> Result<Option<Person>, StorageError> {
        let row = sqlx::query(&format!(
            "DELETE FROM people WHERE id = ? RETURNING {PERSON_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::query_error("DELETE people", format!("{e}")))?;

        row.as_ref().map(Self::row_to_person).transpose()
    }

    /// Delete every person named `name`.
    pub async fn delete_people_named(&self, name: &str) -> Result<DeleteSummary, StorageError> {
        let result = sqlx::query("DELETE FROM people WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("DELETE people", format!("{e}")))?;

        Ok(DeleteSummary {
            deleted_count: result.rows_affected(),
        })
    }
}
