//! Chained queries over the people collection.
//!
//! A [`PersonQuery`] composes a filter, a sort, a limit and a projection
//! before anything touches the database. The sort is always applied before
//! the limit, so a limited query returns the top-N records of the sorted
//! result rather than an arbitrary N sorted afterwards.

#![allow(clippy::missing_errors_doc)]

use sqlx::{QueryBuilder, Sqlite};

use crate::error::StorageError;

use super::core::PersonStore;
use super::types::Person;

/// Field a query can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Sort by name.
    Name,
    /// Sort by age; records without an age sort first when ascending.
    Age,
}

impl SortField {
    const fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Optional field that a projection can leave out of the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The `age` field.
    Age,
}

/// A composable find query.
///
/// # Example
///
/// ```
/// use people_store::storage::{Field, PersonQuery, SortField, SortOrder};
///
/// let query = PersonQuery::new()
///     .favorite_food("burrito")
///     .sort_by(SortField::Name, SortOrder::Ascending)
///     .limit(2)
///     .exclude(Field::Age);
///
/// assert_eq!(query.limit_value(), Some(2));
/// assert!(query.excludes(Field::Age));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonQuery {
    name: Option<String>,
    favorite_food: Option<String>,
    sort: Option<(SortField, SortOrder)>,
    limit: Option<u32>,
    exclude_age: bool,
}

impl PersonQuery {
    /// A query matching every record, in insertion order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match records whose name equals `name` exactly.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Match records whose favorite foods contain `food`.
    #[must_use]
    pub fn favorite_food(mut self, food: impl Into<String>) -> Self {
        self.favorite_food = Some(food.into());
        self
    }

    /// Order results. Ties keep insertion order.
    #[must_use]
    pub const fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = Some((field, order));
        self
    }

    /// Return at most `n` records, taken after sorting.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Leave `field` out of every returned record.
    #[must_use]
    pub const fn exclude(mut self, field: Field) -> Self {
        match field {
            Field::Age => self.exclude_age = true,
        }
        self
    }

    /// The configured limit, if any.
    #[must_use]
    pub const fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// Returns true if `field` is projected away.
    #[must_use]
    pub const fn excludes(&self, field: Field) -> bool {
        match field {
            Field::Age => self.exclude_age,
        }
    }

    /// Render the query into a SQL builder with bound parameters.
    pub(crate) fn build(&self) -> QueryBuilder<'_, Sqlite> {
        let age_column = if self.exclude_age { "NULL AS age" } else { "age" };
        let mut qb = QueryBuilder::new(format!(
            "SELECT id, name, {age_column}, favorite_foods FROM people"
        ));

        if self.name.is_some() || self.favorite_food.is_some() {
            qb.push(" WHERE ");
        }
        let mut clauses = qb.separated(" AND ");
        if let Some(name) = &self.name {
            clauses.push("name = ").push_bind_unseparated(name.as_str());
        }
        if let Some(food) = &self.favorite_food {
            clauses
                .push("EXISTS (SELECT 1 FROM json_each(people.favorite_foods) WHERE json_each.value = ")
                .push_bind_unseparated(food.as_str())
                .push_unseparated(")");
        }

        qb.push(" ORDER BY ");
        if let Some((field, order)) = self.sort {
            qb.push(field.column())
                .push(" ")
                .push(order.keyword())
                .push(", ");
        }
        qb.push("rowid ASC");

        if let Some(limit) = self.limit {
            qb.push(" LIMIT ").push_bind(i64::from(limit));
        }

        qb
    }
}

impl PersonStore {
    /// Run a [`PersonQuery`].
    pub async fn find_people(&self, query: &PersonQuery) -> Result<Vec<Person>, StorageError> {
        let mut qb = query.build();
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT people", format!("{e}")))?;

        let mut people = Vec::with_capacity(rows.len());
        for row in &rows {
            people.push(Self::row_to_person(row)?);
        }

        Ok(people)
    }

    /// Run a [`PersonQuery`] and keep only the first match.
    pub async fn find_first(&self, query: &PersonQuery) -> Result<Option<Person>, StorageError> {
        let query = query.clone().limit(1);
        Ok(self.find_people(&query).await?.into_iter().next())
    }
}
