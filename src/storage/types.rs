//! Record types for the people collection.
//!
//! - [`Person`]: a stored record with its assigned id
//! - [`NewPerson`]: insert input, before the store assigns an id
//! - [`DeleteSummary`]: outcome of a bulk delete

use serde::{Deserialize, Serialize};

/// Person stored in the collection.
///
/// Serializes with the document field names `id`, `name`, `age` and
/// `favoriteFoods`. An absent age (unset, or projected away) is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Store-assigned identifier, immutable after creation.
    pub id: String,
    /// Person's name.
    pub name: String,
    /// Optional age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Ordered list of favorite foods; may be empty.
    #[serde(default)]
    pub favorite_foods: Vec<String>,
}

impl Person {
    /// Assign an id to a [`NewPerson`].
    #[must_use]
    pub fn from_new(id: impl Into<String>, new: NewPerson) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            age: new.age,
            favorite_foods: new.favorite_foods,
        }
    }

    /// Returns true if `food` is among the favorite foods.
    #[must_use]
    pub fn likes(&self, food: &str) -> bool {
        self.favorite_foods.iter().any(|f| f == food)
    }
}

/// Person input for inserts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    /// Person's name.
    pub name: String,
    /// Optional age.
    #[serde(default)]
    pub age: Option<u32>,
    /// Ordered list of favorite foods.
    #[serde(default)]
    pub favorite_foods: Vec<String>,
}

impl NewPerson {
    /// Create a person with a name and nothing else.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            favorite_foods: Vec::new(),
        }
    }

    /// Set the age.
    #[must_use]
    pub const fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Set the favorite foods.
    #[must_use]
    pub fn with_foods<I, T>(mut self, foods: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.favorite_foods = foods.into_iter().map(Into::into).collect();
        self
    }
}

/// Outcome of a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    /// Number of records removed.
    pub deleted_count: u64,
}
