//! Storage backend.
//!
//! This module provides:
//! - The `SQLite` person collection ([`PersonStore`])
//! - Person insert, lookup, update and delete operations
//! - Chained queries ([`PersonQuery`]): filter, sort, limit, projection
//!
//! # Architecture
//!
//! The collection is a single `people` table accessed through `sqlx`.
//! Favorite foods are stored as a JSON array and matched with `json_each`,
//! so a record behaves like a document with an array field.
//!
//! The implementation is split across submodules:
//! - `core`: Pool lifecycle, schema bootstrap, and row helpers
//! - `person`: Record operations
//! - `query`: The query builder
//! - `trait_impl`: `PersonStoreTrait` implementation
//!
//! # Example
//!
//! ```ignore
//! use people_store::storage::{NewPerson, PersonStore};
//!
//! let store = PersonStore::new_in_memory().await?;
//! let person = store.insert_person(NewPerson::new("Ada")).await?;
//! store.close().await;
//! ```

mod core;
mod person;
mod query;
mod trait_impl;
mod types;

pub use self::core::{PersonStore, PEOPLE_COLLECTION};
pub use query::{Field, PersonQuery, SortField, SortOrder};
pub use types::{DeleteSummary, NewPerson, Person};
