//! People Store
//!
//! A person collection with create, read, update, delete and chained-query
//! operations, stored in `SQLite` through `sqlx`.
//!
//! # Features
//!
//! - Typed `Person` records with a JSON array of favorite foods
//! - Single and bulk inserts, lookups by id, name or food
//! - Full-document saves guarded against lost updates
//! - Chained queries: filter, sort, limit, projection
//! - Explicit store lifecycle: `connect` then `close`
//!
//! # Quick Start
//!
//! ```bash
//! DATABASE_URL=sqlite://./data/people.db?mode=rwc ./people-store
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌────────┐
//! │ PersonRepository │────▶│ PersonStoreTrait │────▶│ SQLite │
//! └──────────────────┘     └──────────────────┘     └────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod repository;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_utils;
