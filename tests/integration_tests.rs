//! Integration tests for the people store.
//!
//! These tests run every repository operation against a file-backed
//! database and check the documented outcomes:
//! - Create, then fetch by id
//! - Bulk insert and name/food lookups
//! - Edit-then-save, find-and-update, single and bulk removal
//! - The chained burrito query

use std::sync::Arc;

use people_store::config::ConnectionString;
use people_store::error::StorageError;
use people_store::repository::{PersonRepository, FOOD_TO_ADD};
use people_store::storage::{NewPerson, PersonStore};
use pretty_assertions::assert_eq;
use serial_test::serial;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a repository over a database in a temporary directory.
async fn create_test_repo() -> (PersonRepository<PersonStore>, TempDir) {
    let (store, temp_dir) = create_test_store(1).await;
    (PersonRepository::new(store), temp_dir)
}

async fn create_test_store(max_connections: u32) -> (PersonStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("people.db");
    let url = ConnectionString::new(format!("sqlite://{}", db_path.display()));
    let store = PersonStore::connect(&url, max_connections)
        .await
        .expect("Failed to create store");
    (store, temp_dir)
}

fn named(name: &str, foods: &[&str]) -> NewPerson {
    NewPerson::new(name).with_foods(foods.iter().copied())
}

// ============================================================================
// Create & Read
// ============================================================================

#[tokio::test]
#[serial]
async fn test_create_then_find_by_id() {
    let (repo, _temp_dir) = create_test_repo().await;

    let created = repo.create_and_save_person().await.expect("create");
    let fetched = repo
        .find_person_by_id(&created.id)
        .await
        .expect("find")
        .expect("person exists");

    assert_eq!(fetched.name, "Miguel Grullon Reinoso");
    assert_eq!(fetched.age, Some(20));
    assert_eq!(fetched.favorite_foods, vec!["pizza", "ice cream", "apple"]);
    assert_eq!(fetched, created);
}

#[tokio::test]
#[serial]
async fn test_find_person_by_unknown_id_is_none() {
    let (repo, _temp_dir) = create_test_repo().await;
    let fetched = repo.find_person_by_id("no-such-id").await.expect("find");
    assert!(fetched.is_none());
}

#[tokio::test]
#[serial]
async fn test_create_many_people_assigns_unique_ids() {
    let (repo, _temp_dir) = create_test_repo().await;

    let inputs: Vec<_> = (0..5).map(|i| NewPerson::new(format!("P{i}"))).collect();
    let created = repo.create_many_people(inputs).await.expect("create many");

    assert_eq!(created.len(), 5);
    let mut ids: Vec<_> = created.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
    assert_eq!(created[3].name, "P3");
}

#[tokio::test]
#[serial]
async fn test_find_people_by_name_exact_match() {
    let (repo, _temp_dir) = create_test_repo().await;
    repo.create_many_people(vec![
        named("Mary", &[]),
        named("John", &[]),
        named("Mary", &[]),
        named("Mary", &[]),
        named("mary", &[]),
    ])
    .await
    .expect("create many");

    let marys = repo.find_people_by_name("Mary").await.expect("find");
    assert_eq!(marys.len(), 3);
    assert!(marys.iter().all(|p| p.name == "Mary"));

    let nobody = repo.find_people_by_name("Nobody").await.expect("find");
    assert!(nobody.is_empty());
}

#[tokio::test]
#[serial]
async fn test_find_one_by_food() {
    let (repo, _temp_dir) = create_test_repo().await;
    repo.create_many_people(vec![
        named("A", &["tacos"]),
        named("B", &["rice", "burrito"]),
        named("C", &["burrito"]),
    ])
    .await
    .expect("create many");

    let found = repo
        .find_one_by_food("burrito")
        .await
        .expect("find")
        .expect("a burrito lover");
    assert!(found.likes("burrito"));
    assert_eq!(found.name, "B");

    assert!(repo.find_one_by_food("sushi").await.expect("find").is_none());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
#[serial]
async fn test_find_edit_then_save_appends_food() {
    let (repo, _temp_dir) = create_test_repo().await;
    let created = repo
        .create_many_people(vec![named("Ada", &["pizza"])])
        .await
        .expect("create")
        .remove(0);

    let saved = repo
        .find_edit_then_save(&created.id)
        .await
        .expect("save")
        .expect("person exists");
    assert_eq!(saved.favorite_foods, vec!["pizza", "hamburger"]);

    let fetched = repo
        .find_person_by_id(&created.id)
        .await
        .expect("find")
        .expect("person exists");
    assert_eq!(fetched.favorite_foods, vec!["pizza", "hamburger"]);
}

#[tokio::test]
#[serial]
async fn test_find_edit_then_save_unknown_id() {
    let (repo, _temp_dir) = create_test_repo().await;
    let saved = repo.find_edit_then_save("no-such-id").await.expect("save");
    assert!(saved.is_none());
}

#[tokio::test]
#[serial]
async fn test_concurrent_edits_never_lose_updates() {
    let (store, _temp_dir) = create_test_store(4).await;
    let repo = Arc::new(PersonRepository::new(store));
    let created = repo
        .create_many_people(vec![named("Ada", &["pizza"])])
        .await
        .expect("create")
        .remove(0);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let repo = Arc::clone(&repo);
        let id = created.id.clone();
        handles.push(tokio::spawn(async move { repo.find_edit_then_save(&id).await }));
    }

    let mut saved = 0;
    for handle in handles {
        match handle.await.expect("join") {
            Ok(Some(_)) => saved += 1,
            Err(StorageError::WriteConflict { person_id }) => assert_eq!(person_id, created.id),
            other => unreachable!("unexpected outcome {other:?}"),
        }
    }

    let fetched = repo
        .find_person_by_id(&created.id)
        .await
        .expect("find")
        .expect("person exists");
    let added = fetched
        .favorite_foods
        .iter()
        .filter(|f| *f == FOOD_TO_ADD)
        .count();
    assert!(saved >= 1);
    assert_eq!(added, saved);
}

#[tokio::test]
#[serial]
async fn test_find_and_update_returns_new_age() {
    let (repo, _temp_dir) = create_test_repo().await;
    let created = repo
        .create_many_people(vec![
            NewPerson::new("Bob").with_age(41),
            NewPerson::new("Bob").with_age(52),
        ])
        .await
        .expect("create");

    let updated = repo
        .find_and_update("Bob")
        .await
        .expect("update")
        .expect("a Bob");
    assert_eq!(updated.id, created[0].id);
    assert_eq!(updated.age, Some(20));

    let second = repo
        .find_person_by_id(&created[1].id)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(second.age, Some(52));

    assert!(repo.find_and_update("Nobody").await.expect("update").is_none());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
#[serial]
async fn test_remove_by_id_returns_snapshot() {
    let (repo, _temp_dir) = create_test_repo().await;
    let created = repo.create_and_save_person().await.expect("create");

    let removed = repo.remove_by_id(&created.id).await.expect("remove");
    assert_eq!(removed, Some(created.clone()));

    assert!(repo
        .find_person_by_id(&created.id)
        .await
        .expect("find")
        .is_none());
    assert!(repo.remove_by_id(&created.id).await.expect("remove").is_none());
}

#[tokio::test]
#[serial]
async fn test_remove_many_people_leaves_others() {
    let (repo, _temp_dir) = create_test_repo().await;
    let mut inputs: Vec<_> = (0..5).map(|_| named("Mary", &[])).collect();
    inputs.push(named("Bob", &[]));
    inputs.push(named("Bob", &[]));
    repo.create_many_people(inputs).await.expect("create");

    let summary = repo.remove_many_people().await.expect("remove");
    assert_eq!(summary.deleted_count, 5);

    let remaining = repo
        .store()
        .find_people(&people_store::storage::PersonQuery::new())
        .await
        .expect("find all");
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|p| p.name == "Bob"));
}

// ============================================================================
// Query chain
// ============================================================================

#[tokio::test]
#[serial]
async fn test_query_chain_sorted_limited_projected() {
    let (repo, _temp_dir) = create_test_repo().await;
    repo.create_many_people(vec![
        NewPerson::new("Pablo").with_age(30).with_foods(["burrito"]),
        NewPerson::new("Ana").with_age(21).with_foods(["burrito", "tacos"]),
        NewPerson::new("Zoe").with_age(44).with_foods(["burrito"]),
        NewPerson::new("Carla").with_age(33).with_foods(["burrito"]),
        NewPerson::new("Aaron").with_age(25).with_foods(["sushi"]),
        NewPerson::new("Bea").with_age(38).with_foods(["burrito"]),
        NewPerson::new("Luis").with_age(29).with_foods(["burrito"]),
    ])
    .await
    .expect("create");

    let people = repo.query_chain().await.expect("query");

    let names: Vec<_> = people.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bea"]);
    assert!(people.iter().all(|p| p.age.is_none()));
    assert!(people.iter().all(|p| p.likes("burrito")));
}

#[tokio::test]
#[serial]
async fn test_query_chain_with_no_matches() {
    let (repo, _temp_dir) = create_test_repo().await;
    repo.create_and_save_person().await.expect("create");

    assert!(repo.query_chain().await.expect("query").is_empty());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
#[serial]
async fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let url = ConnectionString::new(format!(
        "sqlite://{}",
        temp_dir.path().join("people.db").display()
    ));

    let store = PersonStore::connect(&url, 2).await.expect("open");
    let repo = PersonRepository::new(store);
    let created = repo.create_and_save_person().await.expect("create");
    repo.into_store().close().await;

    let store = PersonStore::connect(&url, 2).await.expect("reopen");
    let repo = PersonRepository::new(store);
    let fetched = repo.find_person_by_id(&created.id).await.expect("find");
    assert_eq!(fetched, Some(created));
}
