//! People Store binary entry point.
//!
//! Opens the store named by `DATABASE_URL`, walks through every repository
//! operation once, and prints each result as a JSON line on stdout. Logs go
//! to stderr.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use people_store::config::Config;
use people_store::error::AppError;
use people_store::repository::{PersonRepository, FOOD_TO_SEARCH};
use people_store::storage::{NewPerson, PersonStore};
use serde::Serialize;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Configuration loaded: database={}, max_connections={}",
        config.database_url,
        config.max_connections
    );

    if let Err(e) = run(&config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    tracing::info!("people-store walkthrough complete");
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run(config: &Config) -> Result<(), AppError> {
    let store = PersonStore::connect(&config.database_url, config.max_connections).await?;
    let repo = PersonRepository::new(store);

    let result = walkthrough(&repo).await;
    repo.into_store().close().await;
    result
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn walkthrough(repo: &PersonRepository<PersonStore>) -> Result<(), AppError> {
    let miguel = repo.create_and_save_person().await?;
    emit("create_and_save_person", &miguel);

    let people = repo
        .create_many_people(vec![
            NewPerson::new("Mary").with_age(31).with_foods([FOOD_TO_SEARCH]),
            NewPerson::new("Mary").with_age(45).with_foods(["tacos"]),
            NewPerson::new("Bob").with_age(27).with_foods([FOOD_TO_SEARCH, "salad"]),
            NewPerson::new("Alice").with_foods([FOOD_TO_SEARCH]),
        ])
        .await?;
    emit("create_many_people", &people);

    emit("find_people_by_name", &repo.find_people_by_name("Mary").await?);
    emit("find_one_by_food", &repo.find_one_by_food(FOOD_TO_SEARCH).await?);
    emit("find_person_by_id", &repo.find_person_by_id(&miguel.id).await?);
    emit("find_edit_then_save", &repo.find_edit_then_save(&miguel.id).await?);
    emit("find_and_update", &repo.find_and_update("Bob").await?);
    emit("query_chain", &repo.query_chain().await?);
    emit("remove_by_id", &repo.remove_by_id(&miguel.id).await?);
    emit("remove_many_people", &repo.remove_many_people().await?);

    Ok(())
}

/// Build the JSON output line for one operation result.
fn result_line<T: Serialize>(operation: &str, result: &T) -> serde_json::Result<String> {
    let result = serde_json::to_value(result)?;
    Ok(serde_json::json!({ "operation": operation, "result": result }).to_string())
}

/// Print one operation result as a JSON line.
fn emit<T: Serialize>(operation: &str, result: &T) {
    match result_line(operation, result) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(operation, error = %e, "Failed to serialize result"),
    }
}
