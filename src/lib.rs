//! User Registry
//!
//! A small user-registration service:
//! - JSON API to list and register users, backed by SQLite
//! - Input sanitizing and validation shared by server and client
//! - Client components (form, list, error boundary) over the HTTP API

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::SqlitePool;
use tracing::info;

use api::state::AppState;
use config::Environment;
use domain::EventSink;
use infrastructure::{
    storage::{connect, run_storage_migrations},
    telemetry::TracingEventSink,
    user::{SqliteUserRepository, UserService},
};

/// Create application state with configuration loaded from the environment
pub async fn create_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::load().context("Invalid configuration")?;
    create_app_state_with_config(&config).await
}

/// Create application state with the provided configuration
///
/// Connects to the configured database and applies pending migrations
/// before any request is served.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Connecting to database {}", config.database.url);
    let pool = connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    run_storage_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    info!("Database ready");

    Ok(create_app_state_with_pool(
        pool,
        config.environment,
        Arc::new(TracingEventSink),
    ))
}

/// Create application state over an existing pool
pub fn create_app_state_with_pool(
    pool: SqlitePool,
    environment: Environment,
    events: Arc<dyn EventSink>,
) -> AppState {
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let user_service = Arc::new(UserService::new(repository));

    AppState::new(user_service, events, environment)
}
