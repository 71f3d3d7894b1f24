//! SQLite connection pool construction

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

/// Open a pool for the configured database, creating the file if missing
///
/// An in-memory database lives and dies with its connection, so such URLs
/// get a single connection that is never recycled.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DomainError::storage(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    if is_in_memory(&config.url) {
        debug!("Using in-memory SQLite database");
        return single_connection_pool(options).await;
    }

    SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to database: {}", e)))
}

/// Open a fresh, empty in-memory database
pub async fn connect_in_memory() -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| DomainError::storage(format!("Invalid database URL: {}", e)))?;

    single_connection_pool(options).await
}

async fn single_connection_pool(options: SqliteConnectOptions) -> Result<SqlitePool, DomainError> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to database: {}", e)))
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
