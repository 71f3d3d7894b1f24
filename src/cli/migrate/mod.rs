//! Migrate command - applies pending migrations and exits

use tracing::info;

use crate::infrastructure::storage::{connect, Migrator, SqliteMigrator};

use super::bootstrap;

pub async fn run() -> anyhow::Result<()> {
    let config = bootstrap()?;

    let pool = connect(&config.database).await?;
    let migrator = SqliteMigrator::new(pool);
    migrator.run().await?;

    match migrator.version().await? {
        Some(version) => info!(version, "Database is up to date"),
        None => info!("No migrations to apply"),
    }

    Ok(())
}
