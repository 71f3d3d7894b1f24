//! Storage infrastructure - SQLite connection pool and schema migrations

pub mod migrations;
mod sqlite;

pub use migrations::{run_storage_migrations, Migration, Migrator, SqliteMigrator};
pub use sqlite::{connect, connect_in_memory};
