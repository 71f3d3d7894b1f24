//! SQLite user repository implementation

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// Message reported for a duplicate email, surfaced verbatim by the API
pub const EMAIL_EXISTS_MESSAGE: &str = "Email already exists";

/// SQLite implementation of UserRepository
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(error_message(&e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(error_message(&e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(user.name())
            .bind(user.email())
            .execute(&self.pool)
            .await
            .map_err(map_insert_error)?;

        Ok(user.into_user(UserId::new(result.last_insert_rowid())))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(error_message(&e)))?;

        Ok(count.max(0) as u64)
    }
}

fn map_insert_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::conflict(EMAIL_EXISTS_MESSAGE)
        }
        _ => DomainError::storage(error_message(&err)),
    }
}

/// The driver's own message, without sqlx's wrapping prefix
fn error_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        other => other.to_string(),
    }
}

fn row_to_user(row: &SqliteRow) -> Result<User, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;

    Ok(User::new(UserId::new(id), name, email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{connect_in_memory, run_storage_migrations};

    async fn create_repository() -> SqliteUserRepository {
        let pool = connect_in_memory().await.unwrap();
        run_storage_migrations(&pool).await.unwrap();
        SqliteUserRepository::new(pool)
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser::parse(Some(name), Some(email)).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = create_repository().await;
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_incrementing_ids() {
        let repo = create_repository().await;

        let first = repo.create(new_user("John", "john@example.com")).await.unwrap();
        let second = repo.create(new_user("Jane", "jane@example.com")).await.unwrap();

        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let repo = create_repository().await;

        repo.create(new_user("Zed", "zed@example.com")).await.unwrap();
        repo.create(new_user("Amy", "amy@example.com")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|u| u.name().to_string())
            .collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = create_repository().await;

        repo.create(new_user("John", "john@example.com")).await.unwrap();
        let err = repo
            .create(new_user("Johnny", "john@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict { .. }));
        assert_eq!(err.message(), EMAIL_EXISTS_MESSAGE);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_uniqueness_is_case_sensitive() {
        let repo = create_repository().await;

        repo.create(new_user("John", "john@example.com")).await.unwrap();
        let result = repo.create(new_user("John", "JOHN@example.com")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get() {
        let repo = create_repository().await;
        let created = repo.create(new_user("John", "john@example.com")).await.unwrap();

        assert_eq!(repo.get(created.id()).await.unwrap(), Some(created));
        assert_eq!(repo.get(UserId::new(99)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_count() {
        let repo = create_repository().await;
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.create(new_user("John", "john@example.com")).await.unwrap();
        repo.create(new_user("Jane", "jane@example.com")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_table_is_storage_error() {
        let pool = connect_in_memory().await.unwrap();
        let repo = SqliteUserRepository::new(pool);

        let err = repo.list().await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
        assert!(err.message().contains("no such table"));
        assert!(repo.count().await.is_err());

        let err = repo
            .create(new_user("John", "john@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
    }
}
