//! User service for registration and lookup

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// Request for registering a new user
///
/// `None` means the field was absent from the submission.
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// User service for registration and lookup
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a user from raw form input
    ///
    /// Input problems come back as [`DomainError::Validation`] carrying the
    /// per-field message; storage outcomes are passed through untouched.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let new_user = NewUser::parse(request.name.as_deref(), request.email.as_deref())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        debug!(name = %new_user.name(), email = %new_user.email(), "Registering user");

        let user = self.repository.create(new_user).await?;

        info!(user_id = %user.id(), "User registered");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id: UserId = id
            .parse()
            .map_err(|_| DomainError::invalid_id("Invalid user id"))?;

        self.repository.get(user_id).await
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Count users; used as a cheap storage check
    pub async fn count(&self) -> Result<u64, DomainError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;

    fn make_request(name: Option<&str>, email: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: name.map(String::from),
            email: email.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_create_user_stores_sanitized_values() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .withf(|u| u.name() == "John" && u.email() == "john@example.com")
            .times(1)
            .returning(|u| Ok(u.into_user(UserId::new(1))));

        let service = UserService::new(Arc::new(repository));
        let user = service
            .create(make_request(Some("  <John>  "), Some("john@example.com")))
            .await
            .unwrap();

        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(user.name(), "John");
    }

    #[tokio::test]
    async fn test_create_user_invalid_input_never_reaches_storage() {
        let mut repository = MockUserRepository::new();
        repository.expect_create().never();

        let service = UserService::new(Arc::new(repository));

        let err = service.create(make_request(None, None)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(err.message(), "Invalid name");

        let err = service
            .create(make_request(Some("John"), Some("invalid-email")))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Invalid email");
    }

    #[tokio::test]
    async fn test_create_user_passes_conflict_through() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .returning(|_| Err(DomainError::conflict("Email already exists")));

        let service = UserService::new(Arc::new(repository));
        let err = service
            .create(make_request(Some("John"), Some("john@example.com")))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_get_invalid_id() {
        let mut repository = MockUserRepository::new();
        repository.expect_get().never();

        let service = UserService::new(Arc::new(repository));
        let err = service.get("abc").await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidId { .. }));
    }

    #[tokio::test]
    async fn test_get_parses_id() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get()
            .withf(|id| *id == UserId::new(5))
            .returning(|id| Ok(Some(User::new(id, "John", "john@example.com"))));

        let service = UserService::new(Arc::new(repository));
        let user = service.get("5").await.unwrap().unwrap();

        assert_eq!(user.email(), "john@example.com");
    }

    #[tokio::test]
    async fn test_list_propagates_storage_errors() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_list()
            .returning(|| Err(DomainError::storage("disk I/O error")));

        let service = UserService::new(Arc::new(repository));
        let err = service.list().await.unwrap_err();

        assert_eq!(err.message(), "disk I/O error");
    }

    #[tokio::test]
    async fn test_count_does_not_list() {
        let mut repository = MockUserRepository::new();
        repository.expect_list().never();
        repository.expect_count().times(1).returning(|| Ok(3));

        let service = UserService::new(Arc::new(repository));

        assert_eq!(service.count().await.unwrap(), 3);
    }
}
