//! User repository trait

use async_trait::async_trait;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for user storage
///
/// Email uniqueness is the store's job: `create` must report a duplicate
/// email as [`DomainError::Conflict`] and every other failure as
/// [`DomainError::Storage`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users in insertion order
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Store a new user and return it with its assigned ID
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Number of stored users, without loading them
    async fn count(&self) -> Result<u64, DomainError>;
}
