//! Application state for shared services

use std::sync::Arc;

use crate::config::Environment;
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, EventSink};
use crate::infrastructure::user::{CreateUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub events: Arc<dyn EventSink>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        events: Arc<dyn EventSink>,
        environment: Environment,
    ) -> Self {
        Self {
            user_service,
            events,
            environment,
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }

    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn count(&self) -> Result<u64, DomainError> {
        UserService::count(self).await
    }
}
