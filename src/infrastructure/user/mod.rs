//! User infrastructure module
//!
//! SQLite-backed persistence and the registration service.

mod service;
mod sqlite_repository;

pub use service::{CreateUserRequest, UserService};
pub use sqlite_repository::{SqliteUserRepository, EMAIL_EXISTS_MESSAGE};
