//! User domain
//!
//! Domain types for user registration: the entity, input validation and
//! the repository port.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{is_valid_email, is_valid_name, sanitize_input, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
