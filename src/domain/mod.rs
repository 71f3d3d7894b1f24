//! Domain layer - Core business logic and entities

pub mod error;
pub mod telemetry;
pub mod user;

pub use error::DomainError;
pub use telemetry::{ApiCall, EventSink, Interaction, TrackedError};
pub use user::{
    is_valid_email, is_valid_name, sanitize_input, NewUser, User, UserId, UserRepository,
    UserValidationError,
};
