//! API error type and its JSON body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::domain::DomainError;

/// Error body: `{"error": "<message>"}`, with debug detail outside production
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
                stack: None,
            },
        }
    }

    /// Attach debug detail, only when the environment allows it
    pub fn with_stack(mut self, stack: impl Into<String>, environment: Environment) -> Self {
        if environment.exposes_error_details() {
            self.response.stack = Some(stack.into());
        }
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Map a failed registration
    ///
    /// Unlike reads, an unexpected storage failure while creating is
    /// reported as a bad request carrying the driver's message.
    pub fn from_create_error(err: DomainError, environment: Environment) -> Self {
        match err {
            DomainError::Storage { .. } => {
                let stack = format!("{:?}", err);
                Self::bad_request(err.message()).with_stack(stack, environment)
            }
            other => Self::from_domain(other, environment),
        }
    }

    /// Map a domain error, attaching debug detail to unexpected failures
    pub fn from_domain(err: DomainError, environment: Environment) -> Self {
        let stack = format!("{:?}", err);
        let unexpected = matches!(
            err,
            DomainError::Storage { .. } | DomainError::Internal { .. }
        );
        let api_error = Self::from(err);

        if unexpected {
            api_error.with_stack(stack, environment)
        } else {
            api_error
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::InvalidId { message } => Self::bad_request(message),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Internal { message } => Self::internal(message),
            DomainError::Storage { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.response.error)
    }
}

impl std::error::Error for ApiError {}
