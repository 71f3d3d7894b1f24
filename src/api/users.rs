//! User registration endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{DomainError, TrackedError, User};
use crate::infrastructure::user::CreateUserRequest;

/// Request body for `POST /api/users`
///
/// Fields are taken loosely so that a missing, `null` or non-string value
/// is reported with the field's own validation message instead of a
/// deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserApiRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
}

impl From<CreateUserApiRequest> for CreateUserRequest {
    fn from(request: CreateUserApiRequest) -> Self {
        Self {
            name: text_field(request.name),
            email: text_field(request.email),
        }
    }
}

fn text_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.list().await.map_err(|e| {
        track_unexpected(&state, &e, "GET /api/users");
        ApiError::from_domain(e, state.environment)
    })?;

    Ok(Json(users))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_service
        .create(request.into())
        .await
        .map_err(|e| {
            track_unexpected(&state, &e, "POST /api/users");
            ApiError::from_create_error(e, state.environment)
        })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let user = state
        .user_service
        .get(&user_id)
        .await
        .map_err(|e| {
            track_unexpected(&state, &e, "GET /api/users/{user_id}");
            ApiError::from_domain(e, state.environment)
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(user))
}

/// Client mistakes are expected traffic; only storage and internal failures
/// are worth keeping
fn track_unexpected(state: &AppState, err: &DomainError, context: &str) {
    if matches!(err, DomainError::Storage { .. } | DomainError::Internal { .. }) {
        warn!(error = %err, context, "Request failed");
        state.events.error(TrackedError::new(err.message(), context));
    }
}
