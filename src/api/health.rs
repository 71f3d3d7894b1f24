//! Liveness and readiness probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageProbe>,
}

/// Result of asking the user store how many users it holds
#[derive(Debug, Serialize)]
pub struct StorageProbe {
    pub status: HealthStatus,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StorageProbe {
    async fn run(state: &AppState) -> Self {
        let start = Instant::now();
        let result = state.user_service.count().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(users) => Self {
                status: HealthStatus::Healthy,
                latency_ms,
                users: Some(users),
                error: None,
            },
            Err(e) => Self {
                status: HealthStatus::Unhealthy,
                latency_ms,
                users: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// GET /health - the process is up
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.to_string(),
        storage: None,
    })
}

/// GET /ready - 503 until the user store answers
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let probe = StorageProbe::run(&state).await;
    let status = probe.status;

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            environment: state.environment.to_string(),
            storage: Some(probe),
        }),
    )
}

/// GET /live
pub async fn live_check() -> StatusCode {
    StatusCode::OK
}
