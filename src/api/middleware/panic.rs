//! Last-resort handler for panics inside request handlers

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::api::types::ApiError;
use crate::config::Environment;

/// Turn a caught panic into `500 {"error": "Internal Server Error"}`
pub fn panic_response(payload: Box<dyn Any + Send + 'static>, environment: Environment) -> Response {
    let detail = panic_message(payload.as_ref());

    error!(panic = %detail, "Request handler panicked");

    ApiError::internal("Internal Server Error")
        .with_stack(detail, environment)
        .into_response()
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
