//! Middleware reporting every API call to the injected event sink

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use super::logging::extract_path;
use crate::api::state::AppState;
use crate::domain::ApiCall;

pub async fn api_call_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);

    let response = next.run(request).await;

    state.events.api_call(ApiCall::new(
        method.as_str(),
        path,
        Some(response.status().as_u16()),
        start.elapsed().as_millis() as u64,
    ));

    response
}
