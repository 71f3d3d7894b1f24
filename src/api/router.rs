use std::path::Path;

use axum::{middleware, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::health;
use super::middleware::{api_call_middleware, logging_middleware, panic_response};
use super::state::AppState;
use super::types::ApiError;
use super::users;
use crate::config::{Environment, ServerConfig};

/// Create the `/api` router
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{user_id}", get(users::get_user))
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(state, api_call_middleware))
}

/// Create the full router with application state
///
/// In production the single-page UI is served from the static directory,
/// with unknown paths falling back to its `index.html`.
pub fn create_router_with_state(state: AppState, server: &ServerConfig) -> Router {
    let environment = state.environment;

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api", create_api_router(state.clone()))
        .with_state(state);

    if environment.serves_static_assets() {
        let static_dir = Path::new(&server.static_dir);
        router = router.fallback_service(
            ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html"))),
        );
    }

    with_middleware(router, environment)
}

/// Wrap a router in the shared middleware stack
pub fn with_middleware(router: Router, environment: Environment) -> Router {
    let mut router = router
        .layer(middleware::from_fn(logging_middleware))
        .layer(CatchPanicLayer::custom(move |payload| {
            panic_response(payload, environment)
        }));

    // The development UI is served by its own dev server
    if !environment.is_production() {
        router = router.layer(CorsLayer::permissive());
    }

    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn api_not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
