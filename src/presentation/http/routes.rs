//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::{header, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(device_routes())
        .merge(user_routes())
        // Only matched routes are measured
        .route_layer(middleware::from_fn(track_metrics))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .fallback(not_found)
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler(uri: Uri) -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (
            [(
                header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => e.at(uri.path()).into_response(),
    }
}

async fn not_found(uri: Uri) -> Response {
    AppError::NotFound("Resource not found".into())
        .at(uri.path())
        .into_response()
}

/// Device routes
fn device_routes() -> Router<AppState> {
    Router::new()
        .route("/devices", post(handlers::device::create_device))
        .route("/devices/{device_id}", get(handlers::device::get_device))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route("/users/assign", post(handlers::user::assign_device))
        .route(
            "/users/{user_id}",
            get(handlers::user::get_user).delete(handlers::user::delete_user),
        )
}
