//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (can the store be reached?)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// Basic health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Detailed health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: HealthChecks,
}

/// Individual dependency health checks
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub storage: ServiceHealth,
}

/// Health status for individual dependencies
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub backend: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe - checks if the server can accept traffic
/// Returns 200 if ready, 503 if the store is unavailable
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let storage = check_storage(&state).await;
    let overall_status = storage.status;

    let response = DetailedHealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        checks: HealthChecks { storage },
    };

    let status_code = match overall_status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Check store connectivity and latency
async fn check_storage(state: &AppState) -> ServiceHealth {
    let backend = state.unit_of_work.backend().to_string();
    let start = Instant::now();

    match state.unit_of_work.ping().await {
        Ok(()) => {
            let latency = start.elapsed().as_millis() as u64;
            ServiceHealth {
                backend,
                status: status_for_latency(latency),
                latency_ms: Some(latency),
                message: None,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Storage health check failed");
            ServiceHealth {
                backend,
                status: HealthStatus::Unhealthy,
                latency_ms: None,
                message: Some(format!("Storage unavailable: {}", e)),
            }
        }
    }
}

fn status_for_latency(latency_ms: u64) -> HealthStatus {
    if latency_ms < 100 {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    }
}
