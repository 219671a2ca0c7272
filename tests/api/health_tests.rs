//! Health Check and Metrics API Tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{json_body, text_body, TestApp};

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
}

/// Liveness probe should always return 200
#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = json_body(response).await;
    assert_eq!(json["status"], "alive");
}

/// Readiness probe reports the storage backend
#[tokio::test]
async fn test_readiness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_metrics_exposes_request_counters() {
    let app = TestApp::new();
    app.get("/users").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = text_body(response).await;
    assert!(body.contains("device_registry_http_requests_total"));
    assert!(body.contains("path=\"/users\""));
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let app = TestApp::new();

    let response = app.get("/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: Value = json_body(response).await;
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["path"], "/nope");
}
