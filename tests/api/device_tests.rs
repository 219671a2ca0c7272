//! Device API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{device_body, json_body, TestApp};
use device_registry::application::dto::DeviceResponse;
use device_registry::shared::error::{ErrorResponse, FieldError};

fn sample_device() -> Value {
    json!({
        "serialNumber": "ABC-123",
        "uuid": "e58ed763-928c-4155-bee9-fdbaaadc15f3",
        "phoneNumber": "+49 172 234567",
        "model": "Model S"
    })
}

#[tokio::test]
async fn test_create_device_returns_created() {
    let app = TestApp::new();

    let response = app.post_json("/devices", &sample_device()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let device: DeviceResponse = json_body(response).await;
    assert!(device.id > 0);
    assert_eq!(device.serial_number, "ABC-123");
    assert_eq!(device.uuid, "e58ed763-928c-4155-bee9-fdbaaadc15f3");
    assert_eq!(device.phone_number, "+49 172 234567");
    assert_eq!(device.model, "Model S");
}

#[tokio::test]
async fn test_create_duplicate_device_conflicts() {
    let app = TestApp::new();
    app.post_json("/devices", &sample_device()).await;

    let response = app.post_json("/devices", &sample_device()).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.title, "Device already exists");
    assert_eq!(error.status, "CONFLICT");
    assert_eq!(error.path, "/devices");
}

#[tokio::test]
async fn test_create_device_with_reused_uuid_conflicts() {
    let app = TestApp::new();
    let first = device_body();
    app.create_device(&first).await;

    let mut second = device_body();
    second["uuid"] = first["uuid"].clone();
    let response = app.post_json("/devices", &second).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_device_reports_blank_fields() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/devices",
            &json!({ "serialNumber": " ", "uuid": "abc", "model": "Model S" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors: Vec<FieldError> = json_body(response).await;
    assert_eq!(
        errors,
        vec![
            FieldError {
                field: "phoneNumber".into(),
                error: "Phone number can not be null or blank".into(),
            },
            FieldError {
                field: "serialNumber".into(),
                error: "Serial number can not be null or blank".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_create_device_rejects_oversized_phone_number() {
    let app = TestApp::new();
    let mut body = sample_device();
    body["phoneNumber"] = json!("1".repeat(256));

    let response = app.post_json("/devices", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors: Vec<FieldError> = json_body(response).await;
    assert_eq!(
        errors,
        vec![FieldError {
            field: "phoneNumber".into(),
            error: "Phone number can not be longer than 255 characters".into(),
        }]
    );
}

#[tokio::test]
async fn test_create_device_accepts_long_phone_number() {
    let app = TestApp::new();
    let mut body = device_body();
    body["phoneNumber"] = json!("1".repeat(65));

    let response = app.post_json("/devices", &body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_device_with_malformed_json() {
    let app = TestApp::new();

    let response = app.post_raw("/devices", "{ not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.status, "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_device() {
    let app = TestApp::new();
    let id = app.create_device(&sample_device()).await;

    let response = app.get(&format!("/devices/{}", id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let device: DeviceResponse = json_body(response).await;
    assert_eq!(device.id, id);
}

#[tokio::test]
async fn test_get_unknown_device() {
    let app = TestApp::new();

    let response = app.get("/devices/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.title, "Device not found");
    assert_eq!(error.path, "/devices/999");
}

#[tokio::test]
async fn test_get_device_with_non_numeric_id() {
    let app = TestApp::new();

    let response = app.get("/devices/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
