//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use fake::faker::address::en::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

use device_registry::config::Settings;
use device_registry::infrastructure::memory::MemoryUnitOfWork;
use device_registry::startup::{build_router, AppState};

/// Test application over a fresh in-memory store
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application with default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let state = AppState::new(Arc::new(MemoryUnitOfWork::new()), settings);
        Self {
            router: build_router(state),
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.post_raw(uri, &body.to_string()).await
    }

    /// Make a POST request with an arbitrary body
    pub async fn post_raw(&self, uri: &str, body: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Create a device and return its ID
    pub async fn create_device(&self, body: &Value) -> i64 {
        let response = self.post_json("/devices", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body::<Value>(response).await["id"].as_i64().unwrap()
    }

    /// Create a user and return its ID
    pub async fn create_user(&self, body: &Value) -> i64 {
        let response = self.post_json("/users", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body::<Value>(response).await["id"].as_i64().unwrap()
    }
}

/// Deserialize a response body
pub async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text
pub async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A device body with unique serial number and UUID
pub fn device_body() -> Value {
    json!({
        "serialNumber": format!("SN-{}", &uuid::Uuid::new_v4().simple().to_string()[..12]),
        "uuid": uuid::Uuid::new_v4().to_string(),
        "phoneNumber": "+49 172 234567",
        "model": "Model S"
    })
}

/// A user body with a random, practically unique identity
pub fn user_body() -> Value {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    user_body_named(&first_name, &format!("{}-{}", last_name, unique_suffix()))
}

/// A user body with the given names, born 1980-01-01
pub fn user_body_named(first_name: &str, last_name: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": last_name,
        "birthday": "1980-01-01",
        "address": {
            "street": StreetName().fake::<String>(),
            "city": CityName().fake::<String>(),
            "number": "67B",
            "zipCode": ZipCode().fake::<String>(),
            "country": CountryName().fake::<String>()
        }
    })
}

fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
