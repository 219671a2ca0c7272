//! User API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{device_body, json_body, user_body, user_body_named, TestApp};
use device_registry::application::dto::{PageResponse, UserResponse};
use device_registry::config::Settings;
use device_registry::shared::error::{ErrorResponse, FieldError};

fn john_textor() -> Value {
    json!({
        "firstName": "John",
        "lastName": "Textor",
        "birthday": "1980-01-01",
        "address": {
            "street": "Borussiastrasse",
            "city": "Berlin",
            "number": "67B",
            "zipCode": "123",
            "country": "Germany"
        }
    })
}

#[tokio::test]
async fn test_create_user_returns_created() {
    let app = TestApp::new();

    let response = app.post_json("/users", &john_textor()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let user: UserResponse = json_body(response).await;
    assert!(user.id > 0);
    assert_eq!(user.first_name, "John");
    assert_eq!(user.last_name, "Textor");
    assert_eq!(user.birthday.to_string(), "1980-01-01");
    assert_eq!(user.address.zip_code, "123");
    assert!(user.devices.is_empty());
}

#[tokio::test]
async fn test_create_same_user_twice_conflicts() {
    let app = TestApp::new();
    app.create_user(&john_textor()).await;

    let response = app.post_json("/users", &john_textor()).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.title, "User already exists");
    assert_eq!(error.path, "/users");
}

#[tokio::test]
async fn test_create_user_with_other_birthday_succeeds() {
    let app = TestApp::new();
    app.create_user(&john_textor()).await;

    let mut body = john_textor();
    body["birthday"] = json!("1981-01-01");
    let response = app.post_json("/users", &body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_user_reports_nested_fields() {
    let app = TestApp::new();
    let mut body = john_textor();
    body["address"]["city"] = json!("");
    body["birthday"] = json!("2999-01-01");

    let response = app.post_json("/users", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors: Vec<FieldError> = json_body(response).await;
    assert_eq!(
        errors,
        vec![
            FieldError {
                field: "address.city".into(),
                error: "City can not be null or blank".into(),
            },
            FieldError {
                field: "birthday".into(),
                error: "Date of birth should be a past date".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_assign_device_returns_accepted_with_device() {
    let app = TestApp::new();
    let user_id = app.create_user(&john_textor()).await;
    let device_id = app.create_device(&device_body()).await;

    let response = app
        .post_empty(&format!(
            "/users/assign?userId={}&deviceId={}",
            user_id, device_id
        ))
        .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let user: UserResponse = json_body(response).await;
    assert_eq!(user.id, user_id);
    assert_eq!(user.devices.len(), 1);
    assert_eq!(user.devices[0].id, device_id);
}

#[tokio::test]
async fn test_assign_device_twice_conflicts() {
    let app = TestApp::new();
    let user_id = app.create_user(&john_textor()).await;
    let device_id = app.create_device(&device_body()).await;
    let uri = format!("/users/assign?userId={}&deviceId={}", user_id, device_id);
    app.post_empty(&uri).await;

    let response = app.post_empty(&uri).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.title, "Device already assigned to me");
    assert_eq!(error.path, "/users/assign");
}

#[tokio::test]
async fn test_assign_device_of_another_user_conflicts() {
    let app = TestApp::new();
    let owner = app.create_user(&user_body()).await;
    let other = app.create_user(&user_body()).await;
    let device_id = app.create_device(&device_body()).await;
    app.post_empty(&format!(
        "/users/assign?userId={}&deviceId={}",
        owner, device_id
    ))
    .await;

    let response = app
        .post_empty(&format!(
            "/users/assign?userId={}&deviceId={}",
            other, device_id
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.title, "Device already assigned to another user");
}

#[tokio::test]
async fn test_assign_to_unknown_user() {
    let app = TestApp::new();
    let device_id = app.create_device(&device_body()).await;

    let response = app
        .post_empty(&format!("/users/assign?userId=999&deviceId={}", device_id))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.title, "User not found");
}

#[tokio::test]
async fn test_assign_unknown_device() {
    let app = TestApp::new();
    let user_id = app.create_user(&john_textor()).await;

    let response = app
        .post_empty(&format!("/users/assign?userId={}&deviceId=999", user_id))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.title, "Device not found");
}

#[tokio::test]
async fn test_assign_without_parameters() {
    let app = TestApp::new();

    let response = app.post_empty("/users/assign?userId=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_sorted_by_last_name() {
    let app = TestApp::new();
    for last_name in ["Zuse", "Adams", "Meyer"] {
        app.create_user(&user_body_named("John", last_name)).await;
    }

    let response = app.get("/users").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page: PageResponse<UserResponse> = json_body(response).await;
    let names: Vec<_> = page.content.iter().map(|u| u.last_name.as_str()).collect();
    assert_eq!(names, vec!["Adams", "Meyer", "Zuse"]);
    assert_eq!(page.size, 10);
    assert_eq!(page.number, 0);
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.number_of_elements, 3);
    assert!(page.first);
    assert!(page.last);
    assert!(!page.empty);
}

#[tokio::test]
async fn test_list_users_with_page_size_and_sort() {
    let app = TestApp::new();
    for first_name in ["Ada", "Bob", "Cid"] {
        app.create_user(&user_body_named(first_name, "Doe")).await;
    }

    let response = app.get("/users?page=0&size=2&sort=firstName,desc").await;

    let page: PageResponse<UserResponse> = json_body(response).await;
    let names: Vec<_> = page.content.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["Cid", "Bob"]);
    assert_eq!(page.total_pages, 2);
    assert!(!page.last);
}

#[tokio::test]
async fn test_list_users_default_page_size_truncates() {
    let app = TestApp::new();
    for _ in 0..12 {
        app.create_user(&user_body()).await;
    }

    let response = app.get("/users").await;

    let page: PageResponse<UserResponse> = json_body(response).await;
    assert_eq!(page.content.len(), 10);
    assert_eq!(page.number_of_elements, 10);
    assert_eq!(page.total_elements, 12);
    assert_eq!(page.total_pages, 2);
    assert!(!page.last);

    let response = app.get("/users?page=1").await;

    let page: PageResponse<UserResponse> = json_body(response).await;
    assert_eq!(page.content.len(), 2);
    assert!(page.last);
}

#[tokio::test]
async fn test_list_users_with_repeated_sort_parameters() {
    let app = TestApp::new();
    for (first_name, last_name) in [("Ada", "Doe"), ("Cid", "Doe"), ("Bob", "Adams")] {
        app.create_user(&user_body_named(first_name, last_name)).await;
    }

    let response = app
        .get("/users?sort=lastName,desc&sort=firstName,desc")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let page: PageResponse<UserResponse> = json_body(response).await;
    let names: Vec<_> = page.content.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["Cid", "Ada", "Bob"]);
}

#[tokio::test]
async fn test_list_users_sort_ignoring_case() {
    let app = TestApp::new();
    for first_name in ["bob", "Ada", "Cid"] {
        app.create_user(&user_body_named(first_name, "Doe")).await;
    }

    let response = app.get("/users?sort=firstName,asc,ignorecase").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page: PageResponse<UserResponse> = json_body(response).await;
    let names: Vec<_> = page.content.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "bob", "Cid"]);
}

#[tokio::test]
async fn test_list_users_clamps_page_size() {
    let mut settings = Settings::default();
    settings.pagination.max_size = 2;
    let app = TestApp::with_settings(settings);

    let response = app.get("/users?size=50").await;

    let page: PageResponse<UserResponse> = json_body(response).await;
    assert_eq!(page.size, 2);
    assert!(page.empty);
}

#[tokio::test]
async fn test_list_users_unknown_sort_property() {
    let app = TestApp::new();

    let response = app.get("/users?sort=email,asc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.title, "No property 'email' found for type 'User'");
}

#[tokio::test]
async fn test_get_user() {
    let app = TestApp::new();
    let user_id = app.create_user(&john_textor()).await;

    let response = app.get(&format!("/users/{}", user_id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let user: UserResponse = json_body(response).await;
    assert_eq!(user.address.city, "Berlin");
}

#[tokio::test]
async fn test_delete_user_removes_devices() {
    let app = TestApp::new();
    let user_id = app.create_user(&john_textor()).await;
    let device_id = app.create_device(&device_body()).await;
    app.post_empty(&format!(
        "/users/assign?userId={}&deviceId={}",
        user_id, device_id
    ))
    .await;

    let response = app.delete(&format!("/users/{}", user_id)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let user = app.get(&format!("/users/{}", user_id)).await;
    assert_eq!(user.status(), StatusCode::NOT_FOUND);
    let device = app.get(&format!("/devices/{}", device_id)).await;
    assert_eq!(device.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_user() {
    let app = TestApp::new();

    let response = app.delete("/users/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
