//! User Handlers

use axum::{extract::State, http::StatusCode, http::Uri, Json};

use crate::application::dto::{
    AssignDeviceParams, CreateUserRequest, ListUsersParams, PageResponse, UserResponse,
};
use crate::presentation::http::extractors::{PathParam, QueryParams, ValidatedJson};
use crate::shared::error::ApiError;
use crate::startup::AppState;

/// Register a new user with its address
pub async fn create_user(
    State(state): State<AppState>,
    uri: Uri,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .user_service
        .create(body.into())
        .await
        .map_err(|e| e.at(uri.path()))?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Assign a device to a user, answering with the user's current state
pub async fn assign_device(
    State(state): State<AppState>,
    uri: Uri,
    QueryParams(params): QueryParams<AssignDeviceParams>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .user_service
        .assign_device(params.user_id, params.device_id)
        .await
        .map_err(|e| e.at(uri.path()))?;

    // The service answers with the user as loaded before the assignment.
    let user = state
        .user_service
        .get_by_id(user.id)
        .await
        .map_err(|e| e.at(uri.path()))?;

    Ok((StatusCode::ACCEPTED, Json(user.into())))
}

/// List users page by page
pub async fn list_users(
    State(state): State<AppState>,
    uri: Uri,
    QueryParams(params): QueryParams<ListUsersParams>,
) -> Result<Json<PageResponse<UserResponse>>, ApiError> {
    let page_request = params
        .into_page_request(&state.settings.pagination)
        .map_err(|e| e.at(uri.path()))?;

    let page = state
        .user_service
        .list(page_request)
        .await
        .map_err(|e| e.at(uri.path()))?;

    Ok(Json(page.into()))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    uri: Uri,
    PathParam(user_id): PathParam<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .get_by_id(user_id)
        .await
        .map_err(|e| e.at(uri.path()))?;

    Ok(Json(user.into()))
}

/// Delete a user together with its devices and address
pub async fn delete_user(
    State(state): State<AppState>,
    uri: Uri,
    PathParam(user_id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete(user_id)
        .await
        .map_err(|e| e.at(uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}
