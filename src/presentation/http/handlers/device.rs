//! Device Handlers

use axum::{extract::State, http::StatusCode, http::Uri, Json};

use crate::application::dto::{CreateDeviceRequest, DeviceResponse};
use crate::presentation::http::extractors::{PathParam, ValidatedJson};
use crate::shared::error::ApiError;
use crate::startup::AppState;

/// Register a new device
pub async fn create_device(
    State(state): State<AppState>,
    uri: Uri,
    ValidatedJson(body): ValidatedJson<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<DeviceResponse>), ApiError> {
    let device = state
        .device_service
        .create(body.into())
        .await
        .map_err(|e| e.at(uri.path()))?;

    Ok((StatusCode::CREATED, Json(device.into())))
}

/// Get a device by ID
pub async fn get_device(
    State(state): State<AppState>,
    uri: Uri,
    PathParam(device_id): PathParam<i64>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let device = state
        .device_service
        .get_by_id(device_id)
        .await
        .map_err(|e| e.at(uri.path()))?;

    Ok(Json(device.into()))
}
