//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Device already exists")]
    DeviceAlreadyExists,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Device already assigned to me")]
    DeviceAlreadyAssignedToMe,

    #[error("Device already assigned to another user")]
    DeviceAlreadyAssignedToAnotherUser,

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Shorthand for the missing-user error raised by lookups and assignment.
    pub fn user_not_found() -> Self {
        Self::NotFound("User not found".into())
    }

    /// Shorthand for the missing-device error raised by the device service.
    pub fn device_not_found() -> Self {
        Self::NotFound("Device not found".into())
    }

    /// HTTP status this error maps to at the API boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DeviceAlreadyExists
            | AppError::UserAlreadyExists
            | AppError::DeviceAlreadyAssignedToMe
            | AppError::DeviceAlreadyAssignedToAnotherUser => StatusCode::CONFLICT,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::DeviceAlreadyExists => "device_already_exists",
            AppError::UserAlreadyExists => "user_already_exists",
            AppError::DeviceAlreadyAssignedToMe => "device_already_assigned_to_me",
            AppError::DeviceAlreadyAssignedToAnotherUser => {
                "device_already_assigned_to_another_user"
            }
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "validation",
            AppError::Internal(_) => "internal",
            AppError::Database(_) => "database",
        }
    }

    /// Attach the request path so the error can be rendered.
    pub fn at(self, path: impl Into<String>) -> ApiError {
        ApiError {
            error: self,
            path: path.into(),
        }
    }
}

/// Single-error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub title: String,
    pub path: String,
    pub status: String,
    pub timestamp: NaiveDateTime,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// An [`AppError`] bound to the request path it occurred on.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub path: String,
}

impl From<ApiError> for AppError {
    fn from(api_error: ApiError) -> Self {
        api_error.error
    }
}

/// Upper-snake status name, e.g. `NOT_FOUND`.
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace(' ', "_")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();

        let title = match self.error {
            AppError::Validation(errors) => {
                return (status, Json(errors)).into_response();
            }
            AppError::Internal(msg) => {
                tracing::error!(path = %self.path, "Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Database(e) => {
                tracing::error!(path = %self.path, "Database error: {}", e);
                "Internal server error".to_string()
            }
            e @ AppError::NotFound(_) | e @ AppError::BadRequest(_) => {
                tracing::debug!(path = %self.path, error = %e, "Request rejected");
                e.to_string()
            }
            e => {
                tracing::warn!(path = %self.path, kind = e.kind(), "Conflict: {}", e);
                e.to_string()
            }
        };

        let body = ErrorResponse {
            title,
            path: self.path,
            status: status_name(status),
            timestamp: Local::now().naive_local(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(AppError::DeviceAlreadyExists, StatusCode::CONFLICT)]
    #[test_case(AppError::UserAlreadyExists, StatusCode::CONFLICT)]
    #[test_case(AppError::DeviceAlreadyAssignedToMe, StatusCode::CONFLICT)]
    #[test_case(AppError::DeviceAlreadyAssignedToAnotherUser, StatusCode::CONFLICT)]
    #[test_case(AppError::user_not_found(), StatusCode::NOT_FOUND)]
    #[test_case(AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST)]
    #[test_case(AppError::Validation(vec![]), StatusCode::BAD_REQUEST)]
    #[test_case(AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_status(error: AppError, expected: StatusCode) {
        assert_eq!(error.status(), expected);
    }

    #[test]
    fn test_conflict_titles() {
        assert_eq!(AppError::DeviceAlreadyExists.to_string(), "Device already exists");
        assert_eq!(AppError::UserAlreadyExists.to_string(), "User already exists");
        assert_eq!(
            AppError::DeviceAlreadyAssignedToMe.to_string(),
            "Device already assigned to me"
        );
        assert_eq!(
            AppError::DeviceAlreadyAssignedToAnotherUser.to_string(),
            "Device already assigned to another user"
        );
        assert_eq!(AppError::device_not_found().to_string(), "Device not found");
    }

    #[test]
    fn test_status_name() {
        assert_eq!(status_name(StatusCode::CONFLICT), "CONFLICT");
        assert_eq!(status_name(StatusCode::NOT_FOUND), "NOT_FOUND");
        assert_eq!(status_name(StatusCode::BAD_REQUEST), "BAD_REQUEST");
    }

    #[test]
    fn test_api_error_response_status() {
        let response = AppError::DeviceAlreadyExists.at("/devices").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::Validation(vec![FieldError {
            field: "model".into(),
            error: "Model can not be null or blank".into(),
        }])
        .at("/devices")
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
