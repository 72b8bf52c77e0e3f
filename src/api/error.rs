/// API error types and helpers
///
/// Every handler failure becomes an `ApiError`: an HTTP status plus a JSON
/// body with a stable `code`, a readable `message` and, for validation
/// failures, the offending `field`. Storage internals are logged server-side
/// and never returned.

use crate::crm::{StoreError, ValidationError};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Structured error returned by handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.to_string(),
                message: message.into(),
                field: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

pub fn api_not_found(message: &str) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not_found", message)
}

/// 404 for endpoints switched off by configuration
pub fn api_not_enabled(message: &str) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not_enabled", message)
}

pub fn api_conflict(code: &str, message: &str) -> ApiError {
    ApiError::new(StatusCode::CONFLICT, code, message)
}

pub fn api_unauthorized(message: &str) -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

pub fn api_forbidden(message: &str) -> ApiError {
    ApiError::new(StatusCode::FORBIDDEN, "forbidden", message)
}

pub fn api_validation_error(message: &str) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// Log `err` and return a generic 500
pub fn api_internal(message: &str, err: &dyn std::fmt::Debug) -> ApiError {
    tracing::error!(error = ?err, "{message}");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                code: "validation_error".to_string(),
                message: err.to_string(),
                field: Some(err.field.to_string()),
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => api_not_found(&format!("{what} not found")),
            StoreError::Conflict(message) => api_conflict("conflict", &message),
            StoreError::InvalidReference(message) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "invalid_reference",
                format!("referenced record does not exist ({message})"),
            ),
            StoreError::Database(err) => api_internal("storage failure", &err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        api_validation_error(&rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        api_validation_error(&rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_build_expected_codes() {
        let cases = [
            (api_not_found("x"), StatusCode::NOT_FOUND, "not_found"),
            (api_not_enabled("x"), StatusCode::NOT_FOUND, "not_enabled"),
            (api_conflict("self_delete", "x"), StatusCode::CONFLICT, "self_delete"),
            (api_unauthorized("x"), StatusCode::UNAUTHORIZED, "unauthorized"),
            (api_forbidden("x"), StatusCode::FORBIDDEN, "forbidden"),
            (api_validation_error("x"), StatusCode::BAD_REQUEST, "validation_error"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status, status);
            assert_eq!(err.body.code, code);
            assert!(err.body.field.is_none());
        }
    }

    #[test]
    fn validation_error_carries_field() {
        let err = ApiError::from(ValidationError::new("email", "is not a valid email address"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.field.as_deref(), Some("email"));
        let json = serde_json::to_value(&err.body).unwrap();
        assert_eq!(json["field"], "email");
    }

    #[test]
    fn store_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(StoreError::NotFound("lead 4".to_string())).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::Conflict("dup".to_string())).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(StoreError::InvalidReference("fk".to_string())).status,
            StatusCode::BAD_REQUEST
        );
        let internal = ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.body.message, "storage failure");
        assert!(serde_json::to_value(&internal.body).unwrap().get("field").is_none());
    }
}
