// HTTP API error taxonomy
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::config;
use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-safe messages.
///
/// Validation and credential failures carry their message directly; storage
/// and internal failures keep the underlying cause private and expose it only
/// as a `detail` field in development mode.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    MissingField(String),
    InvalidType(String),
    FieldTooLong(String),
    InvalidIdentifier(String),

    // 401 Unauthorized
    MissingCredential(String),
    InvalidCredential(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    StorageRead(String),
    StorageWrite(String),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_)
            | ApiError::InvalidType(_)
            | ApiError::FieldTooLong(_)
            | ApiError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential(_) | ApiError::InvalidCredential(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::StorageRead(_) | ApiError::StorageWrite(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::MissingField(msg)
            | ApiError::InvalidType(msg)
            | ApiError::FieldTooLong(msg)
            | ApiError::InvalidIdentifier(msg)
            | ApiError::MissingCredential(msg)
            | ApiError::InvalidCredential(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
            ApiError::StorageRead(_) => "failed to read task storage",
            ApiError::StorageWrite(_) => "failed to write task storage",
            ApiError::Internal(_) => "internal server error",
        }
    }

    /// Internal cause, never exposed outside development mode.
    fn detail(&self) -> Option<&str> {
        match self {
            ApiError::StorageRead(detail)
            | ApiError::StorageWrite(detail)
            | ApiError::Internal(detail) => Some(detail),
            _ => None,
        }
    }

    /// Convert to the uniform `{error: message}` response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({ "error": self.message() });
        if config::config().is_development() {
            if let Some(detail) = self.detail() {
                body["detail"] = Value::String(detail.to_string());
            }
        }
        body
    }
}

// Static constructor methods used across handlers and middleware
impl ApiError {
    pub fn missing_field(field: &str) -> Self {
        ApiError::MissingField(format!("field '{}' is required", field))
    }

    pub fn invalid_type(field: &str, expected: &str) -> Self {
        ApiError::InvalidType(format!("field '{}' must be {}", field, expected))
    }

    pub fn field_too_long(field: &str, max: usize) -> Self {
        ApiError::FieldTooLong(format!("field '{}' must not exceed {} characters", field, max))
    }

    pub fn invalid_identifier(raw: &str) -> Self {
        ApiError::InvalidIdentifier(format!("'{}' is not a valid base-10 integer id", raw))
    }

    pub fn missing_credential(message: impl Into<String>) -> Self {
        ApiError::MissingCredential(message.into())
    }

    pub fn invalid_credential(message: impl Into<String>) -> Self {
        ApiError::InvalidCredential(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Read(_) | StoreError::Corrupt(_) => ApiError::StorageRead(err.to_string()),
            StoreError::Write(_) | StoreError::Encode(_) => ApiError::StorageWrite(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return ApiError::conflict("resource already exists");
            }
        }
        ApiError::Internal(err.to_string())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, detail = ?self.detail(), "request failed");
        }
        (status, Json(self.to_json())).into_response()
    }
}
