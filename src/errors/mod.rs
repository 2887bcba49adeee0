//! Error handling module for the Flopar client.
//!
//! Provides centralized error types and decoding of the backend's error bodies.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Fallback shown when the backend gives no usable message.
pub const FALLBACK_MESSAGE: &str = "The product could not be verified";

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or the session expired
    Unauthorized(String),
    /// Operation not available for the session's role
    Forbidden(String),
    /// Resource not found
    NotFound(String),
    /// Local input or configuration rejected
    Validation(String),
    /// Non-success reply from the backend
    Backend { status: StatusCode, message: String },
    /// Transport failure (connection, timeout, malformed reply)
    Network(String),
    /// Session file could not be read or written
    Storage(String),
    /// Anything else
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Forbidden(_) => codes::FORBIDDEN,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Backend { .. } => codes::BACKEND_ERROR,
            AppError::Network(_) => codes::NETWORK_ERROR,
            AppError::Storage(_) => codes::STORAGE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Backend { message, .. } => message.clone(),
            AppError::Network(msg) => msg.clone(),
            AppError::Storage(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }

    /// Build a backend error from a non-success status and its decoded body.
    pub fn from_backend(status: StatusCode, body: Option<BackendErrorBody>) -> Self {
        let detail = body.and_then(|b| b.detail);
        let message = match &detail {
            Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
            _ if status == StatusCode::NOT_FOUND => "Resource not found".to_string(),
            _ => format!("{} (HTTP {})", FALLBACK_MESSAGE, status.as_u16()),
        };

        if status == StatusCode::NOT_FOUND {
            return AppError::NotFound(message);
        }

        AppError::Backend { status, message }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_timeout() {
            AppError::Network("The backend did not answer in time".to_string())
        } else if err.is_decode() {
            AppError::Network(format!("Unexpected reply from backend: {}", err))
        } else {
            AppError::Network(format!("Could not reach backend: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Storage(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Storage(format!("I/O error: {}", err))
    }
}

impl From<rustyline::error::ReadlineError> for AppError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        AppError::Internal(format!("Terminal error: {}", err))
    }
}

/// FastAPI-style error body: `{"detail": ...}`.
#[derive(Debug, Default, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_detail_becomes_message() {
        let body = BackendErrorBody {
            detail: Some(json!("Producto ya verificado")),
        };
        let err = AppError::from_backend(StatusCode::BAD_REQUEST, Some(body));
        assert_eq!(err.error_code(), codes::BACKEND_ERROR);
        assert_eq!(err.message(), "Producto ya verificado");
    }

    #[test]
    fn test_structured_detail_uses_fallback_message() {
        let body = BackendErrorBody {
            detail: Some(json!({ "pending_products": [{ "code": "123" }] })),
        };
        let err = AppError::from_backend(StatusCode::CONFLICT, Some(body));
        match err {
            AppError::Backend { status, message } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert_eq!(message, format!("{} (HTTP 409)", FALLBACK_MESSAGE));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_found_status_maps_to_not_found() {
        let err = AppError::from_backend(StatusCode::NOT_FOUND, None);
        assert_eq!(err.error_code(), codes::NOT_FOUND);
    }
}
