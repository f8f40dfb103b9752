// HTTP error handling

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Application error with HTTP status code
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

/// Error response JSON structure
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(ErrorResponse {
            error: self.message,
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}

/// Convert `tunein_core` errors to HTTP errors.
///
/// Caller mistakes keep their message; server-side causes are logged and
/// replaced by a generic one.
impl From<tunein_core::Error> for AppError {
    fn from(err: tunein_core::Error) -> Self {
        use tunein_core::Error;

        match err {
            Error::InvalidInput(msg) => Self::bad_request(msg),
            Error::Authorization(msg) => Self::forbidden(msg),
            Error::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                Self::internal("Server is not configured")
            }
            Error::Upstream(msg) => {
                tracing::error!("Streaming provider error: {}", msg);
                Self::internal("Streaming provider request failed")
            }
            Error::Redis(e) => {
                tracing::error!("Redis error: {}", e);
                Self::internal("Service temporarily unavailable")
            }
            Error::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                Self::internal("Data processing error")
            }
            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(format!("Invalid query: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_status() {
        let cases = [
            (tunein_core::Error::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (tunein_core::Error::Authorization("x".into()), StatusCode::FORBIDDEN),
            (tunein_core::Error::Configuration("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (tunein_core::Error::Upstream("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (tunein_core::Error::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::from(tunein_core::Error::Upstream("secret host".into()));
        assert!(!err.message.contains("secret host"));

        let err = AppError::from(tunein_core::Error::Authorization(
            "cannot broadcast on another owner's station".into(),
        ));
        assert_eq!(err.message, "cannot broadcast on another owner's station");
    }
}
