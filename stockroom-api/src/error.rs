/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate status code:
///
/// - business-rule failures (bad email, duplicate registration, wrong
///   password, mismatched confirmation, malformed bodies) -> 400
/// - unexpected persistence failure during registration -> 502
/// - token signing and other infrastructure failures -> 500
///
/// Internal error details are logged, never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use stockroom_shared::auth::{authenticator::AuthError, token::TokenError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) — user input or business rule violation
    BadRequest(String),

    /// Internal server error (500)
    Internal(String),

    /// Bad gateway (502) — unexpected persistence failure
    BadGateway(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "internal_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::BadGateway(msg) => {
                tracing::error!("Persistence failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "bad_gateway",
                    "A persistence failure occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert authentication errors to API errors
///
/// Business-rule kinds surface to the caller as 400 with their message;
/// infrastructure kinds become 502 (persistence) or 500 (hashing).
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_business_rule() {
            return ApiError::BadRequest(err.to_string());
        }

        match err {
            AuthError::Database(e) => ApiError::BadGateway(format!("Database error: {}", e)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Convert token signing errors to API errors (500)
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Internal(format!("Session token operation failed: {}", err))
    }
}

/// Convert sqlx errors reaching a handler directly to API errors (500)
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(format!("Database error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");
    }

    #[test]
    fn test_business_errors_map_to_400() {
        for err in [
            AuthError::NotAnEmail,
            AuthError::UserExists,
            AuthError::UserNotExists,
            AuthError::IncorrectPassword,
            AuthError::PasswordsNotSame,
        ] {
            let api_err = ApiError::from(err);
            assert!(matches!(api_err, ApiError::BadRequest(_)));
        }
    }

    #[test]
    fn test_persistence_errors_map_to_502() {
        let api_err = ApiError::from(AuthError::Database(sqlx::Error::RowNotFound));
        assert!(matches!(api_err, ApiError::BadGateway(_)));
    }

    #[test]
    fn test_error_status_codes() {
        let response = ApiError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::BadGateway("db".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
