//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across all backend modules. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - User/input issues
//!    - [`Validation`](AppError::Validation) → 400 Bad Request
//!    - [`Conflict`](AppError::Conflict) → 400 Bad Request (duplicate email)
//!    - [`Authentication`](AppError::Authentication) → 401 Unauthorized (bad credentials)
//!    - [`Unauthenticated`](AppError::Unauthenticated) → 401 Unauthorized (no token)
//!    - [`InvalidToken`](AppError::InvalidToken) → 401 Unauthorized (bad or expired token)
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Server Errors** (5xx) - Internal/system issues
//!    - [`Hashing`](AppError::Hashing), [`Token`](AppError::Token),
//!      [`Database`](AppError::Database), [`Config`](AppError::Config),
//!      [`Internal`](AppError::Internal) → 500 Internal Server Error
//!
//! ## Wire Format
//!
//! Every error renders as `{"message": "..."}`. Server errors always carry the same
//! generic message; the detail only goes to the logs.
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_email(email: &str) -> Result<&str> {
//!     if !email.contains('@') {
//!         return Err(AppError::Validation("Invalid email format".to_string()));
//!     }
//!     Ok(email)
//! }
//! ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::dto::ErrorResponse;

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const MSG_EMAIL_TAKEN: &str = "Email already registered";
pub const MSG_NO_TOKEN: &str = "No access token, please log in first";
pub const MSG_INVALID_TOKEN: &str = "Invalid token";
pub const MSG_SERVER_ERROR: &str = "Server error, please try again later";

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed client input (bad email shape, unparsable body).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource already exists (email already registered).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Wrong email or password. Deliberately carries no detail.
    #[error("Authentication failed")]
    Authentication,

    /// Protected route called without a token.
    #[error("Missing access token")]
    Unauthenticated,

    /// Token present but rejected (signature, payload, expiry).
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Password hashing or verifier parsing failed.
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// Token could not be issued.
    #[error("Token error: {0}")]
    Token(String),

    /// Storage failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication | AppError::Unauthenticated | AppError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Conflict(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Authentication => MSG_INVALID_CREDENTIALS.to_string(),
            AppError::Unauthenticated => MSG_NO_TOKEN.to_string(),
            AppError::InvalidToken(_) => MSG_INVALID_TOKEN.to_string(),
            AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_) => MSG_SERVER_ERROR.to_string(),
        }
    }
}

/// Render `{"message": ...}` with the matching status code.
pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log error details (full error message for server logs)
        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        message_response(status, self.user_message())
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => AppError::Database(db_err.message().to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

/// Convert environment lookup failures to `AppError`.
impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Convert JSON body rejections to a 400 instead of axum's default 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::Validation("Invalid request body".to_string())
    }
}
