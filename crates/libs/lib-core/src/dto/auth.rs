//! # Authentication Data Transfer Objects
//!
//! Defines request and response structures for authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/auth/register` - [`RegisterRequest`] -> [`RegisterResponse`]
//! - `POST /api/auth/login` - [`LoginRequest`] -> [`LoginResponse`]
//! - `GET /api/user/profile` - (`x-auth-token` header) -> [`ProfileResponse`]
//!
//! Failures on any endpoint return [`ErrorResponse`].
//!
//! ## Wire Format
//!
//! Field names follow the frontend's existing contract: response ids are
//! **camelCase** (`userId`), everything else is a single word.
//!
//! ### Login Flow
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//!
//! { "email": "a@b.com", "password": "pw123456" }
//! ```
//!
//! Response:
//! ```text
//! { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "userId": 1 }
//! ```
//!
//! The token is then sent back as `x-auth-token: <token>` on protected routes.

use serde::{Deserialize, Serialize};

/// Registration request.
///
/// # Security Note
///
/// Password is sent in plaintext over HTTPS. Server immediately hashes it using Argon2.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful registration (`201 Created`).
///
/// ```json
/// { "message": "Registration successful", "userId": 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Login request with email and password.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful login.
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "userId": 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
}

/// User profile (public, safe to send to client).
///
/// Never includes the password hash.
///
/// ```json
/// { "id": 1, "email": "a@b.com" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
}

/// Standard error response for all API endpoints.
///
/// ```json
/// { "message": "Invalid email or password" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

// Requests hold plaintext passwords; keep them out of logs.
impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_field_names() {
        let register = RegisterResponse {
            message: "Registration successful".to_string(),
            user_id: 3,
        };
        assert_eq!(
            serde_json::to_value(&register).unwrap(),
            json!({ "message": "Registration successful", "userId": 3 })
        );

        let login = LoginResponse {
            token: "t".to_string(),
            user_id: 3,
        };
        assert_eq!(
            serde_json::to_value(&login).unwrap(),
            json!({ "token": "t", "userId": 3 })
        );
    }

    #[test]
    fn test_request_debug_hides_password() {
        let req = LoginRequest {
            email: "a@b.com".to_string(),
            password: "pw123456".to_string(),
        };
        let debug = format!("{:?}", req);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("pw123456"));
    }
}
