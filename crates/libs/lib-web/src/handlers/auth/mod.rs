//! # Authentication Handlers
//!
//! HTTP request handlers for the public authentication endpoints.
//!
//! ## Overview
//!
//! - `POST /api/auth/register` - Create an account from email and password
//! - `POST /api/auth/login` - Exchange credentials for a session token
//!
//! Both handlers are thin wrappers over [`AuthService`]; every failure is an
//! [`AppError`](lib_core::AppError) rendered as `{"message": ...}`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{register, login};
//!
//! let app = Router::new()
//!     .route("/api/auth/register", post(register))
//!     .route("/api/auth/login", post(login))
//!     .with_state(state);
//! ```

use axum::{extract::State, http::StatusCode, Json};
use lib_core::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use lib_core::Result;
use tracing::{info, instrument};

use crate::extract::AppJson;
use crate::services::AuthService;

/// Register handler - creates a new account.
///
/// # Returns
///
/// * `201 {"message": "Registration successful", "userId": <id>}` on success
/// * `400 {"message": "Invalid email format"}` if the email fails the shape check
/// * `400 {"message": "Email already registered"}` on a duplicate email
/// * `500 {"message": "Server error, please try again later"}` on hashing or storage failure
#[instrument(skip_all, fields(email = %req.email))]
pub async fn register(
    State(auth): State<AuthService>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    info!("[REGISTER] New registration request");

    let user_id = auth.register(&req.email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user_id,
        }),
    ))
}

/// Login handler - authenticates and issues a session token.
///
/// # Returns
///
/// * `200 {"token": "...", "userId": <id>}` on success
/// * `401 {"message": "Invalid email or password"}` for an unknown email or wrong password
#[instrument(skip_all, fields(email = %req.email))]
pub async fn login(
    State(auth): State<AuthService>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    info!("[LOGIN] Login attempt");

    let response = auth.login(&req.email, &req.password).await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests;
