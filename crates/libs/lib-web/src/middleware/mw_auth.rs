//! # Authentication Middleware
//!
//! Gate for protected routes.
//!
//! This middleware reads the session token from the `x-auth-token` header,
//! resolves it through [`AuthService::authorize`], then injects the caller's
//! identity into the request extensions as [`CtxUser`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use lib_web::middleware::mw_auth::require_auth;
//!
//! let app = Router::new()
//!     .route("/api/user/profile", get(get_profile))
//!     .route_layer(from_fn_with_state(state.clone(), require_auth))
//!     .with_state(state);
//! ```
//!
//! Handlers can then extract the identity using `Extension<CtxUser>`:
//!
//! ```rust,ignore
//! use axum::extract::Extension;
//! use lib_web::middleware::CtxUser;
//!
//! async fn get_profile(Extension(ctx): Extension<CtxUser>) -> String {
//!     format!("Hello, user {}!", ctx.user_id)
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use lib_core::AppError;
use tracing::{debug, warn};

use crate::services::AuthService;

/// Header carrying the session token on protected routes.
pub const AUTH_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-auth-token");

/// Identity of the authenticated caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CtxUser {
    pub user_id: i64,
}

/// Authentication middleware that validates session tokens.
///
/// # Behavior
///
/// - **Valid token**: Continues to the handler with [`CtxUser`] in extensions
/// - **Missing token**: `401` with "No access token, please log in first"
/// - **Invalid or expired token**: `401` with "Invalid token"
pub async fn require_auth(
    State(auth): State<AuthService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = match req.headers().get(AUTH_TOKEN_HEADER) {
        None => auth.authorize(None),
        Some(value) => match value.to_str() {
            Ok(token) => auth.authorize(Some(token)),
            Err(_) => Err(AppError::InvalidToken("header is not visible ASCII".to_string())),
        },
    }
    .inspect_err(|e| warn!("[AUTH] Rejected request to {}: {}", req.uri().path(), e))?;

    debug!("[AUTH] Authenticated user id: {}", user_id);

    req.extensions_mut().insert(CtxUser { user_id });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use chrono::Duration;
    use lib_auth::TokenKeys;
    use lib_core::model::store::MemoryCredentialStore;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

    fn app() -> Router {
        let keys = TokenKeys::new(SECRET).unwrap();
        let auth = AuthService::new(Arc::new(MemoryCredentialStore::new()), keys, Duration::hours(1));

        Router::new()
            .route(
                "/whoami",
                get(|Extension(ctx): Extension<CtxUser>| async move { ctx.user_id.to_string() }),
            )
            .route_layer(from_fn_with_state(auth.clone(), require_auth))
            .with_state(auth)
    }

    async fn call(token: Option<&[u8]>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_token_injects_user() {
        let token = TokenKeys::new(SECRET)
            .unwrap()
            .issue("42", Duration::hours(1))
            .unwrap();

        let (status, body) = call(Some(token.as_bytes())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn test_missing_token() {
        let (status, body) = call(None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("No access token, please log in first"));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let (status, body) = call(Some(&b"garbage"[..])).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_non_ascii_header_is_invalid_token() {
        let (status, body) = call(Some(&[0xE2u8, 0x98, 0x83][..])).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid token"));
    }
}
