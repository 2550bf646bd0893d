//! Shared fixtures for router-level tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_core::{Config, DbPool};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use crate::server::{create_router, AppState};

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// In-memory database with the real migrations applied.
///
/// A single connection, because every new `sqlite::memory:` connection opens
/// a fresh, empty database.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// The production router over `pool`.
pub fn test_app(pool: DbPool) -> Router {
    let state = AppState::new(pool, &test_config()).expect("Test state should build");
    create_router(state, &["http://localhost:8080".to_string()])
}

/// Send one request and decode the JSON response body (`Value::Null` if empty
/// or not JSON).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-auth-token", token);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Register `email`/`password` through the router and return the new id.
pub async fn register_user(pool: &DbPool, email: &str, password: &str) -> i64 {
    let (status, body) = send(
        test_app(pool.clone()),
        "POST",
        "/api/auth/register",
        Some(serde_json::json!({ "email": email, "password": password })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["userId"].as_i64().expect("userId in register response")
}

/// Log in through the router and return the token.
pub async fn login_token(pool: &DbPool, email: &str, password: &str) -> String {
    let (status, body) = send(
        test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        Some(serde_json::json!({ "email": email, "password": password })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token in login response").to_string()
}
