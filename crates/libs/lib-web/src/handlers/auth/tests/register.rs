//! # Register Tests
//!
//! Tests for `POST /api/auth/register`.

use super::*;
use lib_core::model::store::UserRepository;

#[tokio::test]
async fn test_register_success() {
    // Arrange
    let pool = setup_test_db().await;
    let app = test_app(pool.clone());

    // Act
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@b.com", "password": "pw123456" })),
        None,
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Registration successful");
    let user_id = body["userId"].as_i64().unwrap();

    let user = UserRepository::find_by_id(&pool, user_id)
        .await
        .unwrap()
        .expect("User should be stored");
    assert_eq!(user.email, "a@b.com");
    assert_ne!(user.password_hash, "pw123456");
}

#[tokio::test]
async fn test_register_invalid_email() {
    // Arrange
    let pool = setup_test_db().await;

    for email in ["", "plainaddress", "a@b", "a@ b.com", "@b.com"] {
        // Act
        let (status, body) = send(
            test_app(pool.clone()),
            "POST",
            "/api/auth/register",
            Some(json!({ "email": email, "password": "pw123456" })),
            None,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST, "email {email:?}");
        assert_eq!(body, json!({ "message": "Invalid email format" }));
    }
}

#[tokio::test]
async fn test_register_duplicate_email() {
    // Arrange
    let pool = setup_test_db().await;
    register_user(&pool, "a@b.com", "pw123456").await;

    // Act
    let (status, body) = send(
        test_app(pool),
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@b.com", "password": "a-different-password" })),
        None,
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Email already registered" }));
}

#[tokio::test]
async fn test_register_malformed_body() {
    // Arrange
    let pool = setup_test_db().await;

    // Act
    let (status, body) = send(
        test_app(pool),
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@b.com" })),
        None,
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid request body" }));
}

#[tokio::test]
async fn test_register_wrong_method_is_json() {
    // Arrange
    let pool = setup_test_db().await;

    // Act
    let (status, body) = send(test_app(pool), "GET", "/api/auth/register", None, None).await;

    // Assert
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "message": "Method Not Allowed" }));
}
