//! # User Repository
//!
//! Provides database access layer for user-related operations.
//!
//! This module implements the repository pattern for user data access,
//! providing a clean abstraction over SQL queries.
//!
//! Email comparison is exact: SQLite's `=` uses BINARY collation, so
//! `Alice@example.com` and `alice@example.com` are different accounts.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, UserForCreate, UserRepository};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//!
//! // Create a new user
//! let user = UserRepository::create(
//!     &pool,
//!     UserForCreate::new("alice@example.com".to_string(), "hashed_password".to_string()),
//! ).await?;
//!
//! // Find user by email
//! let found = UserRepository::find_by_email(&pool, "alice@example.com").await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate};
use super::DbPool;
use sqlx::query_as;

/// User repository for database operations.
///
/// All methods are async and return `Result` types for proper error handling.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching email
    /// * `Ok(None)` - No user found with that email
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by primary key.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether an email is already registered.
    pub async fn email_exists(pool: &DbPool, email: &str) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) = query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    /// Create a new user in the database.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The newly created user with generated ID and timestamps
    /// * `Err(sqlx::Error)` - Database error (e.g., constraint violation for duplicate email)
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Email already exists (UNIQUE constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &DbPool, user_data: UserForCreate) -> Result<User, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
            .bind(&user_data.email)
            .bind(&user_data.password_hash)
            .execute(pool)
            .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
