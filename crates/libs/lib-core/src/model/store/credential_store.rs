//! # Credential Store
//!
//! Storage-agnostic interface for user identities and their password hashes.
//!
//! The authentication service only talks to this trait, so it can run against
//! SQLite in production and [`MemoryCredentialStore`](super::MemoryCredentialStore)
//! in tests.
//!
//! Implementations must enforce email uniqueness at write time: `insert` on an
//! existing email returns [`AppError::Conflict`], even if a prior
//! `is_email_unique` call said otherwise.

use async_trait::async_trait;

use super::models::{User, UserForCreate};
use super::user_repository::UserRepository;
use super::DbPool;
use crate::error::{AppError, Result, MSG_EMAIL_TAKEN};

/// Durable store of user identities.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Insert a new user, returning the stored record.
    async fn insert(&self, user: UserForCreate) -> Result<User>;

    /// `true` if no user is registered under `email`.
    async fn is_email_unique(&self, email: &str) -> Result<bool>;
}

/// [`CredentialStore`] backed by the SQLite `users` table.
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: DbPool,
}

impl SqliteCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(UserRepository::find_by_email(&self.pool, email).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(UserRepository::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, user: UserForCreate) -> Result<User> {
        match UserRepository::create(&self.pool, user).await {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::Conflict(MSG_EMAIL_TAKEN.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn is_email_unique(&self, email: &str) -> Result<bool> {
        Ok(!UserRepository::email_exists(&self.pool, email).await?)
    }
}
