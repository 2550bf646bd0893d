//! In-memory credential store for development and testing
//!
//! Keeps all users in a map behind a tokio `RwLock`. Uniqueness is checked
//! under the write lock, so concurrent registrations of the same email
//! cannot both succeed.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::credential_store::CredentialStore;
use super::models::{User, UserForCreate};
use crate::error::{AppError, Result, MSG_EMAIL_TAKEN};

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    next_id: i64,
}

/// In-memory user storage
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user, returning it if it existed.
    pub async fn remove(&self, id: i64) -> Option<User> {
        self.inner.write().await.users.remove(&id)
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: UserForCreate) -> Result<User> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(MSG_EMAIL_TAKEN.to_string()));
        }

        inner.next_id += 1;
        let now = lib_utils::now_utc();
        let stored = User {
            id: inner.next_id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn is_email_unique(&self, email: &str) -> Result<bool> {
        Ok(self.find_by_email(email).await?.is_none())
    }
}
