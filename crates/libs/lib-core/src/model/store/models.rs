use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
///
/// Not serializable on purpose: API responses go through
/// [`ProfileResponse`](crate::dto::ProfileResponse), which has no hash field.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password should be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub email: String,
    pub password_hash: String,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
        }
    }
}
