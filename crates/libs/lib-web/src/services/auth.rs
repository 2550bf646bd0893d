//! # Authentication Service
//!
//! Business logic for registration, login, token authorization and profile
//! reads.
//!
//! ## Overview
//!
//! ```text
//! register ─┬─> validate email ─> uniqueness check ─> hash ─> insert
//! login ────┴─> find by email ─> verify hash ─> issue token
//! authorize ──> validate token ─> user id
//! profile ────> find by id
//! ```
//!
//! The service only depends on the [`CredentialStore`] trait and a
//! [`TokenKeys`] built once from configuration; it holds no mutable state and
//! is cheap to clone into every request.
//!
//! Argon2 is deliberately slow, so hashing and verification run on tokio's
//! blocking pool instead of the async workers.
//!
//! ## Error Handling
//!
//! - `AppError::Validation` - Email fails the shape check
//! - `AppError::Conflict` - Email already registered
//! - `AppError::Authentication` - Unknown email or wrong password (same message for both)
//! - `AppError::Unauthenticated` / `AppError::InvalidToken` - Missing or rejected token
//! - `AppError::NotFound` - Token subject no longer exists
//! - `AppError::Hashing` / `AppError::Token` / `AppError::Database` - Server-side failures

use chrono::Duration;
use lib_auth::{hash_password, pwd, token, verify_password, TokenKeys};
use lib_core::dto::{LoginResponse, ProfileResponse};
use lib_core::model::store::UserForCreate;
use lib_core::{AppError, Config, CredentialStore, Result};
use lib_utils::validate_email;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, instrument, warn};

/// Service for credential authentication and session tokens.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    keys: Arc<TokenKeys>,
    token_ttl: Duration,
}

impl AuthService {
    /// Create a new auth service.
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store owning user records
    /// * `keys` - Session-token signing keys
    /// * `token_ttl` - Lifetime of tokens issued by [`login`](Self::login)
    pub fn new(store: Arc<dyn CredentialStore>, keys: TokenKeys, token_ttl: Duration) -> Self {
        Self {
            store,
            keys: Arc::new(keys),
            token_ttl,
        }
    }

    /// Create the service from validated application configuration.
    pub fn from_config(store: Arc<dyn CredentialStore>, config: &Config) -> Result<Self> {
        let keys = TokenKeys::new(&config.jwt_secret)
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self::new(store, keys, config.token_ttl()))
    }

    /// Register a new account and return its id.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<i64> {
        validate_email(email).map_err(AppError::Validation)?;

        if !self.store.is_email_unique(email).await? {
            warn!("[REGISTER] Email already registered");
            return Err(AppError::Conflict(lib_core::error::MSG_EMAIL_TAKEN.to_string()));
        }

        debug!("[REGISTER] Hashing password...");
        let password = password.to_string();
        let password_hash = run_blocking(move || hash_password(&password))
            .await?
            .map_err(|e| AppError::Hashing(e.to_string()))?;

        // The UNIQUE constraint still catches a registration racing this one.
        let user = self
            .store
            .insert(UserForCreate::new(email.to_string(), password_hash))
            .await?;

        info!(user_id = user.id, "[REGISTER] User created");
        Ok(user.id)
    }

    /// Check credentials and issue a session token.
    ///
    /// Unknown email and wrong password fail identically, and both pay for
    /// one Argon2 verification, so neither the message nor the latency tells
    /// whether an account exists.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let user = self.store.find_by_email(email).await?;

        let stored_hash = user.as_ref().map(|user| user.password_hash.clone());
        let password = password.to_string();
        let is_valid = run_blocking(move || check_password(&password, stored_hash.as_deref()))
            .await?
            .map_err(|e| AppError::Hashing(e.to_string()))?;

        let user = match user {
            Some(user) if is_valid => user,
            Some(user) => {
                warn!(user_id = user.id, "[LOGIN] Invalid password");
                return Err(AppError::Authentication);
            }
            None => {
                warn!("[LOGIN] Unknown email");
                return Err(AppError::Authentication);
            }
        };

        let token = self
            .keys
            .issue(&user.id.to_string(), self.token_ttl)
            .map_err(|e| AppError::Token(e.to_string()))?;

        info!(user_id = user.id, "[LOGIN] User authenticated");
        Ok(LoginResponse {
            token,
            user_id: user.id,
        })
    }

    /// Resolve the value of the `x-auth-token` header to a user id.
    ///
    /// A missing or empty header is `Unauthenticated`; anything else that
    /// fails validation is `InvalidToken`.
    pub fn authorize(&self, token: Option<&str>) -> Result<i64> {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AppError::Unauthenticated),
        };

        let claims = self.keys.validate(token).map_err(|e| match e {
            token::Error::Expired { exp } => AppError::InvalidToken(format!("expired at {exp}")),
            other => AppError::InvalidToken(other.to_string()),
        })?;

        claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::InvalidToken(format!("non-numeric subject {:?}", claims.sub)))
    }

    /// Public profile of an authenticated user.
    pub async fn get_profile(&self, user_id: i64) -> Result<ProfileResponse> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(ProfileResponse {
            id: user.id,
            email: user.email,
        })
    }
}

/// Run CPU-heavy work on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {e}")))
}

/// Verify `password` against the stored hash, or against a placeholder
/// hash when there is no account. Must run on the blocking pool.
fn check_password(
    password: &str,
    stored_hash: Option<&str>,
) -> std::result::Result<bool, pwd::Error> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            if let Some(hash) = dummy_hash() {
                verify_password(password, hash)?;
            }
            Ok(false)
        }
    }
}

/// Hash verified against when the email is unknown.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("unknown-account-placeholder").ok())
        .as_deref()
}
