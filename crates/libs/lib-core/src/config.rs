//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is an immutable value: build it once in `main`, then
//! hand it to the server state. Nothing reads the environment after startup.
//!
//! | Variable               | Default                     |
//! |------------------------|-----------------------------|
//! | `JWT_SECRET`           | required, at least 32 chars |
//! | `JWT_EXPIRATION_HOURS` | `1`                         |
//! | `DATABASE_URL`         | `sqlite:data/neuro_farm.db` |
//! | `BIND_HOST`            | `127.0.0.1`                 |
//! | `PORT`                 | `3000`                      |

use chrono::Duration;
use lib_utils::{get_env, get_env_or, get_env_parse_or};

use crate::error::{AppError, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/neuro_farm.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 1;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// After this period, users must log in again.
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// Interface the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing `JWT_SECRET` is an error; every other variable has a default.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = get_env("JWT_SECRET")?;
        let jwt_expiration_hours =
            get_env_parse_or("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)?;
        let port = get_env_parse_or("PORT", DEFAULT_PORT)?;

        Ok(Self {
            database_url: get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            jwt_secret,
            jwt_expiration_hours,
            host: get_env_or("BIND_HOST", DEFAULT_HOST),
            port,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err(AppError::Config(
                "JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        Ok(())
    }

    /// Session token lifetime.
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.jwt_expiration_hours)
    }

    /// `host:port` for the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"***REDACTED***")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
