//! # JWT Token Management
//!
//! Session-token issuance and validation.
//!
//! Tokens are HS256 JWTs carrying only the user id (`sub`) and the
//! `iat`/`exp` timestamps. They are stateless: nothing is stored server-side,
//! and a token stays valid until `exp` unless the signing secret changes.
//!
//! The signing keys are derived once from the configured secret and shared
//! read-only for the lifetime of the process:
//!
//! ```rust
//! use chrono::Duration;
//! use lib_auth::TokenKeys;
//!
//! let keys = TokenKeys::new("test-secret-key-must-be-at-least-32-chars-long!").unwrap();
//! let token = keys.issue("42", Duration::hours(1)).unwrap();
//! assert_eq!(keys.validate(&token).unwrap().sub, "42");
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::now_utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT Claims structure containing user authentication information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Failed to encode JWT: {0}")]
    Encode(jsonwebtoken::errors::Error),

    /// Bad signature, malformed token or malformed payload.
    #[error("Failed to decode JWT: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("Token expired at {exp}")]
    Expired { exp: i64 },
}

/// Signing and verification keys for session tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Build the keys from the shared HMAC secret.
    pub fn new(secret: &str) -> Result<Self, Error> {
        if secret.is_empty() {
            return Err(Error::EmptySecret);
        }

        // Expiry is checked in `validate_at` with zero leeway; `exp` is still required.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, Error> {
        self.issue_at(subject, ttl, now_utc())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, subject: &str, ttl: Duration, now: DateTime<Utc>) -> Result<String, Error> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(Error::Encode)
    }

    /// Verify signature and expiry, returning the claims.
    pub fn validate(&self, token: &str) -> Result<Claims, Error> {
        self.validate_at(token, now_utc())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// A token is expired once `now >= exp`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, Error> {
        let token_data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(Error::Invalid)?;
        let claims = token_data.claims;

        if now.timestamp() >= claims.exp {
            return Err(Error::Expired { exp: claims.exp });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    fn keys() -> TokenKeys {
        TokenKeys::new(SECRET).expect("Secret is not empty")
    }

    #[test]
    fn test_jwt_encoding_decoding() {
        let keys = keys();
        let now = Utc::now();

        let token = keys
            .issue_at("1", Duration::hours(1), now)
            .expect("JWT encoding should succeed");
        let claims = keys.validate(&token).expect("JWT decoding should succeed");

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 3600);
    }

    #[test]
    fn test_token_expires_at_exp() {
        let keys = keys();
        let now = Utc::now();
        let token = keys.issue_at("7", Duration::hours(1), now).unwrap();

        let just_before = now + Duration::seconds(3599);
        assert!(keys.validate_at(&token, just_before).is_ok());

        let at_expiry = now + Duration::hours(1);
        assert!(matches!(
            keys.validate_at(&token, at_expiry),
            Err(Error::Expired { .. })
        ));
    }

    #[test]
    fn test_token_from_the_past_is_expired() {
        let keys = keys();
        let issued = Utc::now() - Duration::hours(2);
        let token = keys.issue_at("7", Duration::hours(1), issued).unwrap();

        assert!(matches!(keys.validate(&token), Err(Error::Expired { .. })));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys().issue("1", Duration::hours(1)).unwrap();
        let other = TokenKeys::new("another-secret-key-that-is-also-32-chars!!").unwrap();

        assert!(matches!(other.validate(&token), Err(Error::Invalid(_))));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let keys = keys();
        let token = keys.issue("1", Duration::hours(1)).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let mut payload: Vec<char> = parts[1].chars().collect();
        let mid = payload.len() / 2;
        payload[mid] = if payload[mid] == 'A' { 'B' } else { 'A' };
        let payload: String = payload.into_iter().collect();

        let tampered = format!("{}.{}.{}", parts[0], payload, parts[2]);
        assert!(matches!(keys.validate(&tampered), Err(Error::Invalid(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        let keys = keys();
        assert!(matches!(keys.validate("garbage"), Err(Error::Invalid(_))));
        assert!(matches!(keys.validate(""), Err(Error::Invalid(_))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(TokenKeys::new(""), Err(Error::EmptySecret)));
    }
}
