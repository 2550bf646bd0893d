//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) carrying their own salt and
//! cost parameters, so verification needs nothing but the stored string.

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Password hashing errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to hash password: {0}")]
    Hash(password_hash::Error),

    #[error("Failed to parse hash: {0}")]
    MalformedHash(password_hash::Error),

    #[error("Failed to verify password: {0}")]
    Verify(password_hash::Error),
}

/// Hash a password using the Argon2 algorithm with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(Error::Hash)?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against an Argon2 hash.
///
/// A mismatch is `Ok(false)`, not an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(Error::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Verify(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "TestPassword123!";
        let hash = hash_password(password)
            .expect("Password hashing should succeed for valid password");

        assert!(verify_password(password, &hash)
            .expect("Password verification should succeed for correct password"));
        assert!(!verify_password("WrongPassword", &hash)
            .expect("Password verification should fail for incorrect password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("pw123456").expect("hashing should succeed");
        let second = hash_password("pw123456").expect("hashing should succeed");

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_password("pw123456", &second).unwrap());
    }

    #[test]
    fn test_empty_password_round_trips() {
        let hash = hash_password("").expect("empty password still hashes");
        assert!(verify_password("", &hash).unwrap());
        assert!(!verify_password(" ", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash() {
        let result = verify_password("pw123456", "not-a-phc-string");
        assert!(matches!(result, Err(Error::MalformedHash(_))));
    }
}
