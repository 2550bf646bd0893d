//! # Authentication Library
//!
//! Password hashing and JWT session-token management.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};
