//! # Core Library
//!
//! Core models, credential storage, configuration, and error handling for the application.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, CredentialStore, DbPool};
