//! # Services
//!
//! Business logic behind the HTTP handlers. Handlers stay thin: they extract
//! the request, call a service, and serialize the result.

pub mod auth;

pub use auth::AuthService;
