//! # Web Library
//!
//! HTTP handlers, middleware, services, and server setup.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

pub use server::{create_router, start_server, AppState, ServerConfig};
pub use services::AuthService;
