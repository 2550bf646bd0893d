//! # Middleware
//!
//! Axum middleware for authentication, request stamping, logging, and response mapping.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: Session-token gate for protected routes
//! - **[`mw_req_stamp`]**: Request ID and timestamp stamping
//! - **[`mw_logging`]**: Structured request/response logging
//! - **[`mw_res_map`]**: Response mapping and panic handling

// region: --- Modules
pub mod mw_auth;
pub mod mw_logging;
pub mod mw_req_stamp;
pub mod mw_res_map;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{require_auth, CtxUser, AUTH_TOKEN_HEADER};
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_res_map::{handle_panic, map_res};
// endregion: --- Re-exports
