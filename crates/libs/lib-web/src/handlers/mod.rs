//! # HTTP Request Handlers
//!
//! Axum HTTP request handlers organized by feature domain. Handlers delegate
//! business logic to [`crate::services`].
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: Public authentication endpoints
//!   - `POST /api/auth/register` - Create new account
//!   - `POST /api/auth/login` - Authenticate with email/password
//!
//! - **[`user`]**: Authenticated endpoints
//!   - `GET /api/user/profile` - Id and email of the caller
//!
//! ## Authentication
//!
//! Protected endpoints use `Extension<CtxUser>` to read the caller's id. The
//! auth middleware validates the `x-auth-token` header before handlers execute.
//!
//! ## Error Handling
//!
//! Handlers return [`lib_core::Result`]; `AppError` renders itself as
//! `{"message": ...}` with the matching status code.
//!
//! ## Request/Response Flow
//!
//! ```text
//! Client Request
//!     ↓
//! CORS (tower-http)
//!     ↓
//! Request stamp ─> trace span ─> request log ─> response map ─> panic catch
//!     ↓
//! Auth gate (protected routes only)
//!     ↓
//! Handler ─> AuthService ─> CredentialStore
//!     ↓
//! Client Response
//! ```

pub mod auth;
pub mod user;
