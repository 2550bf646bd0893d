//! # Extractors
//!
//! [`AppJson`] is `axum::Json` with its rejection routed through
//! [`AppError`], so a missing, malformed, or wrongly-typed body answers
//! `400 {"message": "Invalid request body"}` instead of axum's plain-text 4xx.

use axum::extract::FromRequest;
use lib_core::AppError;

/// JSON body extractor with application-shaped rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
