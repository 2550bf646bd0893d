//! # Response Mapping Middleware
//!
//! Standardizes error responses.
//!
//! Errors raised by handlers already render as `{"message": ...}` through
//! [`AppError`](lib_core::AppError). Some responses are produced by axum itself
//! before any handler runs (405 on a known path with the wrong method, for
//! example) and come back with an empty body. [`map_res`] rewrites those into
//! the same JSON shape, and [`handle_panic`] does the same for handler panics
//! caught by `CatchPanicLayer`.

use axum::{
    extract::Request,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        StatusCode,
    },
    middleware::Next,
    response::Response,
};
use lib_core::error::{message_response, MSG_SERVER_ERROR};
use std::any::Any;
use tracing::{debug, error};

/// Response mapping middleware.
///
/// Leaves successful responses and responses that already carry a body type
/// untouched.
pub async fn map_res(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if !(status.is_client_error() || status.is_server_error())
        || res.headers().contains_key(CONTENT_TYPE)
    {
        return res;
    }

    debug!("[RESPONSE MAP] Wrapping bare {} response", status);

    let message = if status.is_server_error() {
        MSG_SERVER_ERROR
    } else {
        status.canonical_reason().unwrap_or("Request failed")
    };

    let (parts, _body) = res.into_parts();
    let mut mapped = message_response(status, message);
    for (name, value) in parts.headers.iter() {
        if name != CONTENT_LENGTH {
            mapped.headers_mut().append(name.clone(), value.clone());
        }
    }

    mapped
}

/// Panic handler for `CatchPanicLayer`.
///
/// The panic payload is logged; the client only sees the generic server error.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!("[PANIC] Request handler panicked: {}", detail);

    message_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_SERVER_ERROR)
}
