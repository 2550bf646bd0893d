//! # Request Stamping Middleware
//!
//! Adds request metadata (ID, timestamp) to requests for tracing and debugging.
//!
//! The ID is stored in the request extensions and echoed back in the
//! `X-Request-ID` response header, so a client-reported failure can be matched
//! to its log lines.
//!
//! Request ID is available in handlers via `Extension<RequestStamp>`:
//!
//! ```rust,ignore
//! use axum::extract::Extension;
//! use lib_web::middleware::mw_req_stamp::RequestStamp;
//!
//! async fn handler(Extension(stamp): Extension<RequestStamp>) -> String {
//!     format!("Request ID: {}", stamp.id)
//! }
//! ```

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Response header echoing the request ID.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
    /// Time the request entered the stack
    pub received_at: DateTime<Utc>,
}

impl RequestStamp {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            received_at: lib_utils::now_utc(),
        }
    }

    /// Request ID of `req`, or `"unknown"` if the stamp layer did not run.
    pub fn id_of<B>(req: &axum::http::Request<B>) -> String {
        req.extensions()
            .get::<RequestStamp>()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Request stamping middleware.
///
/// Must run outside the logging and trace layers so they can read the ID.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    res
}
