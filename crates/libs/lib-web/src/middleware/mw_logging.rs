//! # Request/Response Logging Middleware
//!
//! Structured logging for every HTTP request and response.
//!
//! This middleware logs:
//! - Request method, path, query params
//! - Request headers (sanitized)
//! - Response status, size, duration
//!
//! Bodies are never logged: the auth endpoints carry plaintext passwords and
//! the login response carries a live token.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::middleware::mw_req_stamp::RequestStamp;

/// Sensitive headers that should not be logged
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "x-api-key",
    "x-auth-token",
    "authentication",
];

/// Header list with sensitive values replaced.
fn sanitized_headers(req: &Request) -> Vec<(String, String)> {
    req.headers()
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower.contains(h)) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

/// Request/response logging middleware
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());
    let request_id = RequestStamp::id_of(&req);
    let received_at = req
        .extensions()
        .get::<RequestStamp>()
        .map(|s| s.received_at.to_rfc3339());

    let headers = sanitized_headers(&req);

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let client_ip = req
        .headers()
        .get("x-forwarded-for")
        .or_else(|| req.headers().get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = ?query,
        user_agent = ?user_agent,
        client_ip = ?client_ip,
        received_at = ?received_at,
        "[REQUEST] {} {}{}",
        method,
        path,
        query.as_ref().map(|q| format!("?{}", q)).unwrap_or_default()
    );

    debug!(
        request_id = %request_id,
        headers = ?headers,
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();
    let status_code = status.as_u16();

    let content_length = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            size_bytes = content_length,
            "[RESPONSE] {} {} -> {} ({}ms, {} bytes)",
            method,
            path,
            status_code,
            duration.as_millis(),
            content_length
        );
    }

    response
}
