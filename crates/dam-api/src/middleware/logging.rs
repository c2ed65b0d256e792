//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use crate::extractors::auth::{REQUEST_ID_HEADER, USER_ID_HEADER};

/// Logs request method, path, caller, status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let user_id = header(&request, USER_ID_HEADER);
    let request_id = header(&request, REQUEST_ID_HEADER);
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(%method, %path, ?user_id, ?request_id, status, duration_ms, "HTTP request failed");
    } else {
        info!(%method, %path, ?user_id, ?request_id, status, duration_ms, "HTTP request");
    }

    response
}

fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
