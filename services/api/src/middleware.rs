//! Request logging middleware

use std::time::Instant;

use axum::{
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// Header carrying the per-request correlation id
pub static REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Tag each request with an id, run it inside a span, and log the outcome.
///
/// An `x-request-id` supplied by the caller is reused; otherwise a v4 UUID
/// is generated. The id is echoed on the response.
pub async fn request_logger(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(&REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        req.headers_mut().insert(REQUEST_ID.clone(), value);
    }

    let span = info_span!(
        "request",
        id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let started = Instant::now();
        let mut response = next.run(req).await;
        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status.is_server_error() {
            warn!(status = status.as_u16(), elapsed_ms, "request failed");
        } else {
            info!(status = status.as_u16(), elapsed_ms, "request completed");
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID.clone(), value);
        }
        response
    }
    .instrument(span)
    .await
}
