//! Request tracing middleware

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

const REQUEST_ID: &str = "x-request-id";

/// Run the request inside a `request` span carrying its id, then log the
/// outcome at a level matching the status class. An incoming `x-request-id`
/// is kept; otherwise a fresh one is generated and echoed on the response.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    span.in_scope(|| tracing::info!("Request received"));
    let started = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;

    {
        let _span = span.enter();
        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let code = status.as_u16();
        if status.is_server_error() {
            tracing::error!(status = code, elapsed_ms, "Request failed");
        } else if status.is_client_error() {
            tracing::warn!(status = code, elapsed_ms, "Request rejected");
        } else {
            tracing::info!(status = code, elapsed_ms, "Request served");
        }
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID), value);
    }

    response
}
