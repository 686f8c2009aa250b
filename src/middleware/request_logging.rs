// ABOUTME: Request logging middleware with request ids and per-request spans
// ABOUTME: Emits one structured line per API request including the caller when known
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthenticatedUser;
use crate::logging::AppLogger;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying a caller-supplied request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id from the incoming header, or a fresh one
fn request_id(req: &Request) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map_or_else(|| format!("req_{}", Uuid::new_v4().simple()), str::to_owned)
}

/// Create a tracing span for an HTTP request
pub fn create_request_span(request_id: &str, method: &str, path: &str) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    )
}

/// Log every request once it has a response
///
/// Must run inside the identity middleware so the caller is visible.
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let user_id = req
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.user_id.to_string());
    let span = create_request_span(&request_id(&req), &method, &path);

    let started = Instant::now();
    let response = next.run(req).instrument(span.clone()).await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    span.in_scope(|| {
        AppLogger::log_api_request(
            &method,
            &path,
            response.status().as_u16(),
            duration_ms,
            user_id.as_deref(),
        );
    });
    response
}
