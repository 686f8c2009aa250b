// ABOUTME: HTTP middleware for request tracing and structured request logging
// ABOUTME: Identity handling lives in the auth module; this covers observability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP middleware

/// Request ids, spans, and per-request log lines
pub mod request_logging;

pub use request_logging::{create_request_span, request_logging_middleware, REQUEST_ID_HEADER};
