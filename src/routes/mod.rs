// ABOUTME: Route module organization for the Ringside HTTP API
// ABOUTME: Assembles health, analysis, training load, and upload routers with shared layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to the service layer. Everything except health lives under
//! `/api/v1` and requires an identity.

/// Benchmark, Z-score, and metric listing routes
pub mod analysis;
/// Health check and readiness routes
pub mod health;
/// Training load routes
pub mod training;
/// CSV upload routes
pub mod uploads;

pub use analysis::AnalysisRoutes;
pub use health::HealthRoutes;
pub use training::TrainingRoutes;
pub use uploads::UploadRoutes;

use crate::auth::gateway_identity_middleware;
use crate::constants::routes::API_V1;
use crate::middleware::request_logging_middleware;
use crate::resources::ServerResources;
use axum::{extract::DefaultBodyLimit, middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the full application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let api = Router::new()
        .merge(AnalysisRoutes::routes(Arc::clone(&resources)))
        .merge(TrainingRoutes::routes(Arc::clone(&resources)))
        .merge(UploadRoutes::routes(Arc::clone(&resources)))
        .layer(middleware::from_fn(request_logging_middleware));

    let api = if resources.config.auth.trust_gateway_headers {
        info!("Accepting identity from gateway headers");
        api.layer(middleware::from_fn_with_state(
            Arc::clone(&resources),
            gateway_identity_middleware,
        ))
    } else {
        api
    };

    Router::new()
        .merge(HealthRoutes::routes())
        .nest(API_V1, api)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(
            resources.config.uploads.max_file_size_bytes,
        ))
}
