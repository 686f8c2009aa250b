// ABOUTME: Route handlers for benchmark, Z-score, and athlete metric endpoints
// ABOUTME: Thin axum handlers delegating to the analysis orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::{
    auth::AuthenticatedUser,
    errors::AppError,
    resources::ServerResources,
    services::{BenchmarkQuery, ZScoreQuery},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Analysis routes
pub struct AnalysisRoutes;

impl AnalysisRoutes {
    /// Create all analysis routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/analysis/benchmarks", get(Self::handle_benchmarks))
            .route("/analysis/athlete/:id/zscore", get(Self::handle_zscore))
            .route("/analysis/athlete/:id/zscores", get(Self::handle_zscores))
            .route("/analysis/athlete/:id/metrics", get(Self::handle_metrics))
            .with_state(resources)
    }

    /// Handle GET /analysis/benchmarks
    async fn handle_benchmarks(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Query(query): Query<BenchmarkQuery>,
    ) -> Result<Response, AppError> {
        let result = resources.analysis().benchmarks(&user, &query).await?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle GET /analysis/athlete/:id/zscore
    async fn handle_zscore(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path(athlete_id): Path<Uuid>,
        Query(query): Query<ZScoreQuery>,
    ) -> Result<Response, AppError> {
        let result = resources
            .analysis()
            .athlete_zscore(&user, athlete_id, &query)
            .await?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle GET /analysis/athlete/:id/zscores
    async fn handle_zscores(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path(athlete_id): Path<Uuid>,
        Query(query): Query<ZScoreQuery>,
    ) -> Result<Response, AppError> {
        let result = resources
            .analysis()
            .athlete_zscores_bulk(&user, athlete_id, &query)
            .await?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle GET /analysis/athlete/:id/metrics
    async fn handle_metrics(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path(athlete_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let metrics = resources.analysis().athlete_metrics(&user, athlete_id).await?;
        Ok((StatusCode::OK, Json(metrics)).into_response())
    }
}
