// ABOUTME: Route handler for the training load analysis endpoint
// ABOUTME: Resolves the analysis window from the query and configuration defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::{auth::AuthenticatedUser, errors::AppError, resources::ServerResources};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Query parameters for training load
#[derive(Debug, Deserialize)]
pub struct TrainingLoadQuery {
    /// Window length in days; the configured default when absent
    pub days: Option<u32>,
    /// Last day of the window (`YYYY-MM-DD`); today when absent
    pub target_date: Option<NaiveDate>,
}

/// Training load routes
pub struct TrainingRoutes;

impl TrainingRoutes {
    /// Create training load routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/analysis/load/:id", get(Self::handle_load))
            .with_state(resources)
    }

    /// Handle GET /analysis/load/:id
    async fn handle_load(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path(athlete_id): Path<Uuid>,
        Query(query): Query<TrainingLoadQuery>,
    ) -> Result<Response, AppError> {
        let days = query
            .days
            .unwrap_or(resources.config.training.default_days);
        let analysis = resources
            .training()
            .analyze(&user, athlete_id, days, query.target_date)
            .await?;
        Ok((StatusCode::OK, Json(analysis)).into_response())
    }
}
