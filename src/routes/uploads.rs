// ABOUTME: Route handlers for CSV upload and preview
// ABOUTME: Accepts the raw CSV as the request body and returns row-level results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! CSV upload routes
//!
//! The body is the CSV document itself (`text/csv`), not a multipart form.

use crate::{auth::AuthenticatedUser, errors::AppError, resources::ServerResources};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Query parameters for an upload
#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    /// Attach every row to this athlete instead of resolving names
    pub athlete_id: Option<Uuid>,
}

/// Upload routes
pub struct UploadRoutes;

impl UploadRoutes {
    /// Create upload routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/uploads/csv", post(Self::handle_upload))
            .route("/uploads/csv/preview", post(Self::handle_preview))
            .with_state(resources)
    }

    /// Handle POST /uploads/csv
    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Query(query): Query<UploadQuery>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let uploads = resources.uploads();
        let raw = uploads.decode(&body)?;
        let result = uploads.ingest(&user, raw, query.athlete_id).await?;
        Ok((StatusCode::CREATED, Json(result)).into_response())
    }

    /// Handle POST /uploads/csv/preview
    async fn handle_preview(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let uploads = resources.uploads();
        let raw = uploads.decode(&body)?;
        let preview = uploads.preview(&user, raw);
        Ok((StatusCode::OK, Json(preview)).into_response())
    }
}
