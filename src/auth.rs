// ABOUTME: Request identity supplied by the upstream authentication gateway
// ABOUTME: AuthenticatedUser extractor plus middleware mapping trusted gateway headers to it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication boundary
//!
//! Token validation happens upstream. Handlers only ever see an
//! [`AuthenticatedUser`] request extension; requests without one are
//! rejected with `401`.

use crate::constants::gateway_headers;
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ringside_core::models::UserRole;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Identity of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Coach or admin user id
    pub user_id: Uuid,
    /// Role used for pool access checks
    pub role: UserRole,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or_else(AppError::auth_required)
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Attach an [`AuthenticatedUser`] from gateway headers
///
/// The role comes from the role header when present, otherwise from the
/// stored account, otherwise defaults to coach.
pub async fn gateway_identity_middleware(
    State(resources): State<Arc<ServerResources>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(raw_id) = header_str(req.headers(), gateway_headers::USER_ID) else {
        debug!("No gateway identity on request");
        return next.run(req).await;
    };

    let Ok(user_id) = Uuid::parse_str(raw_id) else {
        warn!(header = gateway_headers::USER_ID, "Malformed gateway user id");
        return AppError::auth_invalid("Malformed user id header").into_response();
    };

    let header_role = header_str(req.headers(), gateway_headers::USER_ROLE)
        .and_then(|raw| raw.parse::<UserRole>().ok());
    let role = match header_role {
        Some(role) => role,
        None => match resources.database.get_user_role(user_id).await {
            Ok(stored) => stored.unwrap_or_default(),
            Err(e) => {
                return AppError::database(format!("Failed to resolve user role: {e}"))
                    .into_response();
            }
        },
    };

    req.extensions_mut().insert(AuthenticatedUser { user_id, role });
    next.run(req).await
}
