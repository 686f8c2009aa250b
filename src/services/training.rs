// ABOUTME: Training load analysis for one athlete over a trailing window of days
// ABOUTME: Checks ownership and window bounds, fetches sessions, and runs the training load engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthenticatedUser;
use crate::constants::training_load::{MAX_ANALYSIS_DAYS, MIN_ANALYSIS_DAYS};
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use ringside_intelligence::{window_start, LoadAnalysis, TrainingLoadEngine};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Session-RPE load analysis
pub struct TrainingLoadService {
    database: Arc<dyn DatabaseProvider>,
    engine: TrainingLoadEngine,
}

impl TrainingLoadService {
    /// Create the service with the standard 7/28 day windows
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>) -> Self {
        Self {
            database,
            engine: TrainingLoadEngine::new(),
        }
    }

    /// Analyse the `days` days ending on `target_date` (today, UTC, when absent)
    ///
    /// # Errors
    ///
    /// Returns not-found when the athlete is not the caller's, invalid input
    /// when `days` is outside `[7, 90]` or the window starts before the earliest
    /// representable date, or an error if data access fails.
    pub async fn analyze(
        &self,
        caller: &AuthenticatedUser,
        athlete_id: Uuid,
        days: u32,
        target_date: Option<NaiveDate>,
    ) -> AppResult<LoadAnalysis> {
        if !(MIN_ANALYSIS_DAYS..=MAX_ANALYSIS_DAYS).contains(&days) {
            return Err(AppError::invalid_input(format!(
                "days must be between {MIN_ANALYSIS_DAYS} and {MAX_ANALYSIS_DAYS}"
            )));
        }

        self.database
            .get_athlete(caller.user_id, athlete_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load athlete: {e}")))?
            .ok_or_else(|| AppError::not_found("Athlete"))?;

        let target = target_date.unwrap_or_else(|| Utc::now().date_naive());
        let start = window_start(target, i64::from(days))
            .ok_or_else(|| AppError::invalid_input("target_date is out of range"))?;
        let sessions = self
            .database
            .get_sessions_for_athlete(athlete_id, start, target)
            .await
            .map_err(|e| AppError::database(format!("Failed to load sessions: {e}")))?;

        debug!(
            athlete.id = %athlete_id,
            sessions = sessions.len(),
            window.start = %start,
            window.end = %target,
            "Computing training load"
        );
        Ok(self.engine.analyze(&sessions, days, target))
    }
}
