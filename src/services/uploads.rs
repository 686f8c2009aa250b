// ABOUTME: CSV upload workflow: decode, structural checks, preview, athlete resolution, and persistence
// ABOUTME: Wraps the ingestion engine with coach scoping, registry validation, and batch-insert fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! CSV uploads
//!
//! Row-level problems never fail an upload; they are returned alongside the
//! count of stored events. Only structural problems (no date column, nothing
//! parseable, too many rows) and an athlete override that the caller does not
//! own reject the whole request.

use crate::auth::AuthenticatedUser;
use crate::config::environment::UploadConfig;
use crate::database_plugins::{DatabaseProvider, NewPerformanceEvent};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use ringside_core::metrics::validate_metrics;
use ringside_core::models::Gender;
use ringside_intelligence::{ColumnMapping, CsvIngestionEngine, EventRecord, RowError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Dry-run view of an upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadPreview {
    /// Structural warnings, as messages
    pub warnings: Vec<String>,
    /// The first events that would be stored
    pub events_preview: Vec<EventRecord>,
    /// Number of events that would be stored
    pub total_events: usize,
    /// Rejected rows
    pub errors: Vec<RowError>,
}

/// Outcome of a stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Events stored
    pub processed: usize,
    /// Rejected rows, including rows that failed to resolve or persist
    pub errors: Vec<RowError>,
    /// Athlete override, when one was given
    pub athlete_id: Option<Uuid>,
}

/// `10000` -> `10,000`
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// First gender seen for each athlete name in the file
fn genders_by_name(events: &[EventRecord]) -> HashMap<String, Gender> {
    let mut genders = HashMap::new();
    for event in events {
        if let (Some(name), Some(gender)) = (&event.athlete_name, event.gender) {
            genders.entry(name.clone()).or_insert(gender);
        }
    }
    genders
}

/// Upload handling for one coach request
pub struct UploadService {
    database: Arc<dyn DatabaseProvider>,
    engine: CsvIngestionEngine,
    limits: UploadConfig,
}

impl UploadService {
    /// Create the service
    #[must_use]
    pub fn new(
        database: Arc<dyn DatabaseProvider>,
        mapping: ColumnMapping,
        limits: UploadConfig,
    ) -> Self {
        Self {
            database,
            engine: CsvIngestionEngine::new(mapping),
            limits,
        }
    }

    /// Check the size limit and decode the request body
    ///
    /// # Errors
    ///
    /// Returns an error if the body exceeds the size limit or is not UTF-8
    pub fn decode<'b>(&self, body: &'b [u8]) -> AppResult<&'b str> {
        if body.len() > self.limits.max_file_size_bytes {
            return Err(AppError::payload_too_large(format!(
                "File too large. Maximum size is {}MB.",
                self.limits.max_file_size_bytes / (1024 * 1024)
            )));
        }
        std::str::from_utf8(body).map_err(|_| AppError::invalid_input("File must be UTF-8 encoded"))
    }

    /// Parse without storing anything
    #[must_use]
    pub fn preview(&self, caller: &AuthenticatedUser, raw: &str) -> UploadPreview {
        let warnings = self
            .engine
            .validate_structure(raw)
            .iter()
            .map(ToString::to_string)
            .collect();
        let outcome = self.engine.process(raw, None);

        AppLogger::log_ingestion_summary(
            &caller.user_id.to_string(),
            outcome.events.len(),
            0,
            outcome.errors.len(),
            true,
        );

        UploadPreview {
            warnings,
            total_events: outcome.events.len(),
            events_preview: outcome
                .events
                .into_iter()
                .take(self.limits.preview_rows)
                .collect(),
            errors: outcome.errors,
        }
    }

    /// Parse and store an upload
    ///
    /// With `athlete_id` every event goes to that athlete. Otherwise each
    /// event's athlete name is resolved under the caller, creating the athlete
    /// with the first gender seen for that name (male when none).
    ///
    /// # Errors
    ///
    /// Returns an error for a missing date column, an upload with no usable
    /// rows, too many rows, or an athlete override the caller does not own.
    pub async fn ingest(
        &self,
        caller: &AuthenticatedUser,
        raw: &str,
        athlete_id: Option<Uuid>,
    ) -> AppResult<UploadResult> {
        if let Some(blocking) = self
            .engine
            .validate_structure(raw)
            .into_iter()
            .find(|warning| warning.is_blocking())
        {
            return Err(AppError::invalid_input(blocking.to_string()));
        }

        let outcome = self.engine.process(raw, athlete_id);
        if outcome.events.is_empty() && outcome.errors.is_empty() {
            return Err(AppError::invalid_input(
                "No valid data found in CSV. Check column names and date format (DD/MM/YYYY).",
            ));
        }
        if outcome.events.len() > self.limits.max_row_count {
            return Err(AppError::invalid_input(format!(
                "Too many rows. Maximum is {} rows per upload.",
                group_thousands(self.limits.max_row_count)
            )));
        }

        if let Some(athlete_id) = athlete_id {
            self.database
                .get_athlete(caller.user_id, athlete_id)
                .await
                .map_err(|e| AppError::database(format!("Failed to load athlete: {e}")))?
                .ok_or_else(|| AppError::not_found("Athlete"))?;
        }

        let rows_parsed = outcome.events.len();
        let mut errors = outcome.errors;
        let (batch, rows) = self
            .resolve_events(caller, outcome.events, &mut errors)
            .await;
        let processed = self.persist(&batch, &rows, &mut errors).await;
        errors.sort_by_key(|error| error.row);

        AppLogger::log_ingestion_summary(
            &caller.user_id.to_string(),
            rows_parsed,
            processed,
            errors.len(),
            false,
        );

        Ok(UploadResult {
            processed,
            errors,
            athlete_id,
        })
    }

    /// Attach athlete ids and drop events the registry rejects
    async fn resolve_events(
        &self,
        caller: &AuthenticatedUser,
        events: Vec<EventRecord>,
        errors: &mut Vec<RowError>,
    ) -> (Vec<NewPerformanceEvent>, Vec<usize>) {
        let genders = genders_by_name(&events);
        let mut resolved: HashMap<String, Uuid> = HashMap::new();
        let mut batch = Vec::with_capacity(events.len());
        let mut rows = Vec::with_capacity(events.len());

        for event in events {
            let athlete_id = match (event.athlete_id, event.athlete_name.as_deref()) {
                (Some(id), _) => id,
                (None, Some(name)) => match resolved.get(name) {
                    Some(id) => *id,
                    None => {
                        let gender = genders.get(name).copied().unwrap_or(Gender::Male);
                        match self.find_or_create_athlete(caller, name, gender).await {
                            Ok(id) => {
                                resolved.insert(name.to_owned(), id);
                                id
                            }
                            Err(e) => {
                                errors.push(RowError::new(
                                    event.row,
                                    format!("Error resolving athlete: {e}"),
                                ));
                                continue;
                            }
                        }
                    }
                },
                (None, None) => {
                    errors.push(RowError::new(event.row, "No athlete ID or name for event"));
                    continue;
                }
            };

            if let Err(e) = validate_metrics(&event.metrics) {
                errors.push(RowError::new(event.row, e.to_string()));
                continue;
            }

            rows.push(event.row);
            batch.push(NewPerformanceEvent {
                athlete_id,
                event_date: event.event_date,
                metrics: event.metrics,
            });
        }
        (batch, rows)
    }

    async fn find_or_create_athlete(
        &self,
        caller: &AuthenticatedUser,
        name: &str,
        gender: Gender,
    ) -> anyhow::Result<Uuid> {
        if let Some(existing) = self
            .database
            .find_athlete_by_name(caller.user_id, name)
            .await?
        {
            return Ok(existing.id);
        }
        let created = self
            .database
            .create_athlete(caller.user_id, name, gender)
            .await?;
        debug!(athlete.id = %created.id, athlete.gender = %gender, "Auto-created athlete from upload");
        Ok(created.id)
    }

    /// Store the batch; on failure store one by one and report what failed
    async fn persist(
        &self,
        batch: &[NewPerformanceEvent],
        rows: &[usize],
        errors: &mut Vec<RowError>,
    ) -> usize {
        if batch.is_empty() {
            return 0;
        }
        match self.database.insert_events(batch).await {
            Ok(ids) => ids.len(),
            Err(e) => {
                warn!(error = %e, events = batch.len(), "Batch insert failed, inserting individually");
                let mut processed = 0;
                for (event, row) in batch.iter().zip(rows) {
                    match self.database.insert_event(event).await {
                        Ok(_) => processed += 1,
                        Err(e) => errors.push(RowError::new(*row, format!("Database error: {e}"))),
                    }
                }
                processed
            }
        }
    }
}
