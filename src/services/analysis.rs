// ABOUTME: Benchmark and Z-score orchestration over coach-scoped reference populations
// ABOUTME: Resolves cohort/gender/mass-band groups, gathers metric samples, and runs the stat engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis orchestration
//!
//! Each call resolves a reference population, pulls the events for it, and
//! reduces them to a list of numeric samples for one metric. Nothing is
//! cached between calls.
//!
//! The two families of endpoints treat empty data differently: benchmarks
//! answer with a zero-count result, while Z-scores fail with a client error
//! because there is nothing to compare against.

use crate::auth::AuthenticatedUser;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use ringside_core::metrics::is_non_metric_key;
use ringside_core::models::{AthleteRef, Gender, PerformanceEvent};
use ringside_intelligence::{round_to, BenchmarkResult, Deviation, StatEngine};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// How the reference population is narrowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceGroup {
    /// Every athlete in the source
    #[default]
    Cohort,
    /// Athletes of one gender
    Gender,
    /// Events whose body mass falls in one 5 kg band
    MassBand,
}

impl ReferenceGroup {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cohort => "cohort",
            Self::Gender => "gender",
            Self::MassBand => "mass_band",
        }
    }
}

impl fmt::Display for ReferenceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where reference athletes come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkSource {
    /// The caller's own athletes
    #[default]
    Own,
    /// Curated athletes owned by admin accounts
    #[serde(alias = "boxing_science")]
    AdminPool,
    /// Athletes of coaches who opted in to data sharing (admin callers only)
    SharedPool,
}

/// Parameters of a benchmark request
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkQuery {
    /// Metric key, e.g. `height_cm`
    pub metric: String,
    /// Reference group
    #[serde(default)]
    pub reference_group: ReferenceGroup,
    /// Required when `reference_group` is `gender`
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Required when `reference_group` is `mass_band`, e.g. `70-74.9kg`
    #[serde(default)]
    pub mass_band: Option<String>,
    /// Reference source
    #[serde(default)]
    pub benchmark_source: BenchmarkSource,
}

/// Parameters of a Z-score request
#[derive(Debug, Clone, Deserialize)]
pub struct ZScoreQuery {
    /// Metric key
    pub metric: String,
    /// Event to score; the latest event when absent
    #[serde(default)]
    pub event_id: Option<Uuid>,
    /// Reference group
    #[serde(default)]
    pub reference_group: ReferenceGroup,
    /// Reference source
    #[serde(default)]
    pub benchmark_source: BenchmarkSource,
}

/// Benchmark statistics with the group they describe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResponse {
    /// Statistics over the reference samples
    #[serde(flatten)]
    pub stats: BenchmarkResult,
    /// Reference group name
    pub reference_group: String,
    /// Metric key
    pub metric: String,
}

/// One value scored against its reference group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreResponse {
    /// The athlete's value
    pub value: f64,
    /// Standard deviations from the reference mean
    pub z_score: f64,
    /// Reference mean
    pub mean: f64,
    /// Reference population standard deviation
    pub std_dev: f64,
    /// Descriptive label, e.g. `gender:female` or `mass_band:70-74.9kg`
    pub reference_group: String,
    /// Metric key
    pub metric: String,
}

#[derive(Debug, Clone, Copy)]
struct ReferenceStats {
    mean: f64,
    std_dev: f64,
}

impl ReferenceStats {
    fn from_samples(samples: &[f64]) -> Option<Self> {
        Some(Self {
            mean: StatEngine::mean(samples)?,
            std_dev: StatEngine::std_dev(samples, Deviation::Population)?,
        })
    }

    fn score(self, value: f64, metric: &str, label: String) -> ZScoreResponse {
        ZScoreResponse {
            value: round_to(value, 2),
            z_score: StatEngine::z_score(value, self.mean, self.std_dev),
            mean: self.mean,
            std_dev: self.std_dev,
            reference_group: label,
            metric: metric.to_owned(),
        }
    }
}

/// Numeric samples of `metric`, optionally restricted to one mass band
///
/// Events without a coercible value are skipped. Under a band, events without
/// a body mass or in another band are skipped too.
fn metric_samples(events: &[PerformanceEvent], metric: &str, band: Option<&str>) -> Vec<f64> {
    events
        .iter()
        .filter(|event| {
            band.is_none_or(|band| {
                event
                    .body_mass_kg()
                    .is_some_and(|mass| StatEngine::mass_band(mass) == band)
            })
        })
        .filter_map(|event| event.metric_value(metric))
        .collect()
}

fn group_label(group: ReferenceGroup, gender: Gender, band: Option<&str>) -> String {
    match (group, band) {
        (ReferenceGroup::MassBand, Some(band)) => format!("mass_band:{band}"),
        (ReferenceGroup::Gender, _) => format!("gender:{gender}"),
        _ => group.as_str().to_owned(),
    }
}

/// Benchmark and Z-score orchestration
pub struct AnalysisOrchestrator {
    database: Arc<dyn DatabaseProvider>,
}

impl AnalysisOrchestrator {
    /// Create an orchestrator over a data provider
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>) -> Self {
        Self { database }
    }

    async fn source_athletes(
        &self,
        caller: &AuthenticatedUser,
        source: BenchmarkSource,
    ) -> AppResult<Vec<AthleteRef>> {
        let athletes = match source {
            BenchmarkSource::Own => self.database.get_athletes_for_coach(caller.user_id).await,
            BenchmarkSource::AdminPool => self.database.get_admin_pool_athletes().await,
            BenchmarkSource::SharedPool => {
                if !caller.role.is_admin() {
                    return Err(AppError::permission_denied(
                        "Shared pool benchmarks require an admin account",
                    ));
                }
                self.database.get_opted_in_athletes().await
            }
        };
        athletes.map_err(|e| AppError::database(format!("Failed to load athletes: {e}")))
    }

    async fn reference_events(
        &self,
        caller: &AuthenticatedUser,
        source: BenchmarkSource,
        gender: Option<Gender>,
    ) -> AppResult<Option<Vec<PerformanceEvent>>> {
        let ids: Vec<Uuid> = self
            .source_athletes(caller, source)
            .await?
            .into_iter()
            .filter(|athlete| gender.is_none_or(|gender| athlete.gender == gender))
            .map(|athlete| athlete.id)
            .collect();
        if ids.is_empty() {
            return Ok(None);
        }
        let events = self
            .database
            .get_events_for_athlete_ids(&ids)
            .await
            .map_err(|e| AppError::database(format!("Failed to load events: {e}")))?;
        Ok(Some(events))
    }

    async fn owned_athlete(
        &self,
        caller: &AuthenticatedUser,
        athlete_id: Uuid,
    ) -> AppResult<AthleteRef> {
        self.database
            .get_athlete(caller.user_id, athlete_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load athlete: {e}")))?
            .ok_or_else(|| AppError::not_found("Athlete"))
    }

    async fn athlete_events(&self, athlete_id: Uuid) -> AppResult<Vec<PerformanceEvent>> {
        self.database
            .get_events_for_athlete(athlete_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load events: {e}")))
    }

    /// Benchmark statistics for one metric over a reference group
    ///
    /// # Errors
    ///
    /// Returns an error if the group's disambiguating parameter is missing,
    /// the source is not available to the caller, or data access fails.
    pub async fn benchmarks(
        &self,
        caller: &AuthenticatedUser,
        query: &BenchmarkQuery,
    ) -> AppResult<BenchmarkResponse> {
        let gender = match query.reference_group {
            ReferenceGroup::Gender => Some(query.gender.ok_or_else(|| {
                AppError::missing_field("Gender parameter required when reference_group=gender")
            })?),
            _ => None,
        };
        let band = match query.reference_group {
            ReferenceGroup::MassBand => Some(query.mass_band.as_deref().ok_or_else(|| {
                AppError::missing_field(
                    "Mass band parameter required when reference_group=mass_band",
                )
            })?),
            _ => None,
        };

        let samples = self
            .reference_events(caller, query.benchmark_source, gender)
            .await?
            .map(|events| metric_samples(&events, &query.metric, band))
            .unwrap_or_default();

        AppLogger::log_analysis(
            &caller.user_id.to_string(),
            "benchmarks",
            &query.metric,
            query.reference_group.as_str(),
            samples.len(),
        );

        Ok(BenchmarkResponse {
            stats: StatEngine::calculate_benchmarks(&samples).unwrap_or(BenchmarkResult::empty()),
            reference_group: query.reference_group.as_str().to_owned(),
            metric: query.metric.clone(),
        })
    }

    /// Z-score of one of the athlete's events against a reference group
    ///
    /// Under `gender` the athlete's own gender is used; under `mass_band` the
    /// band comes from the scored event's body mass.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown athlete, event or metric, and invalid
    /// input when the value or the reference data cannot be scored.
    pub async fn athlete_zscore(
        &self,
        caller: &AuthenticatedUser,
        athlete_id: Uuid,
        query: &ZScoreQuery,
    ) -> AppResult<ZScoreResponse> {
        let athlete = self.owned_athlete(caller, athlete_id).await?;

        let event = match query.event_id {
            Some(event_id) => self
                .database
                .get_event(event_id)
                .await
                .map_err(|e| AppError::database(format!("Failed to load event: {e}")))?
                .filter(|event| event.athlete_id == athlete.id),
            None => self
                .athlete_events(athlete.id)
                .await?
                .into_iter()
                .max_by_key(|event| event.event_date),
        }
        .ok_or_else(|| AppError::new(ErrorCode::ResourceNotFound, "No events found for athlete"))?;

        let raw = event.metrics.get(&query.metric).ok_or_else(|| {
            AppError::new(
                ErrorCode::ResourceNotFound,
                format!("Metric '{}' not found in event", query.metric),
            )
        })?;
        let value = raw.as_f64().ok_or_else(|| {
            AppError::invalid_input(format!("Metric '{}' is not numeric", query.metric))
        })?;

        let gender = (query.reference_group == ReferenceGroup::Gender).then_some(athlete.gender);
        let band = match query.reference_group {
            ReferenceGroup::MassBand => Some(StatEngine::mass_band(event.body_mass_kg().ok_or_else(
                || AppError::invalid_input("Body mass required for mass band reference group"),
            )?)),
            _ => None,
        };

        let events = self
            .reference_events(caller, query.benchmark_source, gender)
            .await?
            .ok_or_else(|| AppError::invalid_input("No athletes in reference group"))?;
        let samples = metric_samples(&events, &query.metric, band.as_deref());
        let stats = ReferenceStats::from_samples(&samples).ok_or_else(|| {
            AppError::invalid_input("No data in reference group for this metric")
        })?;

        let label = group_label(query.reference_group, athlete.gender, band.as_deref());
        AppLogger::log_analysis(
            &caller.user_id.to_string(),
            "zscore",
            &query.metric,
            &label,
            samples.len(),
        );

        Ok(stats.score(value, &query.metric, label))
    }

    /// Z-scores for every event of an athlete that carries the metric
    ///
    /// Events without the metric, and events with no reference data, are
    /// left out. Outside `mass_band` the reference statistics are shared by
    /// all events; under `mass_band` each event is scored against its own band.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown athlete, or an error if data access fails.
    pub async fn athlete_zscores_bulk(
        &self,
        caller: &AuthenticatedUser,
        athlete_id: Uuid,
        query: &ZScoreQuery,
    ) -> AppResult<BTreeMap<Uuid, ZScoreResponse>> {
        let athlete = self.owned_athlete(caller, athlete_id).await?;
        let mut scores = BTreeMap::new();

        let events = self.athlete_events(athlete.id).await?;
        if events.is_empty() {
            return Ok(scores);
        }

        let gender = (query.reference_group == ReferenceGroup::Gender).then_some(athlete.gender);
        let Some(reference) = self
            .reference_events(caller, query.benchmark_source, gender)
            .await?
        else {
            return Ok(scores);
        };

        let shared = match query.reference_group {
            ReferenceGroup::MassBand => None,
            _ => match ReferenceStats::from_samples(&metric_samples(
                &reference,
                &query.metric,
                None,
            )) {
                Some(stats) => Some(stats),
                None => return Ok(scores),
            },
        };

        for event in &events {
            let Some(value) = event.metric_value(&query.metric) else {
                continue;
            };
            let (stats, band) = match shared {
                Some(stats) => (stats, None),
                None => {
                    let Some(band) = event.body_mass_kg().map(StatEngine::mass_band) else {
                        continue;
                    };
                    let samples = metric_samples(&reference, &query.metric, Some(&band));
                    let Some(stats) = ReferenceStats::from_samples(&samples) else {
                        debug!(event.id = %event.id, band = %band, "No reference data for band");
                        continue;
                    };
                    (stats, Some(band))
                }
            };
            let label = group_label(query.reference_group, athlete.gender, band.as_deref());
            scores.insert(event.id, stats.score(value, &query.metric, label));
        }

        AppLogger::log_analysis(
            &caller.user_id.to_string(),
            "zscores_bulk",
            &query.metric,
            query.reference_group.as_str(),
            scores.len(),
        );
        Ok(scores)
    }

    /// Metric keys recorded for an athlete, sorted, without event metadata keys
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown athlete, or an error if data access fails.
    pub async fn athlete_metrics(
        &self,
        caller: &AuthenticatedUser,
        athlete_id: Uuid,
    ) -> AppResult<Vec<String>> {
        let athlete = self.owned_athlete(caller, athlete_id).await?;
        let keys: BTreeSet<String> = self
            .athlete_events(athlete.id)
            .await?
            .into_iter()
            .flat_map(|event| event.metrics.into_keys())
            .filter(|key| !is_non_metric_key(key))
            .collect();
        Ok(keys.into_iter().collect())
    }
}
