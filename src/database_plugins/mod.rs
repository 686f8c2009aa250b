// ABOUTME: Data access abstraction for athletes, performance events, and training sessions
// ABOUTME: The analytics services depend on this trait, never on a concrete store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data access layer
//!
//! Services receive an `Arc<dyn DatabaseProvider>` at construction time; the
//! in-memory provider backs tests and the demo binary.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use ringside_core::models::{
    AthleteRef, Gender, MetricMap, PerformanceEvent, TrainingSession, UserRole,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// In-memory provider with JSON seeding
pub mod memory;

pub use memory::{InMemoryDatabase, SeedData, SeedUser};

/// A performance event that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPerformanceEvent {
    /// Athlete the event belongs to
    pub athlete_id: Uuid,
    /// Test date
    pub event_date: NaiveDate,
    /// Metric dictionary
    pub metrics: MetricMap,
}

/// Core data access trait
///
/// Every read is scoped by the caller; ownership checks happen in the
/// services, using [`DatabaseProvider::get_athlete`].
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    // ================================
    // Athletes and users
    // ================================

    /// All athletes owned by a coach
    async fn get_athletes_for_coach(&self, coach_id: Uuid) -> Result<Vec<AthleteRef>>;

    /// One athlete, only if owned by `coach_id`
    async fn get_athlete(&self, coach_id: Uuid, athlete_id: Uuid) -> Result<Option<AthleteRef>>;

    /// Athletes owned by admin accounts (the curated reference pool)
    async fn get_admin_pool_athletes(&self) -> Result<Vec<AthleteRef>>;

    /// Athletes of non-admin coaches who enabled data sharing
    async fn get_opted_in_athletes(&self) -> Result<Vec<AthleteRef>>;

    /// Role of a user, if the user exists
    async fn get_user_role(&self, user_id: Uuid) -> Result<Option<UserRole>>;

    /// Athlete with this exact name under `coach_id`
    async fn find_athlete_by_name(&self, coach_id: Uuid, name: &str)
        -> Result<Option<AthleteRef>>;

    /// Create an athlete under `coach_id`
    async fn create_athlete(&self, coach_id: Uuid, name: &str, gender: Gender)
        -> Result<AthleteRef>;

    // ================================
    // Performance events
    // ================================

    /// Events for any of the given athletes
    async fn get_events_for_athlete_ids(&self, athlete_ids: &[Uuid])
        -> Result<Vec<PerformanceEvent>>;

    /// Events for one athlete, oldest first
    async fn get_events_for_athlete(&self, athlete_id: Uuid) -> Result<Vec<PerformanceEvent>>;

    /// One event by id
    async fn get_event(&self, event_id: Uuid) -> Result<Option<PerformanceEvent>>;

    /// Store events atomically: either all are stored or none
    async fn insert_events(&self, events: &[NewPerformanceEvent]) -> Result<Vec<Uuid>>;

    /// Store a single event
    async fn insert_event(&self, event: &NewPerformanceEvent) -> Result<Uuid>;

    // ================================
    // Training sessions
    // ================================

    /// Sessions for an athlete dated within `[start, end]`
    async fn get_sessions_for_athlete(
        &self,
        athlete_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TrainingSession>>;
}
