// ABOUTME: In-memory DatabaseProvider backed by a tokio RwLock, seeded from JSON fixtures
// ABOUTME: Enforces athlete existence and the metric registry on every event write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{DatabaseProvider, NewPerformanceEvent};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use ringside_core::metrics::validate_metrics;
use ringside_core::models::{
    AthleteRef, CoachConsent, Gender, PerformanceEvent, TrainingSession, UserRole,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// A user account in a seed fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    /// User id (coach or admin)
    pub id: Uuid,
    /// Account role
    #[serde(default)]
    pub role: UserRole,
    /// Whether the coach shares athlete data with the pool
    #[serde(default)]
    pub data_sharing_enabled: bool,
}

/// JSON fixture used to populate the in-memory store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    /// User accounts
    pub users: Vec<SeedUser>,
    /// Athletes
    pub athletes: Vec<AthleteRef>,
    /// Performance events
    pub events: Vec<PerformanceEvent>,
    /// Training sessions
    pub sessions: Vec<TrainingSession>,
}

impl SeedData {
    /// Read a seed fixture from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid seed JSON in {}", path.display()))
    }
}

#[derive(Default)]
struct Store {
    roles: HashMap<Uuid, UserRole>,
    consents: HashMap<Uuid, CoachConsent>,
    athletes: Vec<AthleteRef>,
    events: Vec<PerformanceEvent>,
    sessions: Vec<TrainingSession>,
}

impl Store {
    fn athletes_where(&self, keep: impl Fn(&AthleteRef) -> bool) -> Vec<AthleteRef> {
        self.athletes.iter().filter(|a| keep(a)).cloned().collect()
    }

    fn role_of(&self, user_id: Uuid) -> UserRole {
        self.roles.get(&user_id).copied().unwrap_or_default()
    }

    fn check_event(&self, event: &NewPerformanceEvent) -> Result<()> {
        if !self.athletes.iter().any(|a| a.id == event.athlete_id) {
            return Err(anyhow!("Unknown athlete {}", event.athlete_id));
        }
        validate_metrics(&event.metrics).map_err(|e| anyhow!(e))
    }

    fn push_event(&mut self, event: &NewPerformanceEvent) -> Uuid {
        let id = Uuid::new_v4();
        self.events.push(PerformanceEvent {
            id,
            athlete_id: event.athlete_id,
            event_date: event.event_date,
            metrics: event.metrics.clone(),
        });
        id
    }
}

/// In-memory [`DatabaseProvider`]
#[derive(Default)]
pub struct InMemoryDatabase {
    store: RwLock<Store>,
}

impl InMemoryDatabase {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated from a fixture
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        let mut store = Store::default();
        for user in seed.users {
            store.roles.insert(user.id, user.role);
            store.consents.insert(
                user.id,
                CoachConsent {
                    coach_id: user.id,
                    data_sharing_enabled: user.data_sharing_enabled,
                },
            );
        }
        store.athletes = seed.athletes;
        store.events = seed.events;
        store.sessions = seed.sessions;
        info!(
            athletes = store.athletes.len(),
            events = store.events.len(),
            sessions = store.sessions.len(),
            "Seeded in-memory store"
        );
        Self {
            store: RwLock::new(store),
        }
    }

    /// Register or update a user account
    pub async fn upsert_user(&self, user_id: Uuid, role: UserRole, data_sharing_enabled: bool) {
        let mut store = self.store.write().await;
        store.roles.insert(user_id, role);
        store.consents.insert(
            user_id,
            CoachConsent {
                coach_id: user_id,
                data_sharing_enabled,
            },
        );
    }

    /// Add a stored event without registry validation (legacy rows)
    pub async fn push_raw_event(&self, event: PerformanceEvent) {
        self.store.write().await.events.push(event);
    }

    /// Add a training session
    pub async fn push_session(&self, session: TrainingSession) {
        self.store.write().await.sessions.push(session);
    }
}

#[async_trait]
impl DatabaseProvider for InMemoryDatabase {
    async fn get_athletes_for_coach(&self, coach_id: Uuid) -> Result<Vec<AthleteRef>> {
        let store = self.store.read().await;
        Ok(store.athletes_where(|a| a.coach_id == coach_id))
    }

    async fn get_athlete(&self, coach_id: Uuid, athlete_id: Uuid) -> Result<Option<AthleteRef>> {
        let store = self.store.read().await;
        Ok(store
            .athletes
            .iter()
            .find(|a| a.id == athlete_id && a.coach_id == coach_id)
            .cloned())
    }

    async fn get_admin_pool_athletes(&self) -> Result<Vec<AthleteRef>> {
        let store = self.store.read().await;
        Ok(store.athletes_where(|a| store.role_of(a.coach_id).is_admin()))
    }

    async fn get_opted_in_athletes(&self) -> Result<Vec<AthleteRef>> {
        let store = self.store.read().await;
        let sharing: HashSet<Uuid> = store
            .consents
            .values()
            .filter(|c| c.data_sharing_enabled && !store.role_of(c.coach_id).is_admin())
            .map(|c| c.coach_id)
            .collect();
        Ok(store.athletes_where(|a| sharing.contains(&a.coach_id)))
    }

    async fn get_user_role(&self, user_id: Uuid) -> Result<Option<UserRole>> {
        Ok(self.store.read().await.roles.get(&user_id).copied())
    }

    async fn find_athlete_by_name(
        &self,
        coach_id: Uuid,
        name: &str,
    ) -> Result<Option<AthleteRef>> {
        let store = self.store.read().await;
        Ok(store
            .athletes
            .iter()
            .find(|a| a.coach_id == coach_id && a.name == name)
            .cloned())
    }

    async fn create_athlete(
        &self,
        coach_id: Uuid,
        name: &str,
        gender: Gender,
    ) -> Result<AthleteRef> {
        let mut store = self.store.write().await;
        if store
            .athletes
            .iter()
            .any(|a| a.coach_id == coach_id && a.name == name)
        {
            return Err(anyhow!("Athlete '{name}' already exists for coach"));
        }
        let athlete = AthleteRef {
            id: Uuid::new_v4(),
            coach_id,
            name: name.to_owned(),
            gender,
        };
        store.athletes.push(athlete.clone());
        debug!(athlete.id = %athlete.id, "Created athlete");
        Ok(athlete)
    }

    async fn get_events_for_athlete_ids(
        &self,
        athlete_ids: &[Uuid],
    ) -> Result<Vec<PerformanceEvent>> {
        let wanted: HashSet<&Uuid> = athlete_ids.iter().collect();
        let store = self.store.read().await;
        Ok(store
            .events
            .iter()
            .filter(|e| wanted.contains(&e.athlete_id))
            .cloned()
            .collect())
    }

    async fn get_events_for_athlete(&self, athlete_id: Uuid) -> Result<Vec<PerformanceEvent>> {
        let store = self.store.read().await;
        let mut events: Vec<_> = store
            .events
            .iter()
            .filter(|e| e.athlete_id == athlete_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.event_date);
        Ok(events)
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<PerformanceEvent>> {
        let store = self.store.read().await;
        Ok(store.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn insert_events(&self, events: &[NewPerformanceEvent]) -> Result<Vec<Uuid>> {
        let mut store = self.store.write().await;
        for event in events {
            store.check_event(event)?;
        }
        Ok(events.iter().map(|event| store.push_event(event)).collect())
    }

    async fn insert_event(&self, event: &NewPerformanceEvent) -> Result<Uuid> {
        let mut store = self.store.write().await;
        store.check_event(event)?;
        Ok(store.push_event(event))
    }

    async fn get_sessions_for_athlete(
        &self,
        athlete_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TrainingSession>> {
        let store = self.store.read().await;
        Ok(store
            .sessions
            .iter()
            .filter(|s| s.athlete_id == athlete_id && s.session_date >= start && s.session_date <= end)
            .cloned()
            .collect())
    }
}
