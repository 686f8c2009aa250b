// ABOUTME: Seeded in-memory data for service and route integration tests
// ABOUTME: Builds coaches, athletes, events and sessions plus ready-made routers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::Router;
use chrono::NaiveDate;
use ringside_core::models::{
    AthleteRef, Gender, MetricMap, MetricValue, PerformanceEvent, TrainingSession, UserRole,
};
use ringside_intelligence::ColumnMapping;
use ringside_server::auth::AuthenticatedUser;
use ringside_server::config::environment::ServerConfig;
use ringside_server::database_plugins::{DatabaseProvider, InMemoryDatabase, SeedData, SeedUser};
use ringside_server::resources::ServerResources;
use ringside_server::routes;
use std::sync::Arc;
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn coach_user(user_id: Uuid) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id,
        role: UserRole::Coach,
    }
}

pub fn admin_user(user_id: Uuid) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id,
        role: UserRole::Admin,
    }
}

pub fn seed_user(id: Uuid, role: UserRole, data_sharing_enabled: bool) -> SeedUser {
    SeedUser {
        id,
        role,
        data_sharing_enabled,
    }
}

pub fn athlete(coach_id: Uuid, name: &str, gender: Gender) -> AthleteRef {
    AthleteRef {
        id: Uuid::new_v4(),
        coach_id,
        name: name.to_owned(),
        gender,
    }
}

pub fn metrics(pairs: &[(&str, f64)]) -> MetricMap {
    let mut metrics: MetricMap = pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), MetricValue::Number(*value)))
        .collect();
    metrics.insert("test_type".to_owned(), MetricValue::from("CMJ"));
    metrics
}

pub fn event(athlete: &AthleteRef, on: NaiveDate, pairs: &[(&str, f64)]) -> PerformanceEvent {
    PerformanceEvent {
        id: Uuid::new_v4(),
        athlete_id: athlete.id,
        event_date: on,
        metrics: metrics(pairs),
    }
}

pub fn session(athlete: &AthleteRef, on: NaiveDate, rpe: u8, minutes: u32) -> TrainingSession {
    TrainingSession {
        id: Uuid::new_v4(),
        athlete_id: athlete.id,
        session_date: on,
        rpe,
        duration_minutes: minutes,
        srpe: None,
    }
}

/// A coach with five male athletes jumping 45, 46, 44, 47, 43 cm
pub struct CohortFixture {
    pub coach_id: Uuid,
    pub admin_id: Uuid,
    pub athletes: Vec<AthleteRef>,
    pub database: Arc<InMemoryDatabase>,
}

impl CohortFixture {
    pub const HEIGHTS: [f64; 5] = [45.0, 46.0, 44.0, 47.0, 43.0];

    pub fn new() -> Self {
        let coach_id = Uuid::new_v4();
        let admin_id = Uuid::new_v4();
        let athletes: Vec<AthleteRef> = (0..Self::HEIGHTS.len())
            .map(|i| athlete(coach_id, &format!("Boxer {i}"), Gender::Male))
            .collect();
        let events = athletes
            .iter()
            .zip(Self::HEIGHTS)
            .map(|(a, height)| event(a, date(2024, 3, 1), &[("height_cm", height)]))
            .collect();
        let seed = SeedData {
            users: vec![
                seed_user(coach_id, UserRole::Coach, false),
                seed_user(admin_id, UserRole::Admin, false),
            ],
            athletes: athletes.clone(),
            events,
            sessions: Vec::new(),
        };
        Self {
            coach_id,
            admin_id,
            athletes,
            database: Arc::new(InMemoryDatabase::from_seed(seed)),
        }
    }

    pub fn coach(&self) -> AuthenticatedUser {
        coach_user(self.coach_id)
    }

    pub fn provider(&self) -> Arc<dyn DatabaseProvider> {
        self.database.clone()
    }

    /// The athlete whose only jump is 47 cm
    pub fn top_jumper(&self) -> &AthleteRef {
        &self.athletes[3]
    }
}

pub fn resources_with(database: Arc<dyn DatabaseProvider>, config: ServerConfig) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(database, config, ColumnMapping::default()))
}

pub fn app(database: Arc<dyn DatabaseProvider>) -> Router {
    routes::router(resources_with(database, ServerConfig::default()))
}
