// ABOUTME: Core data models for athletes, performance events, and training sessions
// ABOUTME: Plain serde value types shared by the engines, services, and storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models
//!
//! These are the rows the analytics core consumes. They are owned by the
//! surrounding application; the engines only read them.

/// Athletes, coaches, roles and data-sharing consent
pub mod athlete;
/// Performance test events and their open metric dictionaries
pub mod event;
/// Training sessions rated by RPE
pub mod session;

pub use athlete::{AthleteRef, CoachConsent, Gender, UserRole};
pub use event::{MetricMap, MetricValue, PerformanceEvent};
pub use session::TrainingSession;
