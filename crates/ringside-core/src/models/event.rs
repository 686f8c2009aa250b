// ABOUTME: Performance test event model with an open metric dictionary
// ABOUTME: MetricValue tolerates legacy text values and coerces them when numeric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::metric_keys;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single value inside an event's metric dictionary
///
/// Metric payloads are validated against the registry when written, but
/// older rows may still carry numbers stored as text (or free text), so
/// readers go through [`MetricValue::as_f64`] instead of matching directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Numeric measurement
    Number(f64),
    /// Text value (test type tags, or legacy numbers stored as strings)
    Text(String),
}

impl MetricValue {
    /// Numeric view of the value, if it has one
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
        }
    }

    /// Text view of the value, if it is text
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Metric dictionary keyed by metric key
pub type MetricMap = BTreeMap<String, MetricValue>;

/// A recorded performance test (e.g. a countermovement jump session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEvent {
    /// Event id
    pub id: Uuid,
    /// Athlete the event belongs to
    pub athlete_id: Uuid,
    /// Test date
    pub event_date: NaiveDate,
    /// Measurements plus metadata (`test_type`, `body_mass_kg`)
    pub metrics: MetricMap,
}

impl PerformanceEvent {
    /// Numeric value of `key`, if present and coercible
    #[must_use]
    pub fn metric_value(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).and_then(MetricValue::as_f64)
    }

    /// Body mass recorded with this event
    #[must_use]
    pub fn body_mass_kg(&self) -> Option<f64> {
        self.metric_value(metric_keys::BODY_MASS_KG)
    }

    /// Test type tag, if any
    #[must_use]
    pub fn test_type(&self) -> Option<&str> {
        self.metrics
            .get(metric_keys::TEST_TYPE)
            .and_then(MetricValue::as_text)
    }
}
