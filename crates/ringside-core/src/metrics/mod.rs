// ABOUTME: Central metric registry with labels, units, and valid ranges per metric key
// ABOUTME: Validates metric dictionaries at the write boundary before events are stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metric Registry
//!
//! Single source of truth for the metric keys the platform understands.
//! Keys outside the registry are stored untouched; registered keys with a
//! range must be numeric and inside that range.

use crate::constants::metric_keys;
use crate::models::{MetricMap, MetricValue};
use serde::Serialize;
use thiserror::Error;

/// Section of the product a metric belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricDomain {
    /// Performance testing (jumps, sprints)
    Testing,
    /// Training sessions
    Training,
    /// Wellness questionnaires
    Wellness,
}

/// Definition of one registered metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDefinition {
    /// Key inside the metric dictionary
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// Unit of measurement (empty when unitless)
    pub unit: &'static str,
    /// Product section
    pub domain: MetricDomain,
    /// Inclusive valid range; `None` for non-numeric metadata
    pub range: Option<(f64, f64)>,
    /// Direction used for Z-score colouring
    pub higher_is_better: bool,
}

/// All registered metrics
pub const METRIC_DEFINITIONS: &[MetricDefinition] = &[
    MetricDefinition {
        key: "height_cm",
        label: "CMJ Height (cm)",
        unit: "cm",
        domain: MetricDomain::Testing,
        range: Some((0.0, 200.0)),
        higher_is_better: true,
    },
    MetricDefinition {
        key: "sj_height_cm",
        label: "SJ Height (cm)",
        unit: "cm",
        domain: MetricDomain::Testing,
        range: Some((0.0, 200.0)),
        higher_is_better: true,
    },
    MetricDefinition {
        key: "eur_cm",
        label: "Eccentric Utilisation Ratio (cm)",
        unit: "cm",
        domain: MetricDomain::Testing,
        range: Some((-100.0, 200.0)),
        higher_is_better: true,
    },
    MetricDefinition {
        key: "rsi",
        label: "Reactive Strength Index",
        unit: "",
        domain: MetricDomain::Testing,
        range: Some((0.0, 50.0)),
        higher_is_better: true,
    },
    MetricDefinition {
        key: "flight_time_ms",
        label: "Flight Time (ms)",
        unit: "ms",
        domain: MetricDomain::Testing,
        range: Some((0.0, 2000.0)),
        higher_is_better: true,
    },
    MetricDefinition {
        key: "contraction_time_ms",
        label: "Contact Time (ms)",
        unit: "ms",
        domain: MetricDomain::Testing,
        range: Some((0.0, 2000.0)),
        higher_is_better: false,
    },
    MetricDefinition {
        key: metric_keys::BODY_MASS_KG,
        label: "Body Mass (kg)",
        unit: "kg",
        domain: MetricDomain::Testing,
        range: Some((0.0, 500.0)),
        higher_is_better: false,
    },
    MetricDefinition {
        key: metric_keys::TEST_TYPE,
        label: "Test Type",
        unit: "",
        domain: MetricDomain::Testing,
        range: None,
        higher_is_better: false,
    },
];

/// Look up a registered metric by key
#[must_use]
pub fn definition(key: &str) -> Option<&'static MetricDefinition> {
    METRIC_DEFINITIONS.iter().find(|def| def.key == key)
}

/// Whether `key` is event metadata rather than a performance measurement
#[must_use]
pub fn is_non_metric_key(key: &str) -> bool {
    metric_keys::NON_METRIC_KEYS.contains(&key)
}

/// Rejection of a metric dictionary at the write boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricValidationError {
    /// A ranged metric carried a non-numeric value
    #[error("Metric '{key}' must be numeric")]
    NotNumeric {
        /// Offending key
        key: String,
    },
    /// A ranged metric fell outside its registered range
    #[error("Metric '{key}' value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        /// Offending key
        key: String,
        /// Value supplied
        value: f64,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}

/// Validate a metric dictionary against the registry
///
/// # Errors
///
/// Returns the first registered, ranged key whose value is non-numeric or out of range.
pub fn validate_metrics(metrics: &MetricMap) -> Result<(), MetricValidationError> {
    for (key, value) in metrics {
        let Some((min, max)) = definition(key).and_then(|def| def.range) else {
            continue;
        };
        let numeric = match value {
            MetricValue::Number(number) if number.is_finite() => *number,
            _ => {
                return Err(MetricValidationError::NotNumeric { key: key.clone() });
            }
        };
        if numeric < min || numeric > max {
            return Err(MetricValidationError::OutOfRange {
                key: key.clone(),
                value: numeric,
                min,
                max,
            });
        }
    }
    Ok(())
}
