// ABOUTME: Column mapping configuration for CSV exports (date, mass, identity, metric columns)
// ABOUTME: Metric columns keep document order because the first matching column sets test_type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where a CSV column lands in the metric dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricColumn {
    /// Test type tag applied to the event (e.g. `CMJ`)
    pub test_type: String,
    /// Metric key the value is stored under (e.g. `height_cm`)
    pub metric_key: String,
}

impl MetricColumn {
    /// Build a mapping entry
    #[must_use]
    pub fn new(test_type: impl Into<String>, metric_key: impl Into<String>) -> Self {
        Self {
            test_type: test_type.into(),
            metric_key: metric_key.into(),
        }
    }
}

/// CSV header to [`MetricColumn`], in declaration order
///
/// A repeated header keeps its first position and takes the last value.
pub type MetricColumns = IndexMap<String, MetricColumn>;

/// Which CSV columns hold which fields
///
/// Every field has a default, so a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Test date column (required per row)
    pub date_column: String,
    /// Body mass column (optional)
    pub mass_column: String,
    /// Full athlete name column
    pub athlete_column: Option<String>,
    /// First name column, used when there is no full-name column
    pub first_name_column: Option<String>,
    /// Surname column, appended to the first name when present
    pub surname_column: Option<String>,
    /// Gender column (`male` / `female`)
    pub gender_column: Option<String>,
    /// Metric columns in priority order
    pub metric_columns: MetricColumns,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: "Date".to_owned(),
            mass_column: "Body Mass (kg)".to_owned(),
            athlete_column: Some("Athlete".to_owned()),
            first_name_column: None,
            surname_column: None,
            gender_column: None,
            metric_columns: [
                ("CMJ Height (cm)", MetricColumn::new("CMJ", "height_cm")),
                ("CMJ RSI", MetricColumn::new("CMJ", "rsi")),
                ("CMJ Flight Time (ms)", MetricColumn::new("CMJ", "flight_time_ms")),
                (
                    "CMJ Contraction Time (ms)",
                    MetricColumn::new("CMJ", "contraction_time_ms"),
                ),
            ]
            .into_iter()
            .map(|(header, column)| (header.to_owned(), column))
            .collect(),
        }
    }
}
