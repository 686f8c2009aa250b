// ABOUTME: CSV ingestion engine turning export rows into normalized performance event records
// ABOUTME: Row failures are collected with their row number; the batch never aborts on a bad row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::mapping::ColumnMapping;
use super::parsing::{parse_date, parse_number, ParseError};
use chrono::NaiveDate;
use regex::Regex;
use ringside_core::constants::ingestion::{
    BODY_MASS_MAX, MAX_ATHLETE_NAME_CHARS, METRIC_MAX, METRIC_MIN,
};
use ringside_core::constants::metric_keys;
use ringside_core::models::{Gender, MetricMap, MetricValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

static HTML_TAG: OnceLock<Option<Regex>> = OnceLock::new();

/// Remove anything that looks like an HTML tag
fn strip_html(value: &str) -> String {
    HTML_TAG
        .get_or_init(|| Regex::new(r"<[^>]+>").ok())
        .as_ref()
        .map_or_else(
            || value.to_owned(),
            |re| re.replace_all(value, "").into_owned(),
        )
}

fn truncate_name(value: &str) -> String {
    value.chars().take(MAX_ATHLETE_NAME_CHARS).collect()
}

/// One normalized event extracted from a CSV row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Source row number (header is row 1)
    pub row: usize,
    /// Test date
    pub event_date: NaiveDate,
    /// Metric dictionary including `test_type` and, when known, `body_mass_kg`
    pub metrics: MetricMap,
    /// Athlete override supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athlete_id: Option<Uuid>,
    /// Athlete name taken from the row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athlete_name: Option<String>,
    /// Gender taken from the row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

/// A rejected row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Row number (header is row 1)
    pub row: usize,
    /// Human-readable reason
    pub reason: String,
}

impl RowError {
    /// Build a row error
    #[must_use]
    pub fn new(row: usize, reason: impl Into<String>) -> Self {
        Self {
            row,
            reason: reason.into(),
        }
    }
}

/// Result of processing a whole CSV document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestionOutcome {
    /// Rows that produced an event, in file order
    pub events: Vec<EventRecord>,
    /// Rows that were rejected, in file order
    pub errors: Vec<RowError>,
}

/// Problem found in the CSV header before row processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureWarning {
    /// The configured date column is absent; uploads cannot proceed
    MissingDateColumn(String),
    /// None of the configured metric columns is present
    NoMetricColumns(Vec<String>),
    /// The optional body mass column is absent
    MissingMassColumn(String),
    /// The header could not be read
    Unreadable(String),
}

impl StructureWarning {
    /// Whether this warning rejects an upload outright
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::MissingDateColumn(_))
    }
}

impl fmt::Display for StructureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDateColumn(column) => write!(f, "Missing date column: {column}"),
            Self::NoMetricColumns(expected) => write!(
                f,
                "No recognized metric columns found. Expected one of: {expected:?}"
            ),
            Self::MissingMassColumn(column) => {
                write!(f, "Missing body mass column: {column} (optional)")
            }
            Self::Unreadable(reason) => write!(f, "CSV parsing error: {reason}"),
        }
    }
}

impl Serialize for StructureWarning {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a single row was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum RowFailure {
    #[error("Missing required date column: {0}")]
    MissingDate(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("CSV parsing error: {0}")]
    Malformed(String),
}

/// Header lookup; a repeated header resolves to its last occurrence
struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    fn new(headers: &csv::StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(position, name)| (name.to_owned(), position))
            .collect();
        Self { positions }
    }

    fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    fn cell<'r>(&self, record: &'r csv::StringRecord, column: &str) -> Option<&'r str> {
        self.positions
            .get(column)
            .and_then(|position| record.get(*position))
    }
}

/// Converts CSV exports into [`EventRecord`]s using a [`ColumnMapping`]
#[derive(Debug, Clone, Default)]
pub struct CsvIngestionEngine {
    mapping: ColumnMapping,
}

impl CsvIngestionEngine {
    /// Engine for the given mapping
    #[must_use]
    pub const fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    /// Mapping in use
    #[must_use]
    pub const fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    fn reader(raw: &str) -> csv::Reader<&[u8]> {
        let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes())
    }

    /// Parse every data row into an event or a row error
    ///
    /// `athlete_id`, when given, is attached to every event and takes priority
    /// over any name found in the row.
    #[must_use]
    pub fn process(&self, raw: &str, athlete_id: Option<Uuid>) -> IngestionOutcome {
        let mut outcome = IngestionOutcome::default();
        let mut reader = Self::reader(raw);

        let index = match reader.headers() {
            Ok(headers) => HeaderIndex::new(headers),
            Err(e) => {
                outcome
                    .errors
                    .push(RowError::new(1, RowFailure::Malformed(e.to_string()).to_string()));
                return outcome;
            }
        };

        for (offset, result) in reader.records().enumerate() {
            let row = offset + 2;
            let processed = result
                .map_err(|e| RowFailure::Malformed(e.to_string()))
                .and_then(|record| self.process_row(&index, &record, row, athlete_id));
            match processed {
                Ok(Some(event)) => outcome.events.push(event),
                Ok(None) => debug!(row, "Skipping row without recognized metrics"),
                Err(failure) => outcome.errors.push(RowError::new(row, failure.to_string())),
            }
        }

        debug!(
            events = outcome.events.len(),
            errors = outcome.errors.len(),
            "Processed CSV rows"
        );
        outcome
    }

    fn process_row(
        &self,
        index: &HeaderIndex,
        record: &csv::StringRecord,
        row: usize,
        athlete_id: Option<Uuid>,
    ) -> Result<Option<EventRecord>, RowFailure> {
        let date_column = &self.mapping.date_column;
        let date_cell = index
            .cell(record, date_column)
            .filter(|cell| !cell.trim().is_empty())
            .ok_or_else(|| RowFailure::MissingDate(date_column.clone()))?;
        let event_date = parse_date(date_cell)?;

        let body_mass_kg = index
            .cell(record, &self.mapping.mass_column)
            .and_then(|cell| parse_number(cell).ok().flatten())
            .filter(|mass| (0.0..=BODY_MASS_MAX).contains(mass));

        let mut metrics = self.extract_metrics(index, record);
        if metrics.is_empty() {
            return Ok(None);
        }
        if let Some(mass) = body_mass_kg {
            metrics.insert(metric_keys::BODY_MASS_KG.to_owned(), MetricValue::Number(mass));
        }

        let athlete_name = if athlete_id.is_some() {
            None
        } else {
            self.athlete_name(index, record)
        };

        Ok(Some(EventRecord {
            row,
            event_date,
            metrics,
            athlete_id,
            athlete_name,
            gender: self.gender(index, record),
        }))
    }

    /// Metrics from every mapped column; the first kept value sets `test_type`
    fn extract_metrics(&self, index: &HeaderIndex, record: &csv::StringRecord) -> MetricMap {
        let mut metrics = MetricMap::new();
        for (header, column) in &self.mapping.metric_columns {
            let Some(cell) = index.cell(record, header) else {
                continue;
            };
            // Unparseable or out-of-range metric cells are dropped, not reported
            let Ok(Some(value)) = parse_number(cell) else {
                continue;
            };
            if !(METRIC_MIN..=METRIC_MAX).contains(&value) {
                continue;
            }
            metrics
                .entry(metric_keys::TEST_TYPE.to_owned())
                .or_insert_with(|| MetricValue::Text(column.test_type.clone()));
            metrics.insert(column.metric_key.clone(), MetricValue::Number(value));
        }
        metrics
    }

    fn athlete_name(&self, index: &HeaderIndex, record: &csv::StringRecord) -> Option<String> {
        let mapping = &self.mapping;

        let name = if let Some(cell) = mapping
            .athlete_column
            .as_deref()
            .and_then(|column| index.cell(record, column))
        {
            truncate_name(&strip_html(cell.trim()))
        } else if let Some(first) = mapping
            .first_name_column
            .as_deref()
            .and_then(|column| index.cell(record, column))
        {
            let first = strip_html(first.trim());
            let surname = mapping
                .surname_column
                .as_deref()
                .and_then(|column| index.cell(record, column))
                .map(|cell| strip_html(cell.trim()))
                .unwrap_or_default();
            let full = if surname.is_empty() {
                first
            } else {
                format!("{first} {surname}").trim().to_owned()
            };
            truncate_name(&full)
        } else {
            return None;
        };

        (!name.is_empty()).then_some(name)
    }

    fn gender(&self, index: &HeaderIndex, record: &csv::StringRecord) -> Option<Gender> {
        let cell = index.cell(record, self.mapping.gender_column.as_deref()?)?;
        cell.trim().to_lowercase().parse().ok()
    }

    /// Check the header against the mapping before processing rows
    #[must_use]
    pub fn validate_structure(&self, raw: &str) -> Vec<StructureWarning> {
        let mut reader = Self::reader(raw);
        let index = match reader.headers() {
            Ok(headers) => HeaderIndex::new(headers),
            Err(e) => return vec![StructureWarning::Unreadable(e.to_string())],
        };

        let mut warnings = Vec::new();
        if !index.contains(&self.mapping.date_column) {
            warnings.push(StructureWarning::MissingDateColumn(
                self.mapping.date_column.clone(),
            ));
        }
        if !self
            .mapping
            .metric_columns
            .iter()
            .any(|(header, _)| index.contains(header))
        {
            warnings.push(StructureWarning::NoMetricColumns(
                self.mapping.metric_columns.keys().cloned().collect(),
            ));
        }
        if !index.contains(&self.mapping.mass_column) {
            warnings.push(StructureWarning::MissingMassColumn(
                self.mapping.mass_column.clone(),
            ));
        }
        warnings
    }
}
