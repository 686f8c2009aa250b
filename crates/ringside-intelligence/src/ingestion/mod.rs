// ABOUTME: CSV ingestion module: tolerant value parsing, column mapping, row-level processing
// ABOUTME: Produces normalized event records plus per-row errors without aborting the batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # CSV Ingestion
//!
//! Raw export text goes in; normalized [`EventRecord`]s and [`RowError`]s come
//! out. A row either becomes a complete record, is skipped silently (no usable
//! metrics), or is reported with its 1-based row number (header is row 1).

/// Date and number parsing for free-text cells
pub mod parsing;

/// Column mapping configuration
pub mod mapping;

/// Row processing and structure validation
pub mod csv_ingestion;

pub use csv_ingestion::{CsvIngestionEngine, EventRecord, IngestionOutcome, RowError, StructureWarning};
pub use mapping::{ColumnMapping, MetricColumn, MetricColumns};
pub use parsing::{parse_date, parse_number, ParseError};
