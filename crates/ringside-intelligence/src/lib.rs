// ABOUTME: Athlete analytics engines: benchmark statistics, session-RPE training load, CSV ingestion
// ABOUTME: Extracted from the server crate so the numeric core stays pure and synchronous
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ringside Intelligence
//!
//! Pure computation over in-memory collections. Nothing in this crate performs
//! I/O, awaits, or holds shared state; callers fetch rows first and pass them in.
//!
//! - [`stat_engine`]: mean, standard deviation, grouped mode, 95% confidence
//!   interval, Z-score, mass bands, and the combined benchmark aggregate
//! - [`training_load`]: daily sRPE load, weekly load, monotony, strain, ACWR
//! - [`ingestion`]: tolerant date/number parsing and CSV-to-event conversion
//!   with row-level error collection

/// Benchmark statistics over numeric samples
pub mod stat_engine;

/// Session-RPE training load indices
pub mod training_load;

/// CSV ingestion of performance test exports
pub mod ingestion;

pub use ingestion::{
    ColumnMapping, CsvIngestionEngine, EventRecord, IngestionOutcome, MetricColumn, ParseError,
    RowError, StructureWarning,
};
pub use stat_engine::{round_to, BenchmarkResult, ConfidenceInterval, Deviation, StatEngine};
pub use training_load::{window_start, DailyLoad, LoadAnalysis, TrainingLoadEngine};
