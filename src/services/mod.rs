// ABOUTME: Domain service layer between the HTTP routes and the data provider
// ABOUTME: Analysis orchestration, CSV uploads, and training load analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services hold the business rules (ownership, reference populations,
//! upload limits) so route handlers stay thin. They are built per request
//! from [`crate::resources::ServerResources`].

/// Benchmarks and Z-scores against reference groups
pub mod analysis;

/// Training load analysis
pub mod training;

/// CSV upload preview and ingestion
pub mod uploads;

pub use analysis::{
    AnalysisOrchestrator, BenchmarkQuery, BenchmarkResponse, BenchmarkSource, ReferenceGroup,
    ZScoreQuery, ZScoreResponse,
};
pub use training::TrainingLoadService;
pub use uploads::{UploadPreview, UploadResult, UploadService};
