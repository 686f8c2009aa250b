// ABOUTME: Centralized resource container for dependency injection into routes and services
// ABOUTME: Holds the data provider, server configuration, and the resolved CSV column mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared behind an `Arc`; services are cheap
//! views constructed per request from these handles.

use crate::config::environment::ServerConfig;
use crate::database_plugins::DatabaseProvider;
use crate::services::{AnalysisOrchestrator, TrainingLoadService, UploadService};
use ringside_intelligence::ColumnMapping;
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Data access provider
    pub database: Arc<dyn DatabaseProvider>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// CSV column mapping used by uploads
    pub column_mapping: Arc<ColumnMapping>,
}

impl ServerResources {
    /// Bundle resources
    #[must_use]
    pub fn new(
        database: Arc<dyn DatabaseProvider>,
        config: ServerConfig,
        column_mapping: ColumnMapping,
    ) -> Self {
        Self {
            database,
            config: Arc::new(config),
            column_mapping: Arc::new(column_mapping),
        }
    }

    /// Benchmark and Z-score orchestration
    #[must_use]
    pub fn analysis(&self) -> AnalysisOrchestrator {
        AnalysisOrchestrator::new(Arc::clone(&self.database))
    }

    /// CSV upload handling
    #[must_use]
    pub fn uploads(&self) -> UploadService {
        UploadService::new(
            Arc::clone(&self.database),
            (*self.column_mapping).clone(),
            self.config.uploads.clone(),
        )
    }

    /// Training load analysis
    #[must_use]
    pub fn training(&self) -> TrainingLoadService {
        TrainingLoadService::new(Arc::clone(&self.database))
    }
}
