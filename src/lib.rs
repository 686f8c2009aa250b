// ABOUTME: Main library entry point for the Ringside athlete analytics server
// ABOUTME: Wires configuration, logging, data access, services, and HTTP routes around the analytics core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ringside Server
//!
//! Performance analytics for coaches: benchmark statistics and Z-scores
//! against reference groups, session-RPE training load, and CSV ingestion
//! of force-plate exports.
//!
//! ## Architecture
//!
//! - **`ringside-core`**: errors, constants, domain models, metric registry
//! - **`ringside-intelligence`**: pure statistics, training load, and CSV engines
//! - **services**: coach-scoped orchestration over a [`database_plugins::DatabaseProvider`]
//! - **routes**: thin axum handlers under `/api/v1`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ringside_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Ringside configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Request identity from the upstream gateway
pub mod auth;

/// Environment configuration
pub mod config;

/// Data access trait and the in-memory provider
pub mod database_plugins;

/// Error types re-exported from the core crate
pub mod errors;

/// Tracing subscriber setup and structured log helpers
pub mod logging;

/// Request logging middleware
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Business logic between routes and storage
pub mod services;

pub use ringside_core::{constants, metrics, models};
