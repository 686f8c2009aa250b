// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven server config plus the CSV column mapping loader
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Ringside server
//!
//! - **Environment**: Server configuration from environment variables
//! - **Column mapping**: Optional JSON override of the CSV column layout

/// Environment and server configuration
pub mod environment;

pub use environment::{
    load_column_mapping, AuthConfig, Environment, LogLevel, ServerConfig, TrainingConfig,
    UploadConfig,
};
