// ABOUTME: Core types and constants for the Ringside athlete analytics platform
// ABOUTME: Foundation crate with error handling, domain models, metric registry, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ringside Core
//!
//! Foundation crate providing shared types and constants for the Ringside
//! athlete analytics platform. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Athletes, performance events, training sessions
//! - **metrics**: Closed registry of known metric keys and their valid ranges

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (athletes, performance events, training sessions)
pub mod models;

/// Metric registry and boundary validation of metric payloads
pub mod metrics;
