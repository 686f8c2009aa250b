// ABOUTME: Error handling entry point for the server crate
// ABOUTME: Re-exports the shared AppError taxonomy from ringside-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `ringside-core` so the intelligence crate and the
//! server agree on codes and HTTP statuses. `IntoResponse` is provided by the
//! core crate's `http-response` feature.

pub use ringside_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
