// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for statistics, training load, ingestion, and the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large list.

/// Statistical output conventions
pub mod statistics {
    /// Decimal places used for every rounded statistic
    pub const DECIMAL_PLACES: i32 = 2;
    /// Decimal places used to group values before counting the mode
    pub const MODE_GROUPING_DECIMALS: i32 = 1;
    /// Two-sided z critical value for a 95% confidence interval
    pub const Z_95: f64 = 1.96;
    /// Width of a body-mass band in kilograms
    pub const MASS_BAND_WIDTH_KG: f64 = 5.0;
}

/// Session-RPE training load windows
pub mod training_load {
    /// Acute window (days), also the weekly-load and monotony window
    pub const ACUTE_WINDOW_DAYS: i64 = 7;
    /// Chronic window (days)
    pub const CHRONIC_WINDOW_DAYS: i64 = 28;
    /// Default analysis window (days)
    pub const DEFAULT_ANALYSIS_DAYS: u32 = 28;
    /// Smallest analysis window accepted over the API
    pub const MIN_ANALYSIS_DAYS: u32 = 7;
    /// Largest analysis window accepted over the API
    pub const MAX_ANALYSIS_DAYS: u32 = 90;
}

/// CSV ingestion limits and sentinels
pub mod ingestion {
    /// Lowest accepted metric value; smaller values are dropped silently
    pub const METRIC_MIN: f64 = 0.0;
    /// Highest accepted metric value; larger values are dropped silently
    pub const METRIC_MAX: f64 = 500.0;
    /// Highest accepted body mass in kilograms
    pub const BODY_MASS_MAX: f64 = 300.0;
    /// Maximum characters kept from an athlete name
    pub const MAX_ATHLETE_NAME_CHARS: usize = 100;
    /// Cell values treated as "no value" (compared case-insensitively)
    pub const BLANK_SENTINELS: [&str; 3] = ["na", "n/a", "-"];
    /// Date separators tried in order
    pub const DATE_SEPARATORS: [char; 3] = ['/', '-', '.'];
    /// Default maximum upload size in bytes (10 MiB)
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;
    /// Default maximum number of events per upload
    pub const DEFAULT_MAX_ROW_COUNT: usize = 10_000;
    /// Default number of events returned by a preview
    pub const DEFAULT_PREVIEW_ROWS: usize = 10;
}

/// Metric keys with special meaning
pub mod metric_keys {
    /// Test type tag written by ingestion
    pub const TEST_TYPE: &str = "test_type";
    /// Body mass recorded alongside a test
    pub const BODY_MASS_KG: &str = "body_mass_kg";
    /// Keys that describe an event rather than measure performance
    pub const NON_METRIC_KEYS: [&str; 2] = [TEST_TYPE, BODY_MASS_KG];
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// API routes
pub mod routes {
    /// API base path
    pub const API_V1: &str = "/api/v1";
    /// Health route
    pub const HEALTH: &str = "/health";
    /// Readiness route
    pub const READY: &str = "/ready";
}

/// Service identity
pub mod service_names {
    /// Name reported in logs
    pub const RINGSIDE_SERVER: &str = "ringside-server";
}

/// Headers set by the authentication gateway in front of the server
pub mod gateway_headers {
    /// Authenticated user id
    pub const USER_ID: &str = "x-user-id";
    /// Authenticated user role
    pub const USER_ROLE: &str = "x-user-role";
}
