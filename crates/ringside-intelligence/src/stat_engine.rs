// ABOUTME: Benchmark statistics engine for performance test samples
// ABOUTME: Mean, population/sample deviation, grouped mode, 95% CI, Z-score, and mass bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are far below 2^52
#![allow(clippy::cast_possible_truncation)] // Safe: rounded values and mass bands fit in i64

//! # Stat Engine
//!
//! Every function is total: insufficient input yields `None` rather than an
//! error, because a missing statistic is a valid answer. Outputs are rounded
//! to [`DECIMAL_PLACES`] unless noted.

use ringside_core::constants::statistics::{
    DECIMAL_PLACES, MASS_BAND_WIDTH_KG, MODE_GROUPING_DECIMALS, Z_95,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Round `value` to `places` decimals, ties to even
///
/// Rounds the exact binary value, so 2.675 (stored just below the tie)
/// becomes 2.67.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let precision = usize::try_from(places).unwrap_or(0);
    format!("{value:.precision$}").parse().unwrap_or(value)
}

fn round2(value: f64) -> f64 {
    round_to(value, DECIMAL_PLACES)
}

/// Divisor convention for the standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deviation {
    /// Divide by N
    #[default]
    Population,
    /// Divide by N - 1; callers must supply at least two values
    Sample,
}

/// Bounds of a 95% confidence interval for the mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

/// Descriptive statistics for one metric over a reference population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Arithmetic mean
    pub mean: Option<f64>,
    /// Population standard deviation
    pub std_dev: Option<f64>,
    /// Most frequent value after grouping to one decimal
    pub mode: Option<f64>,
    /// Lower 95% CI bound (needs two or more values)
    pub ci_lower: Option<f64>,
    /// Upper 95% CI bound (needs two or more values)
    pub ci_upper: Option<f64>,
    /// Number of samples
    pub count: usize,
}

impl BenchmarkResult {
    /// Result for an empty sample: zero count, every statistic absent
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            mean: None,
            std_dev: None,
            mode: None,
            ci_lower: None,
            ci_upper: None,
            count: 0,
        }
    }
}

/// Stateless statistics over `f64` samples
pub struct StatEngine;

impl StatEngine {
    /// Arithmetic mean, rounded
    #[must_use]
    pub fn mean(values: &[f64]) -> Option<f64> {
        Self::raw_mean(values).map(round2)
    }

    fn raw_mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Standard deviation, rounded
    ///
    /// A single value has a deviation of `0.0` under either convention.
    #[must_use]
    pub fn std_dev(values: &[f64], deviation: Deviation) -> Option<f64> {
        let mean = Self::raw_mean(values)?;
        let n = values.len();
        if n == 1 {
            return Some(0.0);
        }
        let divisor = match deviation {
            Deviation::Population => n as f64,
            Deviation::Sample => (n - 1) as f64,
        };
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / divisor;
        Some(round2(variance.sqrt()))
    }

    /// Most frequent value after grouping each sample to one decimal place
    ///
    /// Ties resolve to the smallest value.
    #[must_use]
    pub fn mode(values: &[f64]) -> Option<f64> {
        let factor = 10_f64.powi(MODE_GROUPING_DECIMALS);
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for value in values {
            let bucket = (round_to(*value, MODE_GROUPING_DECIMALS) * factor).round() as i64;
            *counts.entry(bucket).or_insert(0) += 1;
        }

        // BTreeMap iterates ascending, so the first bucket reaching the max is the smallest
        let max_count = counts.values().copied().max()?;
        counts
            .into_iter()
            .find(|(_, count)| *count == max_count)
            .map(|(bucket, _)| round2(bucket as f64 / factor))
    }

    /// 95% confidence interval for the mean
    ///
    /// The standard error uses the sample deviation (N - 1) while
    /// [`Self::std_dev`] defaults to the population convention elsewhere.
    #[must_use]
    pub fn confidence_interval_95(values: &[f64]) -> Option<ConfidenceInterval> {
        if values.len() < 2 {
            return None;
        }
        let mean = Self::raw_mean(values)?;
        let sd = Self::std_dev(values, Deviation::Sample)?;
        if sd == 0.0 {
            return Some(ConfidenceInterval {
                lower: round2(mean),
                upper: round2(mean),
            });
        }
        let standard_error = sd / (values.len() as f64).sqrt();
        let margin = Z_95 * standard_error;
        Some(ConfidenceInterval {
            lower: round2(mean - margin),
            upper: round2(mean + margin),
        })
    }

    /// Distance of `value` from `mean` in standard deviations, rounded
    ///
    /// Returns `0.0` when `std_dev` is zero.
    #[must_use]
    pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
        if std_dev == 0.0 {
            return 0.0;
        }
        round2((value - mean) / std_dev)
    }

    /// Label of the 5 kg body-mass band containing `mass_kg`, e.g. `70-74.9kg`
    #[must_use]
    pub fn mass_band(mass_kg: f64) -> String {
        let width = MASS_BAND_WIDTH_KG as i64;
        let lower = (mass_kg / MASS_BAND_WIDTH_KG).floor() as i64 * width;
        format!("{lower}-{}.9kg", lower + width - 1)
    }

    /// Mean, population SD, mode and CI for one sample; `None` when empty
    #[must_use]
    pub fn calculate_benchmarks(values: &[f64]) -> Option<BenchmarkResult> {
        if values.is_empty() {
            return None;
        }
        let interval = Self::confidence_interval_95(values);
        Some(BenchmarkResult {
            mean: Self::mean(values),
            std_dev: Self::std_dev(values, Deviation::Population),
            mode: Self::mode(values),
            ci_lower: interval.map(|ci| ci.lower),
            ci_upper: interval.map(|ci| ci.upper),
            count: values.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPREAD: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    #[test]
    fn test_mean() {
        assert_eq!(StatEngine::mean(&[]), None);
        assert_eq!(StatEngine::mean(&[42.5]), Some(42.5));
        assert_eq!(
            StatEngine::mean(&[1.0, 2.0, 6.0]),
            StatEngine::mean(&[6.0, 1.0, 2.0])
        );
        assert_eq!(StatEngine::mean(&[1.0, 2.0]), Some(1.5));
    }

    #[test]
    fn test_std_dev_conventions() {
        assert_eq!(StatEngine::std_dev(&SPREAD, Deviation::Population), Some(2.0));
        assert_eq!(StatEngine::std_dev(&SPREAD, Deviation::Sample), Some(2.14));
        assert_eq!(StatEngine::std_dev(&[], Deviation::Population), None);
    }

    #[test]
    fn test_std_dev_single_value_is_zero() {
        assert_eq!(StatEngine::std_dev(&[7.3], Deviation::Population), Some(0.0));
        assert_eq!(StatEngine::std_dev(&[7.3], Deviation::Sample), Some(0.0));
    }

    #[test]
    fn test_mode_tie_picks_smallest() {
        assert_eq!(StatEngine::mode(&[1.0, 1.0, 2.0, 2.0, 3.0]), Some(1.0));
        assert_eq!(StatEngine::mode(&[3.0, 2.0, 2.0, 1.0, 1.0]), Some(1.0));
        assert_eq!(StatEngine::mode(&[]), None);
    }

    #[test]
    fn test_mode_groups_to_one_decimal() {
        assert_eq!(StatEngine::mode(&[45.51, 45.54, 46.0]), Some(45.5));
    }

    #[test]
    fn test_confidence_interval() {
        assert_eq!(StatEngine::confidence_interval_95(&[5.0]), None);

        let flat = StatEngine::confidence_interval_95(&[3.3, 3.3, 3.3, 3.3]).unwrap();
        assert_eq!((flat.lower, flat.upper), (3.3, 3.3));

        // sample SD 2.14, SE = 2.14 / sqrt(8), margin = 1.96 * SE
        let ci = StatEngine::confidence_interval_95(&SPREAD).unwrap();
        assert_eq!((ci.lower, ci.upper), (3.52, 6.48));
    }

    #[test]
    fn test_z_score() {
        assert_eq!(StatEngine::z_score(45.0, 45.0, 3.2), 0.0);
        assert_eq!(StatEngine::z_score(99.0, 45.0, 0.0), 0.0);
        assert_eq!(StatEngine::z_score(47.0, 45.0, 1.41), 1.42);
        assert_eq!(StatEngine::z_score(43.0, 45.0, 2.0), -1.0);
    }

    #[test]
    fn test_mass_band() {
        assert_eq!(StatEngine::mass_band(72.5), "70-74.9kg");
        assert_eq!(StatEngine::mass_band(69.9), "65-69.9kg");
        assert_eq!(StatEngine::mass_band(0.0), "0-4.9kg");
        assert_eq!(StatEngine::mass_band(75.0), "75-79.9kg");
    }

    #[test]
    fn test_calculate_benchmarks() {
        assert_eq!(StatEngine::calculate_benchmarks(&[]), None);

        let single = StatEngine::calculate_benchmarks(&[44.0]).unwrap();
        assert_eq!(single.count, 1);
        assert_eq!(single.ci_lower, None);
        assert_eq!(single.ci_upper, None);
        assert_eq!(single.std_dev, Some(0.0));

        let cohort = StatEngine::calculate_benchmarks(&[45.0, 46.0, 44.0, 47.0, 43.0]).unwrap();
        assert_eq!(cohort.mean, Some(45.0));
        assert_eq!(cohort.count, 5);
        assert_eq!(cohort.std_dev, Some(1.41));
        assert_eq!(cohort.mode, Some(43.0));
    }

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(1.005, 1), 1.0);
        assert_eq!(round_to(-1.234, 2), -1.23);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(45.55, 1), 45.5);
        assert!(round_to(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_rounding_uses_exact_binary_value() {
        // 45.55 and 4.35 are stored just below their ties
        assert_eq!(StatEngine::mode(&[45.55]), Some(45.5));
        assert_eq!(StatEngine::mode(&[4.35]), Some(4.3));
        assert_eq!(StatEngine::mode(&[45.55, 45.55, 45.5, 45.6]), Some(45.5));
        assert_eq!(StatEngine::mean(&[2.675]), Some(2.67));
    }
}
