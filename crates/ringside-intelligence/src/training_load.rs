// ABOUTME: Session-RPE training load engine: daily loads, weekly load, monotony, strain, ACWR
// ABOUTME: Zero-fills every calendar day so trailing windows always see contiguous days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: daily loads and window lengths are small

use crate::stat_engine::round_to;
use chrono::{Duration, NaiveDate};
use ringside_core::constants::statistics::DECIMAL_PLACES;
use ringside_core::constants::training_load::{ACUTE_WINDOW_DAYS, CHRONIC_WINDOW_DAYS};
use ringside_core::models::TrainingSession;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Total session load on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoad {
    /// Calendar day
    pub date: NaiveDate,
    /// Summed sRPE of all sessions that day
    pub total_srpe: i64,
    /// Number of sessions that day
    pub session_count: u32,
}

/// Training load indices for an analysis window
///
/// Every index is `None` when its minimum number of days is not met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadAnalysis {
    /// One entry per day of the window, oldest first
    pub daily_loads: Vec<DailyLoad>,
    /// Sum over the trailing acute window
    pub weekly_load: Option<i64>,
    /// Mean / population SD over the trailing acute window
    pub monotony: Option<f64>,
    /// Weekly load multiplied by monotony
    pub strain: Option<f64>,
    /// Acute mean divided by chronic mean
    pub acwr: Option<f64>,
    /// Mean daily load over the acute window
    pub acute_load: Option<f64>,
    /// Mean daily load over the chronic window
    pub chronic_load: Option<f64>,
}

/// Calculator for session-RPE load indices
pub struct TrainingLoadEngine {
    acute_window_days: i64,
    chronic_window_days: i64,
}

impl Default for TrainingLoadEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingLoadEngine {
    /// Engine with the standard 7-day acute and 28-day chronic windows
    #[must_use]
    pub const fn new() -> Self {
        Self {
            acute_window_days: ACUTE_WINDOW_DAYS,
            chronic_window_days: CHRONIC_WINDOW_DAYS,
        }
    }

    /// Engine with custom window lengths
    #[must_use]
    pub const fn with_windows(acute_days: i64, chronic_days: i64) -> Self {
        Self {
            acute_window_days: acute_days,
            chronic_window_days: chronic_days,
        }
    }

    /// One entry per day in `[start, end]`, zero-filled, oldest first
    ///
    /// Sessions dated outside the range are ignored.
    #[must_use]
    pub fn daily_loads(
        sessions: &[TrainingSession],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyLoad> {
        let mut by_day: BTreeMap<NaiveDate, DailyLoad> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|date| {
                (
                    date,
                    DailyLoad {
                        date,
                        total_srpe: 0,
                        session_count: 0,
                    },
                )
            })
            .collect();

        for session in sessions {
            if let Some(day) = by_day.get_mut(&session.session_date) {
                day.total_srpe += session.load();
                day.session_count += 1;
            }
        }

        by_day.into_values().collect()
    }

    /// Loads of the `days`-long window ending on `target`
    fn window(daily_loads: &[DailyLoad], target: NaiveDate, days: i64) -> Vec<i64> {
        let start = window_start(target, days).unwrap_or(NaiveDate::MIN);
        daily_loads
            .iter()
            .filter(|day| day.date >= start && day.date <= target)
            .map(|day| day.total_srpe)
            .collect()
    }

    /// Sum of the trailing acute window; `None` if no day falls inside it
    #[must_use]
    pub fn weekly_load(&self, daily_loads: &[DailyLoad], target: NaiveDate) -> Option<i64> {
        let week = Self::window(daily_loads, target, self.acute_window_days);
        if week.is_empty() {
            return None;
        }
        Some(week.iter().sum())
    }

    /// Mean over population SD of the trailing acute window
    ///
    /// Needs a complete window; absent when the mean or the SD is zero.
    #[must_use]
    pub fn monotony(&self, daily_loads: &[DailyLoad], target: NaiveDate) -> Option<f64> {
        let week = as_f64(&Self::window(daily_loads, target, self.acute_window_days));
        if (week.len() as i64) < self.acute_window_days {
            return None;
        }
        let mean = week.iter().sum::<f64>() / week.len() as f64;
        if mean == 0.0 {
            return None;
        }
        let variance =
            week.iter().map(|load| (load - mean).powi(2)).sum::<f64>() / week.len() as f64;
        let sd = variance.sqrt();
        if sd == 0.0 {
            return None;
        }
        Some(round_to(mean / sd, DECIMAL_PLACES))
    }

    /// Weekly load multiplied by monotony
    #[must_use]
    pub fn strain(weekly_load: Option<i64>, monotony: Option<f64>) -> Option<f64> {
        let (load, monotony) = (weekly_load?, monotony?);
        Some(round_to(load as f64 * monotony, DECIMAL_PLACES))
    }

    /// Acute:chronic workload ratio over the trailing windows
    #[must_use]
    pub fn acwr(&self, daily_loads: &[DailyLoad], target: NaiveDate) -> Option<f64> {
        let acute = self.acute_mean(daily_loads, target)?;
        let chronic = self.chronic_mean(daily_loads, target)?;
        if chronic == 0.0 {
            return None;
        }
        Some(round_to(acute / chronic, DECIMAL_PLACES))
    }

    fn acute_mean(&self, daily_loads: &[DailyLoad], target: NaiveDate) -> Option<f64> {
        let acute = Self::window(daily_loads, target, self.acute_window_days);
        gated_mean(&acute, self.acute_window_days)
    }

    fn chronic_mean(&self, daily_loads: &[DailyLoad], target: NaiveDate) -> Option<f64> {
        let chronic = Self::window(daily_loads, target, self.chronic_window_days);
        gated_mean(&chronic, self.chronic_window_days)
    }

    /// Full load analysis over the `days` days ending on `target`
    #[must_use]
    pub fn analyze(
        &self,
        sessions: &[TrainingSession],
        days: u32,
        target: NaiveDate,
    ) -> LoadAnalysis {
        // A window reaching past the earliest representable date is treated as empty
        let daily_loads = match window_start(target, i64::from(days)) {
            Some(start) if days > 0 => Self::daily_loads(sessions, start, target),
            _ => Vec::new(),
        };

        let weekly_load = self.weekly_load(&daily_loads, target);
        let monotony = self.monotony(&daily_loads, target);

        LoadAnalysis {
            weekly_load,
            monotony,
            strain: Self::strain(weekly_load, monotony),
            acwr: self.acwr(&daily_loads, target),
            acute_load: self
                .acute_mean(&daily_loads, target)
                .map(|mean| round_to(mean, DECIMAL_PLACES)),
            chronic_load: self
                .chronic_mean(&daily_loads, target)
                .map(|mean| round_to(mean, DECIMAL_PLACES)),
            daily_loads,
        }
    }
}

/// First day of the `days`-long window ending on `target`, if representable
#[must_use]
pub fn window_start(target: NaiveDate, days: i64) -> Option<NaiveDate> {
    target.checked_sub_signed(Duration::days(days - 1))
}

fn as_f64(loads: &[i64]) -> Vec<f64> {
    loads.iter().map(|load| *load as f64).collect()
}

fn gated_mean(loads: &[i64], minimum_days: i64) -> Option<f64> {
    if loads.is_empty() || (loads.len() as i64) < minimum_days {
        return None;
    }
    Some(loads.iter().sum::<i64>() as f64 / loads.len() as f64)
}
