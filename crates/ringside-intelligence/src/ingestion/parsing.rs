// ABOUTME: Free-text cell parsers for day-first dates and numbers with blank sentinels
// ABOUTME: Never guesses month-first order; blank and NA cells are absence, not errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use ringside_core::constants::ingestion::{BLANK_SENTINELS, DATE_SEPARATORS};
use thiserror::Error;

/// A cell that could not be interpreted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No separator produced a valid day/month/year date
    #[error("Invalid date format: {0}. Expected DD/MM/YYYY")]
    InvalidDateFormat(String),
    /// Non-blank text that is not a finite number
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

/// Parse a day/month/year date, trying `/`, `-` and `.` in that order
///
/// # Errors
///
/// Returns [`ParseError::InvalidDateFormat`] when no separator yields a real date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = text.trim();
    DATE_SEPARATORS
        .iter()
        .find_map(|separator| parse_with_separator(trimmed, *separator))
        .ok_or_else(|| ParseError::InvalidDateFormat(trimmed.to_owned()))
}

fn parse_with_separator(text: &str, separator: char) -> Option<NaiveDate> {
    let mut parts = text.split(separator);
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let day = digits(day, 1..=2)?;
    let month = digits(month, 1..=2)?;
    let year = digits(year, 4..=4)?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn digits(part: &str, width: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !width.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a numeric cell
///
/// Blank cells and the case-insensitive sentinels `na`, `n/a` and `-` are `Ok(None)`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumericValue`] for any other text that is not a finite number.
pub fn parse_number(text: &str) -> Result<Option<f64>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || BLANK_SENTINELS
            .iter()
            .any(|sentinel| trimmed.eq_ignore_ascii_case(sentinel))
    {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| ParseError::InvalidNumericValue(trimmed.to_owned()))
}
