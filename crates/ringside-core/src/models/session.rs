// ABOUTME: Training session model rated by session-RPE
// ABOUTME: Provides the session load (sRPE) with a fallback to rpe * duration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logged training session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Session id
    pub id: Uuid,
    /// Athlete who trained
    pub athlete_id: Uuid,
    /// Calendar day of the session
    pub session_date: NaiveDate,
    /// Rating of perceived exertion, 1..=10
    pub rpe: u8,
    /// Duration in minutes, 1..=600
    pub duration_minutes: u32,
    /// Precomputed session load; derived from rpe and duration when absent
    #[serde(default)]
    pub srpe: Option<i64>,
}

impl TrainingSession {
    /// Session-RPE load for this session
    #[must_use]
    pub fn load(&self) -> i64 {
        self.srpe
            .unwrap_or_else(|| i64::from(self.rpe) * i64::from(self.duration_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_prefers_stored_srpe() {
        let mut session = TrainingSession {
            id: Uuid::new_v4(),
            athlete_id: Uuid::new_v4(),
            session_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            rpe: 7,
            duration_minutes: 60,
            srpe: Some(300),
        };
        assert_eq!(session.load(), 300);

        session.srpe = None;
        assert_eq!(session.load(), 420);
    }
}
