// ABOUTME: Athlete, gender, user role, and consent models
// ABOUTME: AthleteRef is the minimal athlete row needed to resolve reference populations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Athlete gender as recorded by the coach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male athlete
    Male,
    /// Female athlete
    Female,
}

impl Gender {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Exact match on the lowercase wire names; anything else is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("Unknown gender: {other}")),
        }
    }
}

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular coach account
    #[default]
    Coach,
    /// Administrator; owns the reference data pool
    Admin,
}

impl UserRole {
    /// Whether this role can see cross-coach data
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coach" => Ok(Self::Coach),
            "admin" => Ok(Self::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Minimal athlete row: identity, owner, and the attributes used for grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteRef {
    /// Athlete id
    pub id: Uuid,
    /// Owning coach
    pub coach_id: Uuid,
    /// Display name, unique per coach
    pub name: String,
    /// Recorded gender
    pub gender: Gender,
}

/// A coach's data-sharing consent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachConsent {
    /// Coach the consent belongs to
    pub coach_id: Uuid,
    /// Whether the coach shares anonymised athlete data
    pub data_sharing_enabled: bool,
}
