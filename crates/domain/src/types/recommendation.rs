//! Persisted recommendation rows and their enums

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CampusCalError;

/// Ordinal conflict importance: `none < low < medium < high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Stable text form used in the `event_recommendations` table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CampusCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(CampusCalError::InvalidInput(format!("unknown severity: {other}"))),
        }
    }
}

/// Conflict category recorded on a recommendation. Absence means no
/// conflict was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    VenueDoubleBooking,
    BuildingConflict,
}

impl ConflictType {
    /// Stable text form used in the `event_recommendations` table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VenueDoubleBooking => "venue_double_booking",
            Self::BuildingConflict => "building_conflict",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictType {
    type Err = CampusCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "venue_double_booking" => Ok(Self::VenueDoubleBooking),
            "building_conflict" => Ok(Self::BuildingConflict),
            other => Err(CampusCalError::InvalidInput(format!("unknown conflict type: {other}"))),
        }
    }
}

/// One recommendation row per event, overwritten on every regeneration.
///
/// Severity is monotone with the conflict type: venue double-booking is
/// high, building conflict is medium, a peak-hour event without conflicts
/// is low, everything else is none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub event_id: i64,
    pub has_conflicts: bool,
    pub conflict_type: Option<ConflictType>,
    pub severity: Severity,
    pub recommended_action: Option<String>,
    /// Up to three formatted slot ranges, best first
    pub alternative_times: Vec<String>,
    pub details: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl Recommendation {
    /// A clean slate for an event: no conflicts, severity none.
    pub fn empty(event_id: i64, generated_at: DateTime<Utc>) -> Self {
        Self {
            event_id,
            has_conflicts: false,
            conflict_type: None,
            severity: Severity::None,
            recommended_action: None,
            alternative_times: Vec::new(),
            details: None,
            generated_at,
        }
    }
}

/// Aggregate counts reported by a batch recommendation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationStats {
    pub total: usize,
    pub with_conflicts: usize,
    pub high_severity: usize,
    pub medium_severity: usize,
    pub low_severity: usize,
}
