//! Conflict records emitted by the detection scans
//!
//! Conflict records are computed fresh on every run and never persisted;
//! only the recommendation summaries derived from them are written back.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::schedule::SlotSuggestion;

/// Snapshot of one event's fields as they participated in a conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictParticipant {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Two events double-booked into the same venue at overlapping times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConflict {
    pub location: String,
    pub event1: ConflictParticipant,
    pub event2: ConflictParticipant,
    /// Up to three free slots at this venue on the conflict date
    pub alternative_slots: Vec<SlotSuggestion>,
    /// Human-readable move suggestion for the later of the two events
    pub recommendation: Option<String>,
}

/// Two events sharing a building (not necessarily a room) at overlapping
/// times. Informational; no slot suggestions are attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingConflict {
    pub building: String,
    pub date: String,
    pub event1: ConflictParticipant,
    pub event2: ConflictParticipant,
}

/// Two consecutive instances of a recurring series scheduled with too tight
/// a turnaround (strictly between 0 and 30 minutes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTimingConflict {
    pub title: String,
    pub gap_minutes: i64,
    pub warning: String,
    pub event1: ConflictParticipant,
    pub event2: ConflictParticipant,
}

/// Tagged union over the three conflict categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConflictRecord {
    #[serde(rename = "venue_conflict")]
    Venue(VenueConflict),
    #[serde(rename = "building_conflict")]
    Building(BuildingConflict),
    #[serde(rename = "recurring_timing_conflict")]
    RecurringTiming(RecurringTimingConflict),
}

/// Per-category counts for one detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub total: usize,
    pub venue: usize,
    pub building: usize,
    pub recurring: usize,
}

/// Combined output of one full detection pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictReport {
    pub venue_conflicts: Vec<VenueConflict>,
    pub building_conflicts: Vec<BuildingConflict>,
    pub recurring_conflicts: Vec<RecurringTimingConflict>,
    pub summary: ConflictSummary,
}

impl ConflictReport {
    /// Assemble a report from the three detector outputs, computing the
    /// summary counts.
    pub fn new(
        venue_conflicts: Vec<VenueConflict>,
        building_conflicts: Vec<BuildingConflict>,
        recurring_conflicts: Vec<RecurringTimingConflict>,
    ) -> Self {
        let summary = ConflictSummary {
            total: venue_conflicts.len() + building_conflicts.len() + recurring_conflicts.len(),
            venue: venue_conflicts.len(),
            building: building_conflicts.len(),
            recurring: recurring_conflicts.len(),
        };
        Self { venue_conflicts, building_conflicts, recurring_conflicts, summary }
    }

    /// Flatten the report into a single tagged list, venue first, for
    /// serialization consumers that want one stream of records.
    pub fn records(&self) -> Vec<ConflictRecord> {
        let mut records = Vec::with_capacity(self.summary.total);
        records.extend(self.venue_conflicts.iter().cloned().map(ConflictRecord::Venue));
        records.extend(self.building_conflicts.iter().cloned().map(ConflictRecord::Building));
        records
            .extend(self.recurring_conflicts.iter().cloned().map(ConflictRecord::RecurringTiming));
        records
    }
}
