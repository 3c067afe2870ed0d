//! Derived scheduling types: intervals and slot suggestions

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A half-open time interval derived from an event, `start < end`.
///
/// Never persisted; rebuilt from the event's date/time fields on every
/// detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A bookable one-hour slot proposed as an alternative, drawn from the
/// standard slot grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSuggestion {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Formatted range, e.g. `"08:00 - 09:00"`
    pub slot: String,
}
