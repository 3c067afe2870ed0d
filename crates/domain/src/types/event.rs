//! Event read model

use serde::{Deserialize, Serialize};

/// A scraped campus event as stored in the `events` table.
///
/// `date` and `time` keep the raw scraped strings (`YYYY-MM-DD`, `HH:MM`).
/// A malformed row is excluded from interval-based comparisons one event at
/// a time rather than failing an entire scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
}
