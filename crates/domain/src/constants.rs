//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Event field formats (as produced by the scraper)
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const EVENT_TIME_FORMAT: &str = "%H:%M";

// Scheduling model
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;
pub const SLOT_GRID_START_HOUR: u32 = 8;
pub const SLOT_GRID_END_HOUR: u32 = 19;
pub const MAX_ALTERNATIVE_SLOTS: usize = 3;

// Recurring series: consecutive instances closer than this are flagged
pub const MIN_TURNAROUND_MINUTES: i64 = 30;

// Peak attendance window, [start, end) in hours
pub const PEAK_HOURS_START: u32 = 10;
pub const PEAK_HOURS_END: u32 = 14;

// Location prefix that marks a campus building location string
pub const BUILDING_LOCATION_PREFIX: &str = "Bldg";
