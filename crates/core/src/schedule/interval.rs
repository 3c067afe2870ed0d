//! Interval model: event date/time fields to comparable time intervals

use campuscal_domain::constants::{
    DEFAULT_EVENT_DURATION_MINUTES, EVENT_DATE_FORMAT, EVENT_TIME_FORMAT,
};
use campuscal_domain::TimeInterval;
use chrono::{Duration, NaiveDate, NaiveTime};

/// Build the time interval an event occupies.
///
/// A missing (or blank) time means an all-day event spanning `00:00:00` to
/// the last representable instant of the date, so it overlaps any timed
/// event on the same day. A present time gets the default 60-minute
/// duration.
///
/// Returns `None` when the date or time does not parse; callers exclude
/// such events from comparison instead of aborting the scan.
pub fn event_interval(date: &str, time: Option<&str>) -> Option<TimeInterval> {
    let day = NaiveDate::parse_from_str(date.trim(), EVENT_DATE_FORMAT).ok()?;

    let time = time.map(str::trim).filter(|t| !t.is_empty());
    match time {
        None => Some(TimeInterval {
            start: day.and_hms_opt(0, 0, 0)?,
            end: day.and_hms_micro_opt(23, 59, 59, 999_999)?,
        }),
        Some(clock) => {
            let clock = NaiveTime::parse_from_str(clock, EVENT_TIME_FORMAT).ok()?;
            let start = day.and_time(clock);
            Some(TimeInterval { start, end: start + Duration::minutes(DEFAULT_EVENT_DURATION_MINUTES) })
        }
    }
}

/// Whether two intervals intersect.
///
/// Open comparison on both endpoints: touching intervals (one ends exactly
/// when the other starts) do not overlap. Commutative. An interval trivially
/// overlaps itself, so callers must never test an event against itself.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.start < b.end && b.start < a.end
}
