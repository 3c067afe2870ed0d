//! Conflict detection service - core business logic
//!
//! Three batch scans over upcoming events: venue double-bookings, shared
//! buildings, and recurring series scheduled back-to-back. Detectors hold
//! no state between runs; each invocation recomputes from current storage
//! contents using one `today` captured by the caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use campuscal_domain::constants::{MAX_ALTERNATIVE_SLOTS, MIN_TURNAROUND_MINUTES};
use campuscal_domain::{
    BuildingConflict, ConflictParticipant, ConflictReport, Event, RecurringTimingConflict, Result,
    TimeInterval, VenueConflict,
};
use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::ports::EventRepository;
use crate::schedule::{event_interval, free_slots, overlaps};

/// Coarse building key of a venue string: the token before the first comma,
/// or the whole string when there is none. Always trimmed.
pub fn building_key(location: &str) -> String {
    location.split_once(',').map_or_else(|| location.trim(), |(building, _)| building.trim()).to_string()
}

/// Batch conflict detector over the events read side.
pub struct ConflictDetector {
    events: Arc<dyn EventRepository>,
}

impl ConflictDetector {
    /// Create a new detector over the given repository.
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Detect double-bookings: two upcoming events at the same venue
    /// (case-insensitive, trimmed) at overlapping times.
    ///
    /// Each hit carries every free grid slot for that venue/date (capped at
    /// three) and a suggestion to move the chronologically later event to
    /// the first free slot. On an exact start tie the second event of the
    /// pair is the one asked to move.
    pub async fn detect_venue_conflicts(&self, today: NaiveDate) -> Result<Vec<VenueConflict>> {
        let events = self.events.find_upcoming_with_location(today).await?;
        let mut conflicts = Vec::new();

        for i in 0..events.len() {
            let event1 = &events[i];
            let Some(location1) = event1.location.as_deref() else { continue };
            let Some(interval1) = parsed_interval(event1) else { continue };

            for event2 in &events[i + 1..] {
                let Some(location2) = event2.location.as_deref() else { continue };
                if location1.trim().to_lowercase() != location2.trim().to_lowercase() {
                    continue;
                }

                let Some(interval2) = parsed_interval(event2) else { continue };
                if !overlaps(&interval1, &interval2) {
                    continue;
                }

                let busy = self.busy_intervals_for_location(location1, &event1.date).await?;
                let alternatives = free_slots(interval1.start.date(), &busy);

                let recommendation = alternatives.first().map(|first| {
                    let later_title =
                        if interval2.start >= interval1.start { &event2.title } else { &event1.title };
                    format!("Recommend moving '{}' to {}", later_title, first.slot)
                });

                conflicts.push(VenueConflict {
                    location: location1.to_string(),
                    event1: participant(event1, interval1),
                    event2: participant(event2, interval2),
                    alternative_slots: alternatives
                        .into_iter()
                        .take(MAX_ALTERNATIVE_SLOTS)
                        .collect(),
                    recommendation,
                });
            }
        }

        debug!(count = conflicts.len(), "venue conflict scan finished");
        Ok(conflicts)
    }

    /// Detect overlapping events within the same building on the same date.
    ///
    /// Locations are grouped under the substring before the first comma, so
    /// different rooms of one building land in one group. Informational
    /// only; no slot suggestions.
    pub async fn detect_building_conflicts(&self, today: NaiveDate) -> Result<Vec<BuildingConflict>> {
        let events = self.events.find_upcoming_in_buildings(today).await?;

        let mut groups: BTreeMap<(String, String), Vec<(&Event, TimeInterval)>> = BTreeMap::new();
        for event in &events {
            let Some(location) = event.location.as_deref() else { continue };
            let Some(interval) = parsed_interval(event) else { continue };
            groups
                .entry((building_key(location), event.date.clone()))
                .or_default()
                .push((event, interval));
        }

        let mut conflicts = Vec::new();
        for ((building, date), grouped) in &groups {
            if grouped.len() < 2 {
                continue;
            }
            for i in 0..grouped.len() {
                let (event1, interval1) = grouped[i];
                for &(event2, interval2) in &grouped[i + 1..] {
                    if overlaps(&interval1, &interval2) {
                        conflicts.push(BuildingConflict {
                            building: building.clone(),
                            date: date.clone(),
                            event1: participant(event1, interval1),
                            event2: participant(event2, interval2),
                        });
                    }
                }
            }
        }

        debug!(count = conflicts.len(), "building conflict scan finished");
        Ok(conflicts)
    }

    /// Detect recurring series instances scheduled too close together.
    ///
    /// Events sharing an exact title form a series; within a series sorted
    /// by (date, time), each consecutive pair is checked for a gap strictly
    /// between 0 and 30 minutes. Overlapping or back-to-back instances are
    /// not flagged here; this check targets tight turnarounds only.
    pub async fn detect_recurring_conflicts(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<RecurringTimingConflict>> {
        let events = self.events.find_upcoming_events(today).await?;

        // The repository already orders by (date, time), so instances of a
        // title stay in chronological order within their group.
        let mut series: BTreeMap<&str, Vec<&Event>> = BTreeMap::new();
        for event in &events {
            series.entry(event.title.as_str()).or_default().push(event);
        }

        let mut conflicts = Vec::new();
        for (title, instances) in &series {
            if instances.len() < 2 {
                continue;
            }
            for pair in instances.windows(2) {
                let (event1, event2) = (pair[0], pair[1]);
                let (Some(interval1), Some(interval2)) =
                    (parsed_interval(event1), parsed_interval(event2))
                else {
                    continue;
                };

                let gap = interval2.start - interval1.end;
                if gap > Duration::zero() && gap < Duration::minutes(MIN_TURNAROUND_MINUTES) {
                    let gap_minutes = gap.num_minutes();
                    conflicts.push(RecurringTimingConflict {
                        title: (*title).to_string(),
                        gap_minutes,
                        warning: format!("Events only {gap_minutes} minutes apart"),
                        event1: participant(event1, interval1),
                        event2: participant(event2, interval2),
                    });
                }
            }
        }

        debug!(count = conflicts.len(), "recurring series scan finished");
        Ok(conflicts)
    }

    /// Run all three scans and combine them with summary counts.
    pub async fn detect_all(&self, today: NaiveDate) -> Result<ConflictReport> {
        let venue = self.detect_venue_conflicts(today).await?;
        let building = self.detect_building_conflicts(today).await?;
        let recurring = self.detect_recurring_conflicts(today).await?;
        Ok(ConflictReport::new(venue, building, recurring))
    }

    /// Busy intervals for every parseable booking at a venue on one date.
    pub(crate) async fn busy_intervals_for_location(
        &self,
        location: &str,
        date: &str,
    ) -> Result<Vec<TimeInterval>> {
        let bookings = self.events.find_bookings_for_location(location, date).await?;
        Ok(bookings.iter().filter_map(parsed_interval).collect())
    }
}

fn parsed_interval(event: &Event) -> Option<TimeInterval> {
    let interval = event_interval(&event.date, event.time.as_deref());
    if interval.is_none() {
        debug!(event_id = event.id, date = %event.date, "skipping event with unparseable date/time");
    }
    interval
}

fn participant(event: &Event, interval: TimeInterval) -> ConflictParticipant {
    ConflictParticipant {
        id: event.id,
        title: event.title.clone(),
        date: event.date.clone(),
        time: event.time.clone(),
        location: event.location.clone(),
        start: interval.start,
        end: interval.end,
    }
}

#[cfg(test)]
mod tests {
    use super::building_key;

    #[test]
    fn building_key_takes_prefix_before_comma() {
        assert_eq!(building_key("Bldg 5, Room 2"), "Bldg 5");
        assert_eq!(building_key("Bldg 10,Room 101"), "Bldg 10");
    }

    #[test]
    fn building_key_without_comma_is_the_trimmed_string() {
        assert_eq!(building_key("  Bldg 7 "), "Bldg 7");
        assert_eq!(building_key("Main Hall"), "Main Hall");
    }
}
