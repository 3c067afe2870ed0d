//! Standard bookable time slots and free-slot lookup
//!
//! The grid is a fixed catalogue of eleven one-hour slots spanning
//! 08:00-19:00. It is deliberately not a general free/busy solver: no
//! partial slots, no durations other than an hour.

use campuscal_domain::constants::{SLOT_GRID_END_HOUR, SLOT_GRID_START_HOUR};
use campuscal_domain::{SlotSuggestion, TimeInterval};
use chrono::NaiveDate;

use super::interval::overlaps;

/// Free slots on `date`, in chronological order, given the intervals
/// already booked. Empty when every slot is taken.
pub fn free_slots(date: NaiveDate, busy: &[TimeInterval]) -> Vec<SlotSuggestion> {
    let mut suggestions = Vec::new();

    for start_hour in SLOT_GRID_START_HOUR..SLOT_GRID_END_HOUR {
        let Some(start) = date.and_hms_opt(start_hour, 0, 0) else { continue };
        let Some(end) = date.and_hms_opt(start_hour + 1, 0, 0) else { continue };
        let slot = TimeInterval { start, end };

        if busy.iter().any(|booked| overlaps(&slot, booked)) {
            continue;
        }

        suggestions.push(SlotSuggestion {
            start_time: start.time(),
            end_time: end.time(),
            slot: format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::interval::event_interval;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
    }

    #[test]
    fn empty_busy_set_returns_all_eleven_slots() {
        let slots = free_slots(date(), &[]);
        assert_eq!(slots.len(), 11);
        assert_eq!(slots[0].slot, "08:00 - 09:00");
        assert_eq!(slots[10].slot, "18:00 - 19:00");
    }

    #[test]
    fn full_day_booking_leaves_no_free_slots() {
        let all_day = event_interval("2025-10-15", None).unwrap();
        assert!(free_slots(date(), &[all_day]).is_empty());
    }

    #[test]
    fn booked_hours_are_skipped() {
        let busy = [
            event_interval("2025-10-15", Some("09:00")).unwrap(),
            event_interval("2025-10-15", Some("14:30")).unwrap(),
        ];
        let slots = free_slots(date(), &busy);

        // 09:00 knocks out the 09:00 slot; 14:30 straddles 14:00 and 15:00
        assert_eq!(slots.len(), 8);
        assert!(slots.iter().all(|s| s.slot != "09:00 - 10:00"));
        assert!(slots.iter().all(|s| s.slot != "14:00 - 15:00"));
        assert!(slots.iter().all(|s| s.slot != "15:00 - 16:00"));
        assert_eq!(slots[0].slot, "08:00 - 09:00");
    }

    #[test]
    fn slots_are_chronological() {
        let busy = [event_interval("2025-10-15", Some("08:00")).unwrap()];
        let slots = free_slots(date(), &busy);
        for pair in slots.windows(2) {
            assert!(pair[0].start_time < pair[1].start_time);
        }
    }

    #[test]
    fn booking_touching_a_slot_boundary_does_not_block_it() {
        // 13:00-14:00 booking ends exactly when the 14:00 slot starts
        let busy = [event_interval("2025-10-15", Some("13:00")).unwrap()];
        let slots = free_slots(date(), &busy);
        assert!(slots.iter().any(|s| s.slot == "14:00 - 15:00"));
        assert!(slots.iter().all(|s| s.slot != "13:00 - 14:00"));
    }
}
