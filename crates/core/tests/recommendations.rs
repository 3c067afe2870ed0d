//! Integration tests for the recommendation engine over in-memory fakes.

mod support;

use std::sync::Arc;

use campuscal_core::{RecommendationRepository, RecommendationService};
use campuscal_domain::{ConflictType, Event, Severity};
use chrono::NaiveDate;
use support::{event, InMemoryEventRepository, InMemoryRecommendationRepository};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
}

fn service(events: Vec<Event>) -> (RecommendationService, Arc<InMemoryRecommendationRepository>) {
    let store = Arc::new(InMemoryRecommendationRepository::new());
    let service = RecommendationService::new(
        Arc::new(InMemoryEventRepository::new(events)),
        Arc::clone(&store) as Arc<dyn RecommendationRepository>,
    );
    (service, store)
}

#[tokio::test]
async fn missing_event_yields_none_not_an_error() {
    let (service, _) = service(vec![]);
    let recommendation = service.recommend_as_of(999, today()).await.unwrap();
    assert!(recommendation.is_none());
}

#[tokio::test]
async fn venue_double_booking_is_high_severity_with_move_suggestion() {
    let (service, _) = service(vec![
        event(1, "Career Fair", "2025-10-15", Some("14:00"), Some("Library Room 101")),
        event(2, "Study Group", "2025-10-15", Some("14:30"), Some("Library Room 101")),
    ]);

    let rec = service.recommend_as_of(1, today()).await.unwrap().unwrap();
    assert!(rec.has_conflicts);
    assert_eq!(rec.conflict_type, Some(ConflictType::VenueDoubleBooking));
    assert_eq!(rec.severity, Severity::High);

    // Busy set excludes event 1 itself, so only 14:30-15:30 blocks the grid
    assert_eq!(rec.recommended_action.as_deref(), Some("Move to 08:00 - 09:00"));
    assert_eq!(
        rec.alternative_times,
        vec!["08:00 - 09:00", "09:00 - 10:00", "10:00 - 11:00"]
    );
    assert_eq!(
        rec.details.as_deref(),
        Some("Venue 'Library Room 101' is double-booked. Recommend rescheduling to 08:00 - 09:00.")
    );
}

#[tokio::test]
async fn fully_booked_venue_suggests_finding_another_venue() {
    // The other booking is all-day, so every grid slot stays busy even
    // after excluding the event's own booking
    let (service, _) = service(vec![
        event(1, "Author Visit", "2025-10-15", Some("16:00"), Some("Library Lobby")),
        event(2, "Book Sale", "2025-10-15", None, Some("Library Lobby")),
    ]);

    let rec = service.recommend_as_of(1, today()).await.unwrap().unwrap();
    assert_eq!(rec.severity, Severity::High);
    assert_eq!(rec.recommended_action.as_deref(), Some("Find alternative venue"));
    assert!(rec.alternative_times.is_empty());
    assert_eq!(
        rec.details.as_deref(),
        Some("Venue 'Library Lobby' is double-booked with no available slots on this date.")
    );
}

#[tokio::test]
async fn building_conflict_is_medium_severity_with_spacing_hint() {
    let (service, _) = service(vec![
        event(1, "Math Tutoring", "2025-10-15", Some("10:00"), Some("Bldg 5, Room 2")),
        event(2, "Chess Club", "2025-10-15", Some("10:15"), Some("Bldg 5, Room 9")),
    ]);

    let rec = service.recommend_as_of(1, today()).await.unwrap().unwrap();
    assert!(rec.has_conflicts);
    assert_eq!(rec.conflict_type, Some(ConflictType::BuildingConflict));
    assert_eq!(rec.severity, Severity::Medium);

    // Busy set is the other room's 10:15-11:15 booking
    assert_eq!(rec.recommended_action.as_deref(), Some("Consider moving to 08:00 - 09:00"));
    assert_eq!(
        rec.details.as_deref(),
        Some("Multiple events scheduled in Bldg 5. Consider spacing out events.")
    );
    assert_eq!(rec.alternative_times.len(), 3);
}

#[tokio::test]
async fn venue_conflict_outranks_building_and_peak_rules() {
    // Same room twice (venue conflict) inside a building, during peak hours
    let (service, _) = service(vec![
        event(1, "Workshop A", "2025-10-15", Some("11:00"), Some("Bldg 5, Room 2")),
        event(2, "Workshop B", "2025-10-15", Some("11:30"), Some("Bldg 5, Room 2")),
    ]);

    let rec = service.recommend_as_of(1, today()).await.unwrap().unwrap();
    assert_eq!(rec.conflict_type, Some(ConflictType::VenueDoubleBooking));
    assert_eq!(rec.severity, Severity::High);
}

#[tokio::test]
async fn peak_hour_event_without_conflicts_gets_low_severity_hint() {
    let (service, _) = service(vec![event(1, "Career Chat", "2025-10-15", Some("11:00"), None)]);

    let rec = service.recommend_as_of(1, today()).await.unwrap().unwrap();
    assert!(!rec.has_conflicts);
    assert_eq!(rec.conflict_type, None);
    assert_eq!(rec.severity, Severity::Low);
    assert_eq!(
        rec.recommended_action.as_deref(),
        Some("Consider off-peak hours for better attendance")
    );
}

#[tokio::test]
async fn peak_window_is_inclusive_start_exclusive_end() {
    let (service, _) = service(vec![
        event(1, "Ten O'Clock", "2025-10-15", Some("10:00"), None),
        event(2, "Two O'Clock", "2025-10-15", Some("14:00"), None),
    ]);

    let at_ten = service.recommend_as_of(1, today()).await.unwrap().unwrap();
    assert_eq!(at_ten.severity, Severity::Low);

    let at_two = service.recommend_as_of(2, today()).await.unwrap().unwrap();
    assert_eq!(at_two.severity, Severity::None);
    assert!(at_two.recommended_action.is_none());
}

#[tokio::test]
async fn all_day_event_without_conflicts_is_not_a_peak_candidate() {
    let (service, _) = service(vec![event(1, "Club Fair", "2025-10-15", None, None)]);

    let rec = service.recommend_as_of(1, today()).await.unwrap().unwrap();
    assert_eq!(rec.severity, Severity::None);
    assert!(!rec.has_conflicts);
}

#[tokio::test]
async fn recompute_all_persists_the_batch_and_counts_by_severity() {
    let (service, store) = service(vec![
        // venue conflict pair -> two high
        event(1, "Career Fair", "2025-10-15", Some("14:00"), Some("Library Room 101")),
        event(2, "Study Group", "2025-10-15", Some("14:30"), Some("Library Room 101")),
        // building conflict pair -> two medium
        event(3, "Math Tutoring", "2025-10-16", Some("15:00"), Some("Bldg 5, Room 2")),
        event(4, "Chess Club", "2025-10-16", Some("15:15"), Some("Bldg 5, Room 9")),
        // peak hour, no conflicts -> low
        event(5, "Career Chat", "2025-10-17", Some("11:00"), None),
        // quiet event -> none
        event(6, "Evening Social", "2025-10-18", Some("18:00"), None),
        // already past -> not in the batch
        event(7, "Old News", "2025-09-01", Some("11:00"), None),
    ]);

    let stats = service.recompute_all_as_of(today()).await.unwrap();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.with_conflicts, 4);
    assert_eq!(stats.high_severity, 2);
    assert_eq!(stats.medium_severity, 2);
    assert_eq!(stats.low_severity, 1);

    assert_eq!(store.len(), 6);
    let stored = service.stored_recommendation(5).await.unwrap().unwrap();
    assert_eq!(stored.severity, Severity::Low);

    // Re-running overwrites rather than accumulating rows
    service.recompute_all_as_of(today()).await.unwrap();
    assert_eq!(store.len(), 6);
}

#[tokio::test]
async fn storage_failure_fails_the_whole_batch() {
    let store = Arc::new(InMemoryRecommendationRepository::failing());
    let service = RecommendationService::new(
        Arc::new(InMemoryEventRepository::new(vec![event(
            1,
            "Career Chat",
            "2025-10-15",
            Some("11:00"),
            None,
        )])),
        Arc::clone(&store) as Arc<dyn RecommendationRepository>,
    );

    assert!(service.recompute_all_as_of(today()).await.is_err());
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn recommend_and_save_round_trips_through_the_store() {
    let (service, _) = service(vec![event(1, "Career Chat", "2025-10-15", Some("11:00"), None)]);

    let saved = service.recommend_and_save(1).await.unwrap().unwrap();
    let stored = service.stored_recommendation(1).await.unwrap().unwrap();
    assert_eq!(stored.severity, saved.severity);
    assert_eq!(stored.recommended_action, saved.recommended_action);

    assert!(service.recommend_and_save(999).await.unwrap().is_none());
}
