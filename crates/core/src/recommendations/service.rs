//! Recommendation service - core business logic
//!
//! For a single event: look for venue conflicts first (high severity), then
//! building conflicts (medium), then a peak-hour scheduling hint (low). The
//! first matching rule wins; a venue conflict always reports high even when
//! the event would also match a later rule.

use std::sync::Arc;

use campuscal_domain::constants::{
    EVENT_TIME_FORMAT, MAX_ALTERNATIVE_SLOTS, PEAK_HOURS_END, PEAK_HOURS_START,
};
use campuscal_domain::{
    ConflictType, Event, Recommendation, RecommendationStats, Result, Severity,
};
use chrono::{NaiveDate, NaiveTime, Timelike, Utc};
use tracing::{debug, info};

use super::ports::RecommendationRepository;
use crate::conflicts::ports::EventRepository;
use crate::conflicts::{building_key, ConflictDetector};
use crate::schedule::{event_interval, free_slots};

/// Recommendation engine over the events read side and the
/// recommendations write side.
pub struct RecommendationService {
    events: Arc<dyn EventRepository>,
    recommendations: Arc<dyn RecommendationRepository>,
    detector: ConflictDetector,
}

impl RecommendationService {
    /// Create a new service over the given repositories.
    pub fn new(
        events: Arc<dyn EventRepository>,
        recommendations: Arc<dyn RecommendationRepository>,
    ) -> Self {
        let detector = ConflictDetector::new(Arc::clone(&events));
        Self { events, recommendations, detector }
    }

    /// Generate a recommendation for one event, using the current date as
    /// the horizon for the conflict scans.
    ///
    /// Returns `Ok(None)` when the event does not exist; a missing event is
    /// not an error.
    pub async fn recommend(&self, event_id: i64) -> Result<Option<Recommendation>> {
        self.recommend_as_of(event_id, Utc::now().date_naive()).await
    }

    /// Generate a recommendation for one event with an explicit `today`.
    ///
    /// Precedence is strict: venue double-booking (high), then building
    /// conflict (medium), then peak-hour hint (low), then none.
    pub async fn recommend_as_of(
        &self,
        event_id: i64,
        today: NaiveDate,
    ) -> Result<Option<Recommendation>> {
        let Some(event) = self.events.find_event_by_id(event_id).await? else {
            debug!(event_id, "no such event, skipping recommendation");
            return Ok(None);
        };

        let mut recommendation = Recommendation::empty(event_id, Utc::now());

        let venue_conflicts = self.detector.detect_venue_conflicts(today).await?;
        if venue_conflicts.iter().any(|c| c.event1.id == event_id || c.event2.id == event_id) {
            recommendation.has_conflicts = true;
            recommendation.conflict_type = Some(ConflictType::VenueDoubleBooking);
            recommendation.severity = Severity::High;
            self.fill_venue_alternatives(&event, &mut recommendation).await?;
            return Ok(Some(recommendation));
        }

        let building_conflicts = self.detector.detect_building_conflicts(today).await?;
        if building_conflicts.iter().any(|c| c.event1.id == event_id || c.event2.id == event_id) {
            recommendation.has_conflicts = true;
            recommendation.conflict_type = Some(ConflictType::BuildingConflict);
            recommendation.severity = Severity::Medium;
            self.fill_building_alternatives(&event, &mut recommendation).await?;
            return Ok(Some(recommendation));
        }

        if let Some(time) = event.time.as_deref() {
            if let Ok(clock) = NaiveTime::parse_from_str(time.trim(), EVENT_TIME_FORMAT) {
                if (PEAK_HOURS_START..PEAK_HOURS_END).contains(&clock.hour()) {
                    recommendation.severity = Severity::Low;
                    recommendation.recommended_action =
                        Some("Consider off-peak hours for better attendance".to_string());
                    recommendation.details = Some(
                        "Event scheduled during peak hours. Consider early morning or late \
                         afternoon for less competition."
                            .to_string(),
                    );
                }
            }
        }

        Ok(Some(recommendation))
    }

    /// Recompute and persist recommendations for every upcoming event.
    ///
    /// `today` is captured once at batch start so a midnight rollover
    /// mid-run cannot split the horizon. The whole batch is persisted as a
    /// single unit of work; a storage failure rolls everything back.
    pub async fn recompute_all(&self) -> Result<RecommendationStats> {
        self.recompute_all_as_of(Utc::now().date_naive()).await
    }

    /// Batch recomputation with an explicit horizon date.
    pub async fn recompute_all_as_of(&self, today: NaiveDate) -> Result<RecommendationStats> {
        let events = self.events.find_upcoming_events(today).await?;

        let mut stats = RecommendationStats { total: events.len(), ..RecommendationStats::default() };
        let mut batch = Vec::with_capacity(events.len());

        for event in &events {
            let Some(recommendation) = self.recommend_as_of(event.id, today).await? else {
                continue;
            };

            if recommendation.has_conflicts {
                stats.with_conflicts += 1;
            }
            match recommendation.severity {
                Severity::High => stats.high_severity += 1,
                Severity::Medium => stats.medium_severity += 1,
                Severity::Low => stats.low_severity += 1,
                Severity::None => {}
            }
            batch.push(recommendation);
        }

        self.recommendations.replace_batch(&batch).await?;

        info!(
            total = stats.total,
            with_conflicts = stats.with_conflicts,
            high = stats.high_severity,
            medium = stats.medium_severity,
            low = stats.low_severity,
            "recommendation batch persisted"
        );
        Ok(stats)
    }

    /// Generate and persist the recommendation for one event.
    pub async fn recommend_and_save(&self, event_id: i64) -> Result<Option<Recommendation>> {
        let Some(recommendation) = self.recommend(event_id).await? else {
            return Ok(None);
        };
        self.recommendations.replace(&recommendation).await?;
        Ok(Some(recommendation))
    }

    /// Fetch the stored recommendation for an event, if any.
    pub async fn stored_recommendation(&self, event_id: i64) -> Result<Option<Recommendation>> {
        self.recommendations.find_by_event(event_id).await
    }

    /// Free-slot alternatives for a venue double-booking, computed from the
    /// location's busy set minus the event's own booking.
    async fn fill_venue_alternatives(
        &self,
        event: &Event,
        recommendation: &mut Recommendation,
    ) -> Result<()> {
        let Some(location) = event.location.as_deref() else { return Ok(()) };
        let Some(date) = parse_event_date(event) else { return Ok(()) };

        let bookings = self.events.find_bookings_for_location(location, &event.date).await?;
        let busy: Vec<_> = bookings
            .iter()
            .filter(|other| other.id != event.id)
            .filter_map(|other| event_interval(&other.date, other.time.as_deref()))
            .collect();

        let alternatives = free_slots(date, &busy);
        if let Some(first) = alternatives.first() {
            recommendation.recommended_action = Some(format!("Move to {}", first.slot));
            recommendation.details = Some(format!(
                "Venue '{}' is double-booked. Recommend rescheduling to {}.",
                location, first.slot
            ));
            recommendation.alternative_times = alternatives
                .iter()
                .take(MAX_ALTERNATIVE_SLOTS)
                .map(|slot| slot.slot.clone())
                .collect();
        } else {
            recommendation.recommended_action = Some("Find alternative venue".to_string());
            recommendation.details = Some(format!(
                "Venue '{}' is double-booked with no available slots on this date.",
                location
            ));
        }
        Ok(())
    }

    /// Alternatives for a building conflict, over the narrower busy set of
    /// timed events elsewhere in the same building.
    async fn fill_building_alternatives(
        &self,
        event: &Event,
        recommendation: &mut Recommendation,
    ) -> Result<()> {
        let Some(location) = event.location.as_deref() else { return Ok(()) };
        let Some(date) = parse_event_date(event) else { return Ok(()) };

        let building = building_key(location);
        let bookings = self.events.find_building_bookings(&building, &event.date).await?;
        let busy: Vec<_> = bookings
            .iter()
            .filter(|other| other.id != event.id && other.time.is_some())
            .filter_map(|other| event_interval(&other.date, other.time.as_deref()))
            .collect();

        if busy.is_empty() {
            return Ok(());
        }

        let alternatives = free_slots(date, &busy);
        if let Some(first) = alternatives.first() {
            recommendation.recommended_action = Some(format!("Consider moving to {}", first.slot));
            recommendation.details = Some(format!(
                "Multiple events scheduled in {building}. Consider spacing out events."
            ));
            recommendation.alternative_times = alternatives
                .iter()
                .take(MAX_ALTERNATIVE_SLOTS)
                .map(|slot| slot.slot.clone())
                .collect();
        }
        Ok(())
    }
}

fn parse_event_date(event: &Event) -> Option<NaiveDate> {
    event_interval(&event.date, event.time.as_deref()).map(|interval| interval.start.date())
}
