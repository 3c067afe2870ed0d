//! Port interfaces for reading events from storage
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use campuscal_domain::{Event, Result};
use chrono::NaiveDate;

/// Read side of the events table.
///
/// All "upcoming" queries compare the stored ISO date string against
/// `from`, so implementations can filter lexicographically.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Look up a single event by id.
    async fn find_event_by_id(&self, id: i64) -> Result<Option<Event>>;

    /// All events with `date >= from`, ordered by (date, time).
    async fn find_upcoming_events(&self, from: NaiveDate) -> Result<Vec<Event>>;

    /// Upcoming events that carry a non-empty location, ordered by
    /// (location, date, time). Input to the venue conflict scan.
    async fn find_upcoming_with_location(&self, from: NaiveDate) -> Result<Vec<Event>>;

    /// Upcoming events whose location starts with the building prefix
    /// (`Bldg...`), ordered by (date, time). Input to the building scan.
    async fn find_upcoming_in_buildings(&self, from: NaiveDate) -> Result<Vec<Event>>;

    /// Every booking on `date` whose location contains `location`
    /// (case-insensitive substring), ordered by time. Feeds the slot-grid
    /// busy set for a venue.
    async fn find_bookings_for_location(&self, location: &str, date: &str) -> Result<Vec<Event>>;

    /// Every booking on `date` located in `building` (location starts with
    /// `"{building},"` or `"{building} "`). Feeds the building-level busy
    /// set; callers exclude the event under examination themselves.
    async fn find_building_bookings(&self, building: &str, date: &str) -> Result<Vec<Event>>;
}
