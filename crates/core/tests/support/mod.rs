//! Shared test support for core integration tests

pub mod repositories;

pub use repositories::{InMemoryEventRepository, InMemoryRecommendationRepository};

use campuscal_domain::Event;

/// Terse event constructor for test fixtures.
pub fn event(
    id: i64,
    title: &str,
    date: &str,
    time: Option<&str>,
    location: Option<&str>,
) -> Event {
    Event {
        id,
        title: title.to_string(),
        date: date.to_string(),
        time: time.map(str::to_string),
        location: location.map(str::to_string),
    }
}
