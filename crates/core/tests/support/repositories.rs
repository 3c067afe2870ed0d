//! In-memory fake repository implementations for testing
//!
//! Mirror the SQL semantics of the SQLite repositories (lexicographic date
//! comparison, NULLs-first time ordering, case-insensitive LIKE matching)
//! so detector tests stay faithful without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use campuscal_domain::constants::BUILDING_LOCATION_PREFIX;
use campuscal_domain::{CampusCalError, Event, Recommendation, Result};
use campuscal_core::conflicts::ports::EventRepository;
use campuscal_core::recommendations::ports::RecommendationRepository;
use chrono::NaiveDate;

/// In-memory fake for `EventRepository`, seeded with a fixed event set.
#[derive(Default, Clone)]
pub struct InMemoryEventRepository {
    events: Vec<Event>,
}

impl InMemoryEventRepository {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    fn upcoming(&self, from: NaiveDate) -> Vec<Event> {
        let from = from.format("%Y-%m-%d").to_string();
        self.events.iter().filter(|e| e.date >= from).cloned().collect()
    }
}

/// Sort matching `ORDER BY date, time` (SQLite sorts NULL time first).
fn sort_by_date_time(events: &mut [Event]) {
    events.sort_by(|a, b| {
        (&a.date, &a.time, a.id).cmp(&(&b.date, &b.time, b.id))
    });
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.to_lowercase().starts_with(&prefix.to_lowercase())
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_event_by_id(&self, id: i64) -> Result<Option<Event>> {
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_upcoming_events(&self, from: NaiveDate) -> Result<Vec<Event>> {
        let mut events = self.upcoming(from);
        sort_by_date_time(&mut events);
        Ok(events)
    }

    async fn find_upcoming_with_location(&self, from: NaiveDate) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .upcoming(from)
            .into_iter()
            .filter(|e| e.location.as_deref().is_some_and(|l| !l.is_empty()))
            .collect();
        events.sort_by(|a, b| {
            (&a.location, &a.date, &a.time, a.id).cmp(&(&b.location, &b.date, &b.time, b.id))
        });
        Ok(events)
    }

    async fn find_upcoming_in_buildings(&self, from: NaiveDate) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .upcoming(from)
            .into_iter()
            .filter(|e| {
                e.location
                    .as_deref()
                    .is_some_and(|l| starts_with_ignore_case(l, BUILDING_LOCATION_PREFIX))
            })
            .collect();
        sort_by_date_time(&mut events);
        Ok(events)
    }

    async fn find_bookings_for_location(&self, location: &str, date: &str) -> Result<Vec<Event>> {
        let needle = location.to_lowercase();
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.date == date)
            .filter(|e| e.location.as_deref().is_some_and(|l| l.to_lowercase().contains(&needle)))
            .cloned()
            .collect();
        sort_by_date_time(&mut events);
        Ok(events)
    }

    async fn find_building_bookings(&self, building: &str, date: &str) -> Result<Vec<Event>> {
        let comma_prefix = format!("{building},");
        let space_prefix = format!("{building} ");
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.date == date)
            .filter(|e| {
                e.location.as_deref().is_some_and(|l| {
                    starts_with_ignore_case(l, &comma_prefix)
                        || starts_with_ignore_case(l, &space_prefix)
                })
            })
            .cloned()
            .collect();
        sort_by_date_time(&mut events);
        Ok(events)
    }
}

/// In-memory fake for `RecommendationRepository`.
///
/// `failing()` builds a variant whose writes always error, for exercising
/// batch failure propagation.
#[derive(Default)]
pub struct InMemoryRecommendationRepository {
    rows: Mutex<HashMap<i64, Recommendation>>,
    fail_writes: bool,
}

impl InMemoryRecommendationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { rows: Mutex::new(HashMap::new()), fail_writes: true }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(CampusCalError::Database("simulated write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryRecommendationRepository {
    async fn replace(&self, recommendation: &Recommendation) -> Result<()> {
        self.check_writable()?;
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| CampusCalError::Internal("poisoned lock".to_string()))?;
        rows.insert(recommendation.event_id, recommendation.clone());
        Ok(())
    }

    async fn replace_batch(&self, recommendations: &[Recommendation]) -> Result<()> {
        self.check_writable()?;
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| CampusCalError::Internal("poisoned lock".to_string()))?;
        for recommendation in recommendations {
            rows.insert(recommendation.event_id, recommendation.clone());
        }
        Ok(())
    }

    async fn find_by_event(&self, event_id: i64) -> Result<Option<Recommendation>> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| CampusCalError::Internal("poisoned lock".to_string()))?;
        Ok(rows.get(&event_id).cloned())
    }

    async fn delete_by_event(&self, event_id: i64) -> Result<usize> {
        self.check_writable()?;
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| CampusCalError::Internal("poisoned lock".to_string()))?;
        Ok(usize::from(rows.remove(&event_id).is_some()))
    }
}
