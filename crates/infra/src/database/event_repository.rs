//! SQLite-backed implementation of the EventRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use campuscal_common::SqlitePool;
use campuscal_core::conflicts::ports::EventRepository;
use campuscal_domain::constants::BUILDING_LOCATION_PREFIX;
use campuscal_domain::{Event, Result};
use chrono::NaiveDate;
use rusqlite::{OptionalExtension, Row, ToSql};
use tracing::{debug, instrument};

use crate::errors::InfraError;

const EVENT_COLUMNS: &str = "id, title, date, time, location";

/// SQLite implementation of EventRepository
pub struct SqliteEventRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteEventRepository {
    /// Create a new event repository over the shared pool
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    fn query_events(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Event>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let mut stmt = conn.prepare(sql).map_err(InfraError::from)?;
        let rows = stmt
            .query_map(params, map_event_row)
            .map_err(InfraError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(InfraError::from)?;

        Ok(rows)
    }
}

fn map_event_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    // The scraper can leave date NULL; an empty date is simply unparseable
    // downstream, which drops the event from analysis without failing the row.
    let date: Option<String> = row.get(2)?;
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        date: date.unwrap_or_default(),
        time: row.get(3)?,
        location: row.get(4)?,
    })
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    #[instrument(skip(self))]
    async fn find_event_by_id(&self, id: i64) -> Result<Option<Event>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let event = conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                [id],
                map_event_row,
            )
            .optional()
            .map_err(InfraError::from)?;

        Ok(event)
    }

    #[instrument(skip(self))]
    async fn find_upcoming_events(&self, from: NaiveDate) -> Result<Vec<Event>> {
        let from = from.format("%Y-%m-%d").to_string();
        let events = self.query_events(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE date >= ?1
                 ORDER BY date, time"
            ),
            &[&from],
        )?;

        debug!(from = %from, count = events.len(), "fetched upcoming events");
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn find_upcoming_with_location(&self, from: NaiveDate) -> Result<Vec<Event>> {
        let from = from.format("%Y-%m-%d").to_string();
        self.query_events(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE location IS NOT NULL
                 AND location != ''
                 AND date >= ?1
                 ORDER BY location, date, time"
            ),
            &[&from],
        )
    }

    #[instrument(skip(self))]
    async fn find_upcoming_in_buildings(&self, from: NaiveDate) -> Result<Vec<Event>> {
        let from = from.format("%Y-%m-%d").to_string();
        let prefix = format!("{BUILDING_LOCATION_PREFIX}%");
        self.query_events(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE location LIKE ?1
                 AND date >= ?2
                 ORDER BY date, time"
            ),
            &[&prefix, &from],
        )
    }

    #[instrument(skip(self))]
    async fn find_bookings_for_location(&self, location: &str, date: &str) -> Result<Vec<Event>> {
        let pattern = format!("%{location}%");
        self.query_events(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE location LIKE ?1
                 AND date = ?2
                 ORDER BY time"
            ),
            &[&pattern, &date],
        )
    }

    #[instrument(skip(self))]
    async fn find_building_bookings(&self, building: &str, date: &str) -> Result<Vec<Event>> {
        let comma_pattern = format!("{building},%");
        let space_pattern = format!("{building} %");
        self.query_events(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE date = ?1
                 AND (location LIKE ?2 OR location LIKE ?3)
                 ORDER BY time"
            ),
            &[&date, &comma_pattern, &space_pattern],
        )
    }
}
