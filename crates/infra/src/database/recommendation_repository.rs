//! SQLite-backed implementation of the RecommendationRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use campuscal_common::SqlitePool;
use campuscal_core::recommendations::ports::RecommendationRepository;
use campuscal_domain::{CampusCalError, ConflictType, Recommendation, Result, Severity};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row, Transaction};
use tracing::{debug, instrument};

use crate::errors::InfraError;

const INSERT_SQL: &str = "INSERT INTO event_recommendations
    (event_id, has_conflicts, conflict_type, severity, recommended_action,
     alternative_times, details, generated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

/// SQLite implementation of RecommendationRepository
pub struct SqliteRecommendationRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteRecommendationRepository {
    /// Create a new recommendation repository over the shared pool
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    fn replace_in_tx(tx: &Transaction<'_>, recommendation: &Recommendation) -> Result<()> {
        tx.execute(
            "DELETE FROM event_recommendations WHERE event_id = ?1",
            [recommendation.event_id],
        )
        .map_err(InfraError::from)?;

        let alternative_times = if recommendation.alternative_times.is_empty() {
            None
        } else {
            Some(recommendation.alternative_times.join(", "))
        };

        tx.execute(
            INSERT_SQL,
            params![
                recommendation.event_id,
                recommendation.has_conflicts,
                recommendation.conflict_type.map(ConflictType::as_str),
                recommendation.severity.as_str(),
                recommendation.recommended_action,
                alternative_times,
                recommendation.details,
                recommendation.generated_at.timestamp(),
            ],
        )
        .map_err(InfraError::from)?;

        Ok(())
    }
}

fn map_recommendation_row(row: &Row<'_>) -> rusqlite::Result<RecommendationRow> {
    Ok(RecommendationRow {
        event_id: row.get(0)?,
        has_conflicts: row.get(1)?,
        conflict_type: row.get(2)?,
        severity: row.get(3)?,
        recommended_action: row.get(4)?,
        alternative_times: row.get(5)?,
        details: row.get(6)?,
        generated_at: row.get(7)?,
    })
}

/// Raw column values before text fields are parsed back into enums.
struct RecommendationRow {
    event_id: i64,
    has_conflicts: bool,
    conflict_type: Option<String>,
    severity: String,
    recommended_action: Option<String>,
    alternative_times: Option<String>,
    details: Option<String>,
    generated_at: i64,
}

impl RecommendationRow {
    fn into_recommendation(self) -> Result<Recommendation> {
        let conflict_type = self
            .conflict_type
            .as_deref()
            .map(str::parse::<ConflictType>)
            .transpose()?;

        let generated_at = DateTime::<Utc>::from_timestamp(self.generated_at, 0)
            .ok_or_else(|| {
                CampusCalError::Internal(format!(
                    "invalid generated_at timestamp: {}",
                    self.generated_at
                ))
            })?;

        let alternative_times = self
            .alternative_times
            .map(|joined| joined.split(", ").map(str::to_owned).collect())
            .unwrap_or_default();

        Ok(Recommendation {
            event_id: self.event_id,
            has_conflicts: self.has_conflicts,
            conflict_type,
            severity: self.severity.parse::<Severity>()?,
            recommended_action: self.recommended_action,
            alternative_times,
            details: self.details,
            generated_at,
        })
    }
}

#[async_trait]
impl RecommendationRepository for SqliteRecommendationRepository {
    #[instrument(skip(self, recommendation), fields(event_id = recommendation.event_id))]
    async fn replace(&self, recommendation: &Recommendation) -> Result<()> {
        let mut conn = self.pool.get().map_err(InfraError::from)?;
        let tx = conn.transaction().map_err(InfraError::from)?;

        Self::replace_in_tx(&tx, recommendation)?;
        tx.commit().map_err(InfraError::from)?;

        Ok(())
    }

    #[instrument(skip(self, recommendations), fields(count = recommendations.len()))]
    async fn replace_batch(&self, recommendations: &[Recommendation]) -> Result<()> {
        let mut conn = self.pool.get().map_err(InfraError::from)?;
        let tx = conn.transaction().map_err(InfraError::from)?;

        for recommendation in recommendations {
            Self::replace_in_tx(&tx, recommendation)?;
        }
        tx.commit().map_err(InfraError::from)?;

        debug!(count = recommendations.len(), "replaced recommendation batch");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: i64) -> Result<Option<Recommendation>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let row = conn
            .query_row(
                "SELECT event_id, has_conflicts, conflict_type, severity,
                        recommended_action, alternative_times, details, generated_at
                 FROM event_recommendations WHERE event_id = ?1",
                [event_id],
                map_recommendation_row,
            )
            .optional()
            .map_err(InfraError::from)?;

        row.map(RecommendationRow::into_recommendation).transpose()
    }

    #[instrument(skip(self))]
    async fn delete_by_event(&self, event_id: i64) -> Result<usize> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let deleted = conn
            .execute("DELETE FROM event_recommendations WHERE event_id = ?1", [event_id])
            .map_err(InfraError::from)?;

        Ok(deleted)
    }
}
