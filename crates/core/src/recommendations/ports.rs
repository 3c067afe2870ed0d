//! Port interfaces for persisting recommendations

use async_trait::async_trait;
use campuscal_domain::{Recommendation, Result};

/// Write/read side of the `event_recommendations` table, one row per event.
///
/// Writes use replace-on-write semantics: delete any existing row for the
/// event, then insert the new one, inside a single transaction so no
/// observable gap or stale partial field can survive.
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Replace the recommendation row for one event.
    async fn replace(&self, recommendation: &Recommendation) -> Result<()>;

    /// Replace the rows for a whole batch inside one transaction.
    /// All-or-nothing: a failure partway through must leave previously
    /// committed state untouched.
    async fn replace_batch(&self, recommendations: &[Recommendation]) -> Result<()>;

    /// Fetch the stored recommendation for an event, if any.
    async fn find_by_event(&self, event_id: i64) -> Result<Option<Recommendation>>;

    /// Delete the row for an event, returning how many rows went away.
    async fn delete_by_event(&self, event_id: i64) -> Result<usize>;
}
