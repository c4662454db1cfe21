//! Postgres-backed implementation of the discovery persistence ports.

use async_trait::async_trait;
use hostly_core::{CanonicalCategory, ResolvedSuggestion, SourceSystem, TransitLine, TransitStop};
use hostly_discovery::{StoreError, SuggestionStore, TransitStore};
use sqlx::PgPool;

use crate::{categories, recommendations, transit};

/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuggestionStore for PgStore {
    async fn find_suggestion_by_external_id(
        &self,
        property_id: i64,
        source: SourceSystem,
        external_id: &str,
    ) -> Result<Option<i64>, StoreError> {
        recommendations::find_recommendation_by_external_id(
            &self.pool,
            property_id,
            source,
            external_id,
        )
        .await
        .map_err(|e| StoreError::backend("find_suggestion_by_external_id", e))
    }

    async fn ensure_category(
        &self,
        property_id: i64,
        category: CanonicalCategory,
    ) -> Result<i64, StoreError> {
        categories::ensure_category(&self.pool, property_id, category)
            .await
            .map_err(|e| StoreError::backend("ensure_category", e))
    }

    async fn insert_suggestion(
        &self,
        property_id: i64,
        category_id: i64,
        suggestion: &ResolvedSuggestion,
    ) -> Result<i64, StoreError> {
        recommendations::insert_recommendation(&self.pool, property_id, category_id, suggestion)
            .await
            .map_err(|e| StoreError::backend("insert_suggestion", e))
    }
}

#[async_trait]
impl TransitStore for PgStore {
    async fn find_stops_all(&self) -> Result<Vec<TransitStop>, StoreError> {
        let rows = transit::list_bus_stops(&self.pool)
            .await
            .map_err(|e| StoreError::backend("find_stops_all", e))?;

        rows.into_iter()
            .map(|row| {
                row.into_stop()
                    .map_err(|e| StoreError::backend("find_stops_all", e))
            })
            .collect()
    }

    async fn find_lines_for_stop(&self, stop_id: i64) -> Result<Vec<TransitLine>, StoreError> {
        let rows = transit::list_lines_for_stop(&self.pool, stop_id)
            .await
            .map_err(|e| StoreError::backend("find_lines_for_stop", e))?;

        Ok(rows.into_iter().map(TransitLine::from).collect())
    }
}
