//! Persistence ports consumed by the aggregator and the transit matcher.

use std::sync::Arc;

use async_trait::async_trait;
use hostly_core::{CanonicalCategory, ResolvedSuggestion, SourceSystem, TransitLine, TransitStop};

use crate::error::StoreError;

#[async_trait]
pub trait SuggestionStore: Send + Sync {
    /// Id of an already-persisted suggestion for this property with the same
    /// provider identity, if any.
    async fn find_suggestion_by_external_id(
        &self,
        property_id: i64,
        source: SourceSystem,
        external_id: &str,
    ) -> Result<Option<i64>, StoreError>;

    /// Id of the property's category record, created if absent.
    async fn ensure_category(
        &self,
        property_id: i64,
        category: CanonicalCategory,
    ) -> Result<i64, StoreError>;

    async fn insert_suggestion(
        &self,
        property_id: i64,
        category_id: i64,
        suggestion: &ResolvedSuggestion,
    ) -> Result<i64, StoreError>;
}

/// Read-only view of the transit dataset.
#[async_trait]
pub trait TransitStore: Send + Sync {
    async fn find_stops_all(&self) -> Result<Vec<TransitStop>, StoreError>;

    async fn find_lines_for_stop(&self, stop_id: i64) -> Result<Vec<TransitLine>, StoreError>;
}

#[async_trait]
impl<T: SuggestionStore + ?Sized> SuggestionStore for Arc<T> {
    async fn find_suggestion_by_external_id(
        &self,
        property_id: i64,
        source: SourceSystem,
        external_id: &str,
    ) -> Result<Option<i64>, StoreError> {
        (**self)
            .find_suggestion_by_external_id(property_id, source, external_id)
            .await
    }

    async fn ensure_category(
        &self,
        property_id: i64,
        category: CanonicalCategory,
    ) -> Result<i64, StoreError> {
        (**self).ensure_category(property_id, category).await
    }

    async fn insert_suggestion(
        &self,
        property_id: i64,
        category_id: i64,
        suggestion: &ResolvedSuggestion,
    ) -> Result<i64, StoreError> {
        (**self)
            .insert_suggestion(property_id, category_id, suggestion)
            .await
    }
}

#[async_trait]
impl<T: TransitStore + ?Sized> TransitStore for Arc<T> {
    async fn find_stops_all(&self) -> Result<Vec<TransitStop>, StoreError> {
        (**self).find_stops_all().await
    }

    async fn find_lines_for_stop(&self, stop_id: i64) -> Result<Vec<TransitLine>, StoreError> {
        (**self).find_lines_for_stop(stop_id).await
    }
}
