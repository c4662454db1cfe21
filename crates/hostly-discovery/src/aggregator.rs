//! Suggestion aggregation: fan out to every adapter, merge, dedup, persist.

use std::collections::HashMap;

use futures::future::join_all;
use hostly_core::{resolve_category, CanonicalCategory, ExternalSuggestion, ResolvedSuggestion};

use crate::error::DiscoveryError;
use crate::sources::AdapterRegistry;
use crate::store::SuggestionStore;
use crate::types::{AggregationResult, PropertyRef};

pub struct SuggestionAggregator<S> {
    registry: AdapterRegistry,
    store: S,
}

impl<S: SuggestionStore> SuggestionAggregator<S> {
    #[must_use]
    pub fn new(registry: AdapterRegistry, store: S) -> Self {
        Self { registry, store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Populate recommendations for one property.
    ///
    /// 1. Require coordinates; nothing is fetched without them.
    /// 2. Run every registered adapter concurrently and wait for all of them.
    /// 3. Flatten in registration order, then within-adapter order.
    /// 4. Skip candidates whose `(source, external id)` is already stored for
    ///    this property.
    /// 5. Resolve the category, ensure its record exists, insert.
    ///
    /// Adapter failures are already empty lists by the time they get here.
    /// A failed dedup lookup or insert skips that one item.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::MissingCoordinates`] if the property has no
    /// location, or [`DiscoveryError::Store`] if a category record cannot be
    /// ensured.
    pub async fn gather(&self, property: &PropertyRef) -> Result<AggregationResult, DiscoveryError> {
        let location = property
            .location
            .ok_or(DiscoveryError::MissingCoordinates {
                property_id: property.id,
            })?;

        tracing::info!(
            property_id = property.id,
            adapters = self.registry.len(),
            %location,
            "gathering suggestions"
        );

        let batches = join_all(
            self.registry
                .iter()
                .map(|entry| entry.adapter.search(location, &entry.hint)),
        )
        .await;
        let candidates: Vec<ExternalSuggestion> = batches.into_iter().flatten().collect();

        let mut result = AggregationResult::default();
        let mut category_ids: HashMap<CanonicalCategory, i64> = HashMap::new();
        let mut skipped = 0usize;
        let mut failed = 0usize;
        let candidate_count = candidates.len();

        for candidate in candidates {
            if let Some(external_id) = candidate.dedup_key() {
                match self
                    .store
                    .find_suggestion_by_external_id(
                        property.id,
                        candidate.source_system,
                        external_id,
                    )
                    .await
                {
                    Ok(Some(existing_id)) => {
                        tracing::debug!(
                            property_id = property.id,
                            source = %candidate.source_system,
                            external_id,
                            existing_id,
                            "suggestion already stored, skipping"
                        );
                        skipped += 1;
                        continue;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(
                            property_id = property.id,
                            source = %candidate.source_system,
                            external_id,
                            error = %e,
                            "dedup lookup failed, skipping suggestion"
                        );
                        failed += 1;
                        continue;
                    }
                }
            }

            let category = resolve_category(&candidate.raw_category_hint);
            let category_id = match category_ids.get(&category) {
                Some(id) => *id,
                None => {
                    // Fatal: every later insert in this category depends on it.
                    let id = self.store.ensure_category(property.id, category).await?;
                    category_ids.insert(category, id);
                    id
                }
            };

            let resolved = ResolvedSuggestion {
                suggestion: candidate,
                category,
            };

            match self
                .store
                .insert_suggestion(property.id, category_id, &resolved)
                .await
            {
                Ok(_) => {
                    result.added_count += 1;
                    result.suggestions.push(resolved);
                }
                Err(e) => {
                    tracing::warn!(
                        property_id = property.id,
                        title = %resolved.suggestion.title,
                        source = %resolved.suggestion.source_system,
                        error = %e,
                        "failed to persist suggestion"
                    );
                    failed += 1;
                }
            }
        }

        tracing::info!(
            property_id = property.id,
            candidates = candidate_count,
            added = result.added_count,
            skipped,
            failed,
            "suggestion gathering complete"
        );

        Ok(result)
    }
}
