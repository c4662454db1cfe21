//! `populate` command: run the suggestion aggregator for one property.

use hostly_core::{AppConfig, CanonicalCategory};
use hostly_db::PgStore;
use hostly_discovery::{AdapterRegistry, DiscoveryConfig, SuggestionAggregator};

use crate::load_property;

/// # Errors
///
/// Returns an error if the property is missing or has no coordinates, the
/// HTTP client cannot be built, the category filter leaves no sources, or a
/// category record cannot be written.
pub(crate) async fn run_populate(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    property_id: i64,
    category: Option<CanonicalCategory>,
) -> anyhow::Result<()> {
    let property = load_property(pool, property_id).await?;

    let discovery_config = DiscoveryConfig::from_app_config(config);
    tracing::debug!(config = ?discovery_config, "discovery configuration");

    let mut registry = AdapterRegistry::with_defaults(&discovery_config)?;
    if let Some(category) = category {
        registry = registry.only_category(category);
        if registry.is_empty() {
            anyhow::bail!("no discovery source covers category '{category}'");
        }
    }

    let aggregator = SuggestionAggregator::new(registry, PgStore::new(pool.clone()));
    let result = aggregator.gather(&property).await?;

    println!(
        "added {} recommendation(s) for property {property_id}",
        result.added_count
    );
    for resolved in &result.suggestions {
        let s = &resolved.suggestion;
        println!(
            "  [{}] {} ({}) {}",
            resolved.category, s.title, s.source_system, s.address
        );
    }

    Ok(())
}
