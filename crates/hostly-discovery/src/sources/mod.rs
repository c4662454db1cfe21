//! Place-search source adapters.
//!
//! Every adapter is a total function from `(location, hint)` to a possibly
//! empty list: provider failures are logged here and never reach the
//! aggregator.

mod foursquare;
mod google_places;
mod google_transit;
mod overpass;

pub use foursquare::FoursquareAdapter;
pub use google_places::GooglePlacesAdapter;
pub use google_transit::GoogleTransitAdapter;
pub use overpass::OverpassAdapter;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hostly_core::{resolve_category, CanonicalCategory, ExternalSuggestion, GeoPoint};

use crate::error::{DiscoveryError, ProviderError};
use crate::types::DiscoveryConfig;

/// Uniform contract for one external place-search provider.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Short provider label used in logs.
    fn name(&self) -> &'static str;

    /// Search around `location`. Must not fail: errors become an empty list.
    async fn search(&self, location: GeoPoint, hint: &str) -> Vec<ExternalSuggestion>;
}

/// An adapter paired with the query hint it is invoked with.
#[derive(Clone)]
pub struct RegisteredAdapter {
    pub adapter: Arc<dyn SourceAdapter>,
    pub hint: String,
}

impl std::fmt::Debug for RegisteredAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredAdapter")
            .field("adapter", &self.adapter.name())
            .field("hint", &self.hint)
            .finish()
    }
}

/// Ordered set of adapters. Registration order is merge order.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    entries: Vec<RegisteredAdapter>,
}

impl AdapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, adapter: Arc<dyn SourceAdapter>, hint: impl Into<String>) -> Self {
        self.register(adapter, hint);
        self
    }

    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>, hint: impl Into<String>) {
        self.entries.push(RegisteredAdapter {
            adapter,
            hint: hint.into(),
        });
    }

    /// The standard provider line-up.
    ///
    /// Adapters without credentials are still registered; they log and
    /// return nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::HttpClient`] if the shared HTTP client
    /// cannot be built.
    pub fn with_defaults(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let client = build_http_client(config)?;

        let places: Arc<dyn SourceAdapter> = Arc::new(GooglePlacesAdapter::new(
            client.clone(),
            config.google_maps_api_key.clone(),
        ));
        let transit: Arc<dyn SourceAdapter> = Arc::new(GoogleTransitAdapter::new(
            client.clone(),
            config.google_maps_api_key.clone(),
        ));
        let overpass: Arc<dyn SourceAdapter> = Arc::new(OverpassAdapter::new(
            client.clone(),
            config.overpass_url.clone(),
        ));
        let foursquare: Arc<dyn SourceAdapter> = Arc::new(FoursquareAdapter::new(
            client,
            config.foursquare_api_key.clone(),
        ));

        Ok(Self::new()
            .with(Arc::clone(&places), "restaurants")
            .with(Arc::clone(&places), "supermarket")
            .with(places, "tourist attraction")
            .with(transit, "transit station")
            .with(overpass, "outdoors")
            .with(foursquare, "brewery bar pub"))
    }

    /// Keep only adapters whose hint resolves to `category`.
    #[must_use]
    pub fn only_category(self, category: CanonicalCategory) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .filter(|entry| resolve_category(&entry.hint) == category)
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAdapter> {
        self.entries.iter()
    }
}

/// Build the HTTP client shared by all adapters.
///
/// The configured timeout bounds every outbound call; an expired timeout
/// surfaces as [`ProviderError::Http`] and is absorbed like any other failure.
///
/// # Errors
///
/// Returns [`reqwest::Error`] if the client cannot be constructed.
pub fn build_http_client(config: &DiscoveryConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .connect_timeout(Duration::from_secs(config.provider_timeout_secs.min(10)))
        .user_agent(&config.user_agent)
        .build()
}

/// Convert an adapter-internal result into the never-fails contract.
fn absorb(
    provider: &'static str,
    hint: &str,
    result: Result<Vec<ExternalSuggestion>, ProviderError>,
) -> Vec<ExternalSuggestion> {
    match result {
        Ok(suggestions) => {
            tracing::debug!(
                source = provider,
                hint,
                count = suggestions.len(),
                "collected suggestions"
            );
            suggestions
        }
        Err(e) => {
            tracing::warn!(source = provider, hint, error = %e, "source search failed");
            Vec::new()
        }
    }
}

/// Read a successful JSON body, mapping status and decode failures.
async fn read_json<T: serde::de::DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::UnexpectedStatus {
            provider,
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| ProviderError::Deserialize { provider, source })
}
