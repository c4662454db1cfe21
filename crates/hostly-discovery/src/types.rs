use hostly_core::{AppConfig, GeoPoint, ResolvedSuggestion};

use crate::error::DiscoveryError;

/// The slice of a property record discovery needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRef {
    pub id: i64,
    pub location: Option<GeoPoint>,
}

impl PropertyRef {
    /// Build from nullable stored coordinates.
    ///
    /// A missing latitude or longitude yields `location: None`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidCoordinates`] if both are present but
    /// out of range.
    pub fn from_coordinates(
        id: i64,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, DiscoveryError> {
        let location = match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng).map_err(|source| {
                DiscoveryError::InvalidCoordinates {
                    property_id: id,
                    source,
                }
            })?),
            _ => None,
        };
        Ok(Self { id, location })
    }
}

/// Outcome of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    /// Suggestions newly persisted in this run.
    pub added_count: usize,
    /// The persisted suggestions, in merge order.
    pub suggestions: Vec<ResolvedSuggestion>,
}

/// Provider credentials and tuning for discovery.
#[derive(Clone)]
pub struct DiscoveryConfig {
    pub google_maps_api_key: Option<String>,
    pub foursquare_api_key: Option<String>,
    pub overpass_url: String,
    pub provider_timeout_secs: u64,
    pub user_agent: String,
}

impl DiscoveryConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            google_maps_api_key: config.google_maps_api_key.clone(),
            foursquare_api_key: config.foursquare_api_key.clone(),
            overpass_url: config.overpass_url.clone(),
            provider_timeout_secs: config.provider_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl std::fmt::Debug for DiscoveryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryConfig")
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "foursquare_api_key",
                &self.foursquare_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("overpass_url", &self.overpass_url)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
