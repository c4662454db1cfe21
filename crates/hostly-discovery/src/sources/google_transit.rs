//! Google Places nearby search restricted to transit stations.

use async_trait::async_trait;
use hostly_core::{ExternalSuggestion, GeoPoint, SourceSystem};

use super::google_places::{
    check_status, place_link, PlaceResult, PlacesResponse, API_KEY_VAR, DEFAULT_BASE_URL,
};
use super::{absorb, read_json, SourceAdapter};
use crate::error::ProviderError;

const PROVIDER: &str = "google_transit";
const SEARCH_RADIUS_METERS: u32 = 1_000;
const PLACE_TYPE: &str = "transit_station";
const MAX_RESULTS: usize = 3;

pub struct GoogleTransitAdapter {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GoogleTransitAdapter {
    #[must_use]
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn nearby_stations(
        &self,
        location: GeoPoint,
        hint: &str,
    ) -> Result<Vec<ExternalSuggestion>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey {
            provider: PROVIDER,
            var: API_KEY_VAR,
        })?;

        let response = self
            .client
            .get(format!("{}/nearbysearch/json", self.base_url))
            .query(&[
                ("location", location.to_string()),
                ("radius", SEARCH_RADIUS_METERS.to_string()),
                ("type", PLACE_TYPE.to_string()),
                ("key", api_key.to_string()),
            ])
            .send()
            .await?;

        let body: PlacesResponse = read_json(PROVIDER, response).await?;
        check_status(PROVIDER, &body)?;

        Ok(body
            .results
            .into_iter()
            .filter_map(|place| to_suggestion(place, hint))
            .take(MAX_RESULTS)
            .collect())
    }
}

fn to_suggestion(place: PlaceResult, hint: &str) -> Option<ExternalSuggestion> {
    let location = place.location();
    let place_id = place.place_id?;
    let title = place.name.filter(|n| !n.trim().is_empty())?;

    Some(ExternalSuggestion {
        title,
        description: "Transit Station".to_string(),
        address: place
            .vicinity
            .or(place.formatted_address)
            .unwrap_or_else(|| "Address not available".to_string()),
        map_link: place_link(&place_id),
        rating: place.rating,
        review_count: place.user_ratings_total,
        external_id: Some(place_id),
        source_system: SourceSystem::Google,
        raw_category_hint: hint.to_string(),
        location,
    })
}

#[async_trait]
impl SourceAdapter for GoogleTransitAdapter {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, location: GeoPoint, hint: &str) -> Vec<ExternalSuggestion> {
        absorb(PROVIDER, hint, self.nearby_stations(location, hint).await)
    }
}
