//! Google Places text search, filtered to well-rated places.

use async_trait::async_trait;
use hostly_core::{ExternalSuggestion, GeoPoint, SourceSystem};
use serde::Deserialize;

use super::{absorb, read_json, SourceAdapter};
use crate::error::ProviderError;

pub(super) const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub(super) const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

const PROVIDER: &str = "google_places";
const SEARCH_RADIUS_METERS: u32 = 10_000;
const MIN_RATING: f64 = 4.0;
const MAX_RESULTS: usize = 5;

#[derive(Debug, Deserialize)]
pub(super) struct PlacesResponse {
    pub(super) status: String,
    #[serde(default)]
    pub(super) results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlaceResult {
    pub(super) place_id: Option<String>,
    pub(super) name: Option<String>,
    pub(super) formatted_address: Option<String>,
    pub(super) vicinity: Option<String>,
    pub(super) rating: Option<f64>,
    pub(super) user_ratings_total: Option<i64>,
    pub(super) geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Geometry {
    pub(super) location: LatLng,
}

#[derive(Debug, Deserialize)]
pub(super) struct LatLng {
    pub(super) lat: f64,
    pub(super) lng: f64,
}

impl PlaceResult {
    pub(super) fn location(&self) -> Option<GeoPoint> {
        self.geometry
            .as_ref()
            .and_then(|g| GeoPoint::new(g.location.lat, g.location.lng).ok())
    }
}

/// `OK` and `ZERO_RESULTS` are the only non-error statuses.
pub(super) fn check_status(
    provider: &'static str,
    response: &PlacesResponse,
) -> Result<(), ProviderError> {
    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(ProviderError::ProviderStatus {
            provider,
            status: other.to_string(),
        }),
    }
}

pub(super) fn place_link(place_id: &str) -> String {
    format!("https://www.google.com/maps/place/?q=place_id:{place_id}")
}

pub struct GooglePlacesAdapter {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GooglePlacesAdapter {
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

    async fn text_search(
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
            .get(format!("{}/textsearch/json", self.base_url))
            .query(&[
                ("query", hint.to_string()),
                ("location", location.to_string()),
                ("radius", SEARCH_RADIUS_METERS.to_string()),
                ("key", api_key.to_string()),
            ])
            .send()
            .await?;

        let body: PlacesResponse = read_json(PROVIDER, response).await?;
        check_status(PROVIDER, &body)?;

        // Provider order is kept; no re-sort by rating.
        let suggestions = body
            .results
            .into_iter()
            .filter(|place| place.rating.unwrap_or(0.0) >= MIN_RATING)
            .filter_map(|place| to_suggestion(place, hint))
            .take(MAX_RESULTS)
            .collect();

        Ok(suggestions)
    }
}

fn to_suggestion(place: PlaceResult, hint: &str) -> Option<ExternalSuggestion> {
    let location = place.location();
    let place_id = place.place_id?;
    let title = place.name.filter(|n| !n.trim().is_empty())?;
    let rating = place.rating.unwrap_or(0.0);
    let reviews = place.user_ratings_total.unwrap_or(0);

    Some(ExternalSuggestion {
        title,
        description: format!("Rated {rating} ({reviews} reviews)"),
        address: place
            .formatted_address
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
impl SourceAdapter for GooglePlacesAdapter {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, location: GeoPoint, hint: &str) -> Vec<ExternalSuggestion> {
        absorb(PROVIDER, hint, self.text_search(location, hint).await)
    }
}
