//! Foursquare Places v3 search, ranked by popularity.

use async_trait::async_trait;
use hostly_core::{ExternalSuggestion, GeoPoint, SourceSystem};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use super::{absorb, read_json, SourceAdapter};
use crate::error::ProviderError;

const PROVIDER: &str = "foursquare";
const API_KEY_VAR: &str = "FOURSQUARE_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.foursquare.com/v3";
const RESULT_LIMIT: &str = "8";
const FIELDS: &str = "fsq_id,name,location,rating,stats,link,categories,geocodes";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<FsqPlace>,
}

#[derive(Debug, Deserialize)]
struct FsqPlace {
    fsq_id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    location: FsqLocation,
    /// 0-10 scale.
    rating: Option<f64>,
    stats: Option<FsqStats>,
    #[serde(default)]
    categories: Vec<FsqCategory>,
    geocodes: Option<FsqGeocodes>,
}

#[derive(Debug, Default, Deserialize)]
struct FsqLocation {
    formatted_address: Option<String>,
    address: Option<String>,
    locality: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FsqStats {
    total_ratings: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct FsqCategory {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FsqGeocodes {
    main: Option<FsqPoint>,
}

#[derive(Debug, Deserialize)]
struct FsqPoint {
    latitude: f64,
    longitude: f64,
}

pub struct FoursquareAdapter {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl FoursquareAdapter {
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

    async fn place_search(
        &self,
        location: GeoPoint,
        hint: &str,
    ) -> Result<Vec<ExternalSuggestion>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey {
            provider: PROVIDER,
            var: API_KEY_VAR,
        })?;

        let ll = location.to_string();
        // Popularity sort with open_now=false keeps well-known places that
        // happen to be closed at query time.
        let response = self
            .client
            .get(format!("{}/places/search", self.base_url))
            .header(reqwest::header::AUTHORIZATION, api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("ll", ll.as_str()),
                ("query", hint),
                ("sort", "POPULARITY"),
                ("limit", RESULT_LIMIT),
                ("fields", FIELDS),
                ("open_now", "false"),
            ])
            .send()
            .await?;

        let body: SearchResponse = read_json(PROVIDER, response).await?;

        Ok(body
            .results
            .into_iter()
            .filter_map(|place| to_suggestion(place, hint))
            .collect())
    }
}

fn to_suggestion(place: FsqPlace, hint: &str) -> Option<ExternalSuggestion> {
    let title = place.name.filter(|n| !n.trim().is_empty())?;

    let search_terms = match place.location.locality.as_deref() {
        Some(locality) => format!("{title} {locality}"),
        None => title.clone(),
    };
    let map_link = format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        utf8_percent_encode(&search_terms, NON_ALPHANUMERIC)
    );

    // Provider category label feeds the resolver when present.
    let category_name = place.categories.into_iter().next().map(|c| c.name);
    let raw_category_hint = category_name.clone().unwrap_or_else(|| hint.to_string());
    let description = category_name.unwrap_or_else(|| "Popular place".to_string());

    let address = place
        .location
        .formatted_address
        .or(place.location.address)
        .unwrap_or_else(|| "Address not available".to_string());

    let location = place
        .geocodes
        .and_then(|g| g.main)
        .and_then(|p| GeoPoint::new(p.latitude, p.longitude).ok());

    Some(ExternalSuggestion {
        title,
        description,
        address,
        map_link,
        rating: place.rating.map(|r| r / 2.0),
        review_count: Some(place.stats.and_then(|s| s.total_ratings).unwrap_or(0)),
        external_id: place.fsq_id,
        source_system: SourceSystem::Foursquare,
        raw_category_hint,
        location,
    })
}

#[async_trait]
impl SourceAdapter for FoursquareAdapter {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, location: GeoPoint, hint: &str) -> Vec<ExternalSuggestion> {
        absorb(PROVIDER, hint, self.place_search(location, hint).await)
    }
}
