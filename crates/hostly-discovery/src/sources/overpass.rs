//! OpenStreetMap search through an Overpass API interpreter.

use std::collections::HashMap;

use async_trait::async_trait;
use hostly_core::{resolve_category, CanonicalCategory, ExternalSuggestion, GeoPoint, SourceSystem};
use serde::Deserialize;

use super::{absorb, read_json, SourceAdapter};
use crate::error::ProviderError;

const PROVIDER: &str = "overpass";
const DEFAULT_RADIUS_METERS: u32 = 1_000;
const OUTDOORS_RADIUS_METERS: u32 = 5_000;
/// Also sent as the `out` limit; enforced locally because mirrors may not.
const MAX_RESULTS: usize = 10;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Center>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    /// Nodes carry their own coordinates; ways and relations a `center`.
    fn location(&self) -> Option<GeoPoint> {
        let (lat, lon) = match (self.lat, self.lon, self.center.as_ref()) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        GeoPoint::new(lat, lon).ok()
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

pub struct OverpassAdapter {
    client: reqwest::Client,
    endpoint: String,
}

impl OverpassAdapter {
    #[must_use]
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    async fn query(
        &self,
        location: GeoPoint,
        hint: &str,
    ) -> Result<Vec<ExternalSuggestion>, ProviderError> {
        let query = build_query(resolve_category(hint), location);
        tracing::trace!(source = PROVIDER, %query, "overpass query");

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query)])
            .send()
            .await?;

        let body: OverpassResponse = read_json(PROVIDER, response).await?;

        Ok(body
            .elements
            .into_iter()
            .filter_map(|element| to_suggestion(&element, hint))
            .take(MAX_RESULTS)
            .collect())
    }
}

/// Tag filter for a single-selector query, by resolved category.
fn tag_filter(category: CanonicalCategory) -> &'static str {
    match category {
        CanonicalCategory::Restaurants => r#"["amenity"="restaurant"]"#,
        CanonicalCategory::Sights => r#"["tourism"~"museum|attraction|viewpoint|artwork"]"#,
        CanonicalCategory::Shopping => r#"["shop"]"#,
        CanonicalCategory::Kids => r#"["leisure"~"playground|water_park|park"]["name"]"#,
        CanonicalCategory::Nightlife => r#"["amenity"~"bar|pub|biergarten|nightclub"]"#,
        CanonicalCategory::Pharmacy => r#"["amenity"="pharmacy"]"#,
        CanonicalCategory::Transport => r#"["highway"="bus_stop"]["name"]"#,
        CanonicalCategory::Outdoors | CanonicalCategory::Other => r#"["tourism"]"#,
    }
}

fn build_query(category: CanonicalCategory, location: GeoPoint) -> String {
    let GeoPoint {
        latitude: lat,
        longitude: lon,
    } = location;

    let body = if category == CanonicalCategory::Outdoors {
        let around = format!("(around:{OUTDOORS_RADIUS_METERS},{lat},{lon})");
        [
            r#"node["highway"~"path|footway|track"]["name"]"#,
            r#"way["highway"~"path|footway|track"]["name"]"#,
            r#"relation["route"="hiking"]["name"]"#,
            r#"node["tourism"~"alpine_hut|wilderness_hut"]"#,
            r#"node["natural"="peak"]["name"]"#,
            r#"node["tourism"="attraction"]"#,
        ]
        .iter()
        .map(|selector| format!("{selector}{around};"))
        .collect::<String>()
    } else {
        let around = format!("(around:{DEFAULT_RADIUS_METERS},{lat},{lon})");
        let filter = tag_filter(category);
        format!("node{filter}{around};way{filter}{around};")
    };

    format!("[out:json][timeout:90];({body});out center {MAX_RESULTS};")
}

fn to_suggestion(element: &OverpassElement, hint: &str) -> Option<ExternalSuggestion> {
    let title = element.tag("name")?.to_string();
    let location = element.location();

    let address = match element.tag("addr:street") {
        Some(street) => match element.tag("addr:housenumber") {
            Some(number) => format!("{street} {number}"),
            None => street.to_string(),
        },
        None => "Address not available".to_string(),
    };

    let description = if let Some(tourism) = element.tag("tourism") {
        format!("Tourism: {tourism}")
    } else if let Some(natural) = element.tag("natural") {
        format!("Nature: {natural}")
    } else {
        "Found via OpenStreetMap".to_string()
    };

    let map_link = match location {
        Some(point) => format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            point.latitude, point.longitude
        ),
        None => format!(
            "https://www.openstreetmap.org/{}/{}",
            element.kind, element.id
        ),
    };

    Some(ExternalSuggestion {
        title,
        description,
        address,
        map_link,
        rating: None,
        review_count: None,
        external_id: Some(format!("{}/{}", element.kind, element.id)),
        source_system: SourceSystem::OpenStreetMap,
        raw_category_hint: hint.to_string(),
        location,
    })
}

#[async_trait]
impl SourceAdapter for OverpassAdapter {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, location: GeoPoint, hint: &str) -> Vec<ExternalSuggestion> {
        absorb(PROVIDER, hint, self.query(location, hint).await)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn bariloche() -> GeoPoint {
        GeoPoint::new(-41.1335, -71.3103).unwrap()
    }

    fn adapter(server: &MockServer) -> OverpassAdapter {
        adapter_with_timeout(server, Duration::from_secs(5))
    }

    fn adapter_with_timeout(server: &MockServer, timeout: Duration) -> OverpassAdapter {
        let client = reqwest::Client::builder().timeout(timeout).build().unwrap();
        OverpassAdapter::new(client, format!("{}/api/interpreter", server.uri()))
    }

    // -----------------------------------------------------------------------
    // Query construction
    // -----------------------------------------------------------------------

    #[test]
    fn restaurant_query_uses_amenity_filter_and_default_radius() {
        let query = build_query(CanonicalCategory::Restaurants, bariloche());
        assert!(query.starts_with("[out:json][timeout:90];("));
        assert!(query.contains(r#"node["amenity"="restaurant"](around:1000,-41.1335,-71.3103);"#));
        assert!(query.contains(r#"way["amenity"="restaurant"](around:1000,-41.1335,-71.3103);"#));
        assert!(query.ends_with(");out center 10;"));
    }

    #[test]
    fn outdoors_query_is_a_wide_union() {
        let query = build_query(CanonicalCategory::Outdoors, bariloche());
        assert!(query.contains(r#"relation["route"="hiking"]["name"](around:5000,"#));
        assert!(query.contains(r#"node["natural"="peak"]["name"](around:5000,"#));
        assert!(!query.contains("around:1000"));
    }

    #[test]
    fn unknown_category_falls_back_to_tourism() {
        assert_eq!(tag_filter(CanonicalCategory::Other), r#"["tourism"]"#);
    }

    // -----------------------------------------------------------------------
    // Response mapping
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn maps_named_elements_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .and(body_string_contains("data="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "elements": [
                    {
                        "type": "node", "id": 101, "lat": -41.15, "lon": -71.40,
                        "tags": { "name": "Cerro Campanario", "natural": "peak" }
                    },
                    {
                        "type": "way", "id": 202,
                        "center": { "lat": -41.13, "lon": -71.31 },
                        "tags": {
                            "name": "Refugio Frey", "tourism": "alpine_hut",
                            "addr:street": "Sendero Frey", "addr:housenumber": "1"
                        }
                    },
                    { "type": "node", "id": 303, "lat": -41.1, "lon": -71.3, "tags": { "highway": "path" } },
                    { "type": "node", "id": 404, "lat": -41.1, "lon": -71.3 }
                ]
            })))
            .mount(&server)
            .await;

        let found = adapter(&server).search(bariloche(), "outdoors").await;

        assert_eq!(found.len(), 2);
        let peak = &found[0];
        assert_eq!(peak.title, "Cerro Campanario");
        assert_eq!(peak.description, "Nature: peak");
        assert_eq!(peak.address, "Address not available");
        assert_eq!(peak.external_id.as_deref(), Some("node/101"));
        assert_eq!(peak.source_system, SourceSystem::OpenStreetMap);
        assert_eq!(
            peak.map_link,
            "https://www.google.com/maps/search/?api=1&query=-41.15,-71.4"
        );
        assert_eq!(peak.rating, None);

        let hut = &found[1];
        assert_eq!(hut.description, "Tourism: alpine_hut");
        assert_eq!(hut.address, "Sendero Frey 1");
        assert_eq!(hut.external_id.as_deref(), Some("way/202"));
        assert_eq!(hut.location, Some(GeoPoint::new(-41.13, -71.31).unwrap()));
    }

    #[tokio::test]
    async fn plain_amenity_gets_generic_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "elements": [
                    { "type": "node", "id": 9, "lat": -41.13, "lon": -71.30, "tags": { "name": "Manush", "amenity": "pub" } }
                ]
            })))
            .mount(&server)
            .await;

        let found = adapter(&server).search(bariloche(), "bars").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Found via OpenStreetMap");
    }

    #[tokio::test]
    async fn caps_results_when_server_ignores_out_limit() {
        let elements: Vec<_> = (1..=25)
            .map(|id| {
                json!({
                    "type": "node", "id": id, "lat": -41.13, "lon": -71.31,
                    "tags": { "name": format!("Mirador {id}") }
                })
            })
            .collect();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "elements": elements })))
            .mount(&server)
            .await;

        let found = adapter(&server).search(bariloche(), "outdoors").await;

        assert_eq!(found.len(), MAX_RESULTS);
        assert_eq!(found[0].external_id.as_deref(), Some("node/1"));
        assert_eq!(found[9].external_id.as_deref(), Some("node/10"));
    }

    #[tokio::test]
    async fn slow_interpreter_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "elements": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let found = adapter_with_timeout(&server, Duration::from_secs(1))
            .search(bariloche(), "outdoors")
            .await;
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn gateway_timeout_status_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(504))
            .mount(&server)
            .await;

        assert!(adapter(&server).search(bariloche(), "outdoors").await.is_empty());
    }
}
