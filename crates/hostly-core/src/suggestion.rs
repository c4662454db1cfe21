//! Place suggestions produced by discovery sources.

use serde::{Deserialize, Serialize};

use crate::category::CanonicalCategory;
use crate::geo::GeoPoint;

/// External provider a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    Google,
    Foursquare,
    OpenStreetMap,
}

impl SourceSystem {
    /// Value stored in `recommendations.external_source`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceSystem::Google => "google",
            SourceSystem::Foursquare => "foursquare",
            SourceSystem::OpenStreetMap => "osm",
        }
    }
}

impl std::fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate place returned by one source adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSuggestion {
    pub title: String,
    pub description: String,
    pub address: String,
    pub map_link: String,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    /// Provider-assigned identifier. `None` disables dedup for this item.
    pub external_id: Option<String>,
    pub source_system: SourceSystem,
    /// Free-text category label fed to the resolver.
    pub raw_category_hint: String,
    pub location: Option<GeoPoint>,
}

impl ExternalSuggestion {
    /// The non-empty external id, if any.
    #[must_use]
    pub fn dedup_key(&self) -> Option<&str> {
        self.external_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// An [`ExternalSuggestion`] with its canonical category attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSuggestion {
    #[serde(flatten)]
    pub suggestion: ExternalSuggestion,
    pub category: CanonicalCategory,
}
