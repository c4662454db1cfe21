use hostly_core::GeoError;
use thiserror::Error;

/// Failure inside a single source adapter. Never leaves the adapter; it is
/// logged and turned into an empty result.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} is not configured: {var} is unset")]
    MissingApiKey {
        provider: &'static str,
        var: &'static str,
    },

    #[error("unexpected HTTP status {status} from {provider}")]
    UnexpectedStatus { provider: &'static str, status: u16 },

    #[error("{provider} returned status {status}")]
    ProviderStatus {
        provider: &'static str,
        status: String,
    },

    #[error("JSON deserialization error for {provider}: {source}")]
    Deserialize {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reported by a persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    pub fn backend<E>(operation: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            operation,
            source: Box::new(source),
        }
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("property {property_id} has no coordinates")]
    MissingCoordinates { property_id: i64 },

    #[error("property {property_id} has invalid coordinates: {source}")]
    InvalidCoordinates {
        property_id: i64,
        #[source]
        source: GeoError,
    },

    #[error("search radius must be a finite, non-negative number of meters, got {radius_meters}")]
    InvalidRadius { radius_meters: f64 },

    #[error("persistence error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
