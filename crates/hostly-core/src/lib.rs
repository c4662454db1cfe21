//! Domain types shared by the Hostly local discovery and transit crates.

pub mod app_config;
pub mod category;
pub mod config;
pub mod geo;
pub mod suggestion;
pub mod transit;
pub mod transit_dataset;

pub use app_config::{AppConfig, Environment};
pub use category::{resolve_category, CanonicalCategory};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_meters, GeoError, GeoPoint, EARTH_RADIUS_METERS};
pub use suggestion::{ExternalSuggestion, ResolvedSuggestion, SourceSystem};
pub use transit::{RouteMembership, TransitLine, TransitMatch, TransitStop};
pub use transit_dataset::{
    load_transit_dataset, parse_transit_dataset, LineConfig, RouteConfig, StopConfig,
    TransitDataset,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read transit dataset {path}: {source}")]
    TransitFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse transit dataset: {0}")]
    TransitFileParse(#[from] serde_yaml::Error),

    #[error("transit dataset validation failed: {0}")]
    Validation(String),
}
