//! Local discovery and transit matching for Hostly properties.
//!
//! Fans out to several external place-search providers, merges and
//! categorizes what comes back, and persists new recommendations. Separately
//! ranks nearby stops from the private transit dataset by how useful they
//! are to a visiting guest.

pub mod aggregator;
pub mod error;
pub mod sources;
pub mod store;
pub mod transit;
pub mod types;

pub use aggregator::SuggestionAggregator;
pub use error::{DiscoveryError, ProviderError, StoreError};
pub use sources::{
    build_http_client, AdapterRegistry, FoursquareAdapter, GooglePlacesAdapter,
    GoogleTransitAdapter, OverpassAdapter, RegisteredAdapter, SourceAdapter,
};
pub use store::{SuggestionStore, TransitStore};
pub use transit::{TransitMatcher, DEFAULT_RADIUS_METERS};
pub use types::{AggregationResult, DiscoveryConfig, PropertyRef};
