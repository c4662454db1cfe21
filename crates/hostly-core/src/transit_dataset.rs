use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    pub number: String,
    pub name: String,
    #[serde(default)]
    pub highlight_destinations: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub is_hub: bool,
}

/// Ordered list of stop names a line calls at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub line: String,
    pub stops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitDataset {
    pub lines: Vec<LineConfig>,
    pub stops: Vec<StopConfig>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Load and validate a transit dataset from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_transit_dataset(path: &Path) -> Result<TransitDataset, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TransitFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_transit_dataset(&content)
}

/// Parse and validate a transit dataset from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_transit_dataset(yaml: &str) -> Result<TransitDataset, ConfigError> {
    let dataset: TransitDataset = serde_yaml::from_str(yaml)?;
    validate_dataset(&dataset)?;
    Ok(dataset)
}

fn validate_dataset(dataset: &TransitDataset) -> Result<(), ConfigError> {
    let mut line_numbers = HashSet::new();
    for line in &dataset.lines {
        if line.number.trim().is_empty() {
            return Err(ConfigError::Validation(
                "line number must be non-empty".to_string(),
            ));
        }
        if !line_numbers.insert(line.number.trim()) {
            return Err(ConfigError::Validation(format!(
                "duplicate line number: '{}'",
                line.number
            )));
        }
    }

    let mut stop_names = HashSet::new();
    for stop in &dataset.stops {
        if stop.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "stop name must be non-empty".to_string(),
            ));
        }
        if let Err(e) = GeoPoint::new(stop.latitude, stop.longitude) {
            return Err(ConfigError::Validation(format!(
                "stop '{}' has invalid coordinates: {e}",
                stop.name
            )));
        }
        if !stop_names.insert(stop.name.trim()) {
            return Err(ConfigError::Validation(format!(
                "duplicate stop name: '{}'",
                stop.name
            )));
        }
    }

    for route in &dataset.routes {
        if !line_numbers.contains(route.line.trim()) {
            return Err(ConfigError::Validation(format!(
                "route references unknown line '{}'",
                route.line
            )));
        }
        for stop in &route.stops {
            if !stop_names.contains(stop.trim()) {
                return Err(ConfigError::Validation(format!(
                    "route for line '{}' references unknown stop '{stop}'",
                    route.line
                )));
            }
        }
    }

    Ok(())
}
