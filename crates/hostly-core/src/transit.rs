//! Private transit dataset types and computed matches.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitStop {
    pub id: i64,
    pub name: String,
    pub location: GeoPoint,
    pub is_hub: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitLine {
    pub id: i64,
    /// Public line number as printed on the bus, e.g. `"20"` or `"71/81"`.
    pub number: String,
    pub name: String,
    /// Tourist-significant endpoints served by this line.
    pub highlight_destinations: Option<String>,
}

impl TransitLine {
    /// Whether this line leads somewhere worth flagging to guests.
    #[must_use]
    pub fn has_highlight(&self) -> bool {
        self.highlight_destinations
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    /// Highlighted destinations if present, else the line name.
    #[must_use]
    pub fn destination_label(&self) -> &str {
        match self.highlight_destinations.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => &self.name,
        }
    }
}

/// Join row between a stop and a line. Order is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMembership {
    pub line_id: i64,
    pub stop_id: i64,
    pub sequence_order: i32,
}

/// A nearby stop computed for one query. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitMatch {
    pub stop: TransitStop,
    pub distance_meters: f64,
    pub serving_lines: Vec<TransitLine>,
    pub is_strategic: bool,
    pub badge_label: String,
    pub description_text: String,
}

impl TransitMatch {
    /// Transit directions link to this stop.
    #[must_use]
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}&travelmode=transit",
            self.stop.location.latitude, self.stop.location.longitude
        )
    }
}
