//! Row types for the transit tables.

use hostly_core::{GeoError, GeoPoint, TransitLine, TransitStop};

/// A row from the `bus_stops` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusStopRow {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_hub: bool,
}

impl BusStopRow {
    /// # Errors
    ///
    /// Returns [`GeoError`] if the stored coordinates are out of range.
    pub fn into_stop(self) -> Result<TransitStop, GeoError> {
        Ok(TransitStop {
            id: self.id,
            location: GeoPoint::new(self.latitude, self.longitude)?,
            name: self.name,
            is_hub: self.is_hub,
        })
    }
}

/// A row from the `bus_lines` table. `color` is display-only.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusLineRow {
    pub id: i64,
    pub number: String,
    pub name: String,
    pub highlight_destinations: Option<String>,
    pub color: Option<String>,
}

impl From<BusLineRow> for TransitLine {
    fn from(row: BusLineRow) -> Self {
        Self {
            id: row.id,
            number: row.number,
            name: row.name,
            highlight_destinations: row.highlight_destinations,
        }
    }
}

/// Counts written by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitSeedSummary {
    pub lines: usize,
    pub stops: usize,
    pub memberships: usize,
}
