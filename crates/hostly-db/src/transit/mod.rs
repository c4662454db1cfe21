//! Database operations for the private transit dataset
//! (`bus_stops`, `bus_lines`, `bus_route_stops`).

mod read;
mod types;
mod write;

pub use read::{list_bus_stops, list_lines_for_stop};
pub use types::{BusLineRow, BusStopRow, TransitSeedSummary};
pub use write::seed_transit_dataset;
