//! Read operations for the transit tables.

use sqlx::PgPool;

use super::types::{BusLineRow, BusStopRow};
use crate::DbError;

/// Every stop in the dataset, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_bus_stops(pool: &PgPool) -> Result<Vec<BusStopRow>, DbError> {
    let rows = sqlx::query_as::<_, BusStopRow>(
        "SELECT id, name, latitude, longitude, is_hub \
         FROM bus_stops \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Lines calling at `stop_id`, ordered by line id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_lines_for_stop(pool: &PgPool, stop_id: i64) -> Result<Vec<BusLineRow>, DbError> {
    let rows = sqlx::query_as::<_, BusLineRow>(
        "SELECT l.id, l.number, l.name, l.highlight_destinations, l.color \
         FROM bus_route_stops rs \
         JOIN bus_lines l ON l.id = rs.line_id \
         WHERE rs.stop_id = $1 \
         ORDER BY l.id",
    )
    .bind(stop_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
