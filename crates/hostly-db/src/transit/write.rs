//! Transit dataset seeding.

use std::collections::HashMap;

use hostly_core::{RouteMembership, TransitDataset};
use sqlx::PgPool;

use super::types::TransitSeedSummary;
use crate::DbError;

/// Replace the stored transit dataset with `dataset`.
///
/// Runs in one transaction: existing memberships, stops and lines are
/// deleted, then the new ones inserted. Any failure rolls back to the
/// previous dataset. Route references are expected to be validated already
/// (see [`hostly_core::parse_transit_dataset`]); an unknown name here is
/// skipped with a warning.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_transit_dataset(
    pool: &PgPool,
    dataset: &TransitDataset,
) -> Result<TransitSeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = TransitSeedSummary::default();

    sqlx::query("DELETE FROM bus_route_stops")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM bus_stops").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM bus_lines").execute(&mut *tx).await?;

    let mut line_ids: HashMap<&str, i64> = HashMap::with_capacity(dataset.lines.len());
    for line in &dataset.lines {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO bus_lines (number, name, highlight_destinations, color) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(line.number.trim())
        .bind(&line.name)
        .bind(&line.highlight_destinations)
        .bind(&line.color)
        .fetch_one(&mut *tx)
        .await?;
        line_ids.insert(line.number.trim(), id);
        summary.lines += 1;
    }

    let mut stop_ids: HashMap<&str, i64> = HashMap::with_capacity(dataset.stops.len());
    for stop in &dataset.stops {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO bus_stops (name, latitude, longitude, is_hub) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(stop.name.trim())
        .bind(stop.latitude)
        .bind(stop.longitude)
        .bind(stop.is_hub)
        .fetch_one(&mut *tx)
        .await?;
        stop_ids.insert(stop.name.trim(), id);
        summary.stops += 1;
    }

    for route in &dataset.routes {
        let Some(&line_id) = line_ids.get(route.line.trim()) else {
            tracing::warn!(line = %route.line, "route references unknown line, skipping");
            continue;
        };

        for (position, stop_name) in route.stops.iter().enumerate() {
            let Some(&stop_id) = stop_ids.get(stop_name.trim()) else {
                tracing::warn!(line = %route.line, stop = %stop_name, "route references unknown stop, skipping");
                continue;
            };
            let membership = RouteMembership {
                line_id,
                stop_id,
                sequence_order: i32::try_from(position + 1).unwrap_or(i32::MAX),
            };

            let inserted = sqlx::query(
                "INSERT INTO bus_route_stops (line_id, stop_id, sequence_order) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (line_id, stop_id) DO NOTHING",
            )
            .bind(membership.line_id)
            .bind(membership.stop_id)
            .bind(membership.sequence_order)
            .execute(&mut *tx)
            .await?;
            if inserted.rows_affected() > 0 {
                summary.memberships += 1;
            }
        }
    }

    tx.commit().await?;

    tracing::info!(
        lines = summary.lines,
        stops = summary.stops,
        memberships = summary.memberships,
        "transit dataset seeded"
    );

    Ok(summary)
}
