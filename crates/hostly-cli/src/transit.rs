//! `transit` and `seed-transit` commands.

use std::path::Path;

use hostly_core::AppConfig;
use hostly_db::PgStore;
use hostly_discovery::{DiscoveryError, TransitMatcher};

use crate::load_property;

/// # Errors
///
/// Returns an error if the property is missing or has no coordinates, the
/// radius is negative or not finite, or the transit tables cannot be read.
pub(crate) async fn run_transit(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    property_id: i64,
    radius: Option<f64>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let radius = radius.unwrap_or(config.transit_radius_meters);

    let property = load_property(pool, property_id).await?;
    let location = property
        .location
        .ok_or(DiscoveryError::MissingCoordinates { property_id })?;

    let matcher = TransitMatcher::new(
        PgStore::new(pool.clone()),
        config.transit_star_lines.clone(),
    );
    let mut matches = matcher.find_nearby(location, radius).await?;
    if let Some(limit) = limit {
        matches.truncate(limit);
    }

    if matches.is_empty() {
        println!("no served stops within {radius:.0} m of property {property_id}");
        return Ok(());
    }

    for m in &matches {
        let marker = if m.is_strategic { "*" } else { " " };
        println!(
            "{marker} {:<10} {} ({:.0} m)",
            m.badge_label, m.stop.name, m.distance_meters
        );
        for line in m.description_text.lines() {
            println!("    {line}");
        }
        println!("    {}", m.directions_url());
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if the file cannot be read or validated, or the dataset
/// cannot be written.
pub(crate) async fn run_seed_transit(pool: &sqlx::PgPool, path: &Path) -> anyhow::Result<()> {
    let dataset = hostly_core::load_transit_dataset(path)?;
    let summary = hostly_db::seed_transit_dataset(pool, &dataset).await?;

    println!(
        "seeded {} line(s), {} stop(s), {} route membership(s) from {}",
        summary.lines,
        summary.stops,
        summary.memberships,
        path.display()
    );

    Ok(())
}
