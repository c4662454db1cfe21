//! Read access to the `properties` table.
//!
//! Properties are created and edited elsewhere; discovery only needs their
//! coordinates.

use chrono::{DateTime, Utc};
use hostly_discovery::{DiscoveryError, PropertyRef};
use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PropertyRow {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PropertyRow {
    /// The slice discovery works from. Missing coordinates are allowed here
    /// and rejected by the aggregator.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidCoordinates`] if stored values are out
    /// of range.
    pub fn to_property_ref(&self) -> Result<PropertyRef, DiscoveryError> {
        PropertyRef::from_coordinates(self.id, self.latitude, self.longitude)
    }
}

/// Returns the property with `id`, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_property(pool: &PgPool, id: i64) -> Result<Option<PropertyRow>, DbError> {
    let row = sqlx::query_as::<_, PropertyRow>(
        "SELECT id, name, address, latitude, longitude, created_at, updated_at \
         FROM properties \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
