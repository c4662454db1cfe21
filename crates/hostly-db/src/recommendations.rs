//! Database operations for the `recommendations` table.

use hostly_core::{ResolvedSuggestion, SourceSystem};
use sqlx::PgPool;

use crate::DbError;

/// Id of a stored recommendation for this property with the same provider
/// identity, if one exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_recommendation_by_external_id(
    pool: &PgPool,
    property_id: i64,
    source: SourceSystem,
    external_id: &str,
) -> Result<Option<i64>, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM recommendations \
         WHERE property_id = $1 AND external_source = $2 AND external_id = $3 \
         LIMIT 1",
    )
    .bind(property_id)
    .bind(source.as_str())
    .bind(external_id)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Insert one resolved suggestion and return its id.
///
/// # Errors
///
/// Returns [`DbError::Duplicate`] if a row with the same provider identity
/// was written since the caller's dedup check, or [`DbError::Sqlx`] if the
/// query fails.
pub async fn insert_recommendation(
    pool: &PgPool,
    property_id: i64,
    category_id: i64,
    resolved: &ResolvedSuggestion,
) -> Result<i64, DbError> {
    let s = &resolved.suggestion;
    let external_id = s.dedup_key();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO recommendations \
             (property_id, category_id, title, description, formatted_address, map_link, \
              rating, review_count, external_source, external_id, latitude, longitude) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (property_id, external_source, external_id) \
             WHERE external_id IS NOT NULL DO NOTHING \
         RETURNING id",
    )
    .bind(property_id)
    .bind(category_id)
    .bind(&s.title)
    .bind(&s.description)
    .bind(&s.address)
    .bind(&s.map_link)
    .bind(s.rating)
    .bind(s.review_count)
    .bind(s.source_system.as_str())
    .bind(external_id)
    .bind(s.location.map(|p| p.latitude))
    .bind(s.location.map(|p| p.longitude))
    .fetch_optional(pool)
    .await?;

    id.ok_or(DbError::Duplicate)
}
