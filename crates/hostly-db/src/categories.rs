//! Database operations for the `categories` table.

use hostly_core::CanonicalCategory;
use sqlx::PgPool;

use crate::DbError;

/// Id of the property's category record for `category`, creating it if absent.
///
/// Safe under concurrent callers: the unique `(property_id, type)` key makes
/// the insert an upsert, and the existing id is returned either way.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails (for example, an unknown
/// property id).
pub async fn ensure_category(
    pool: &PgPool,
    property_id: i64,
    category: CanonicalCategory,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (property_id, type, name) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (property_id, type) DO UPDATE SET updated_at = NOW() \
         RETURNING id",
    )
    .bind(property_id)
    .bind(category.slug())
    .bind(category.display_name())
    .fetch_one(pool)
    .await?;

    Ok(id)
}
