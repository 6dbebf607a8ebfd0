//! Product persistence operations.

use sqlx::PgPool;

use crosswalk_core::ProductRecord;

/// Insert a product. Duplicate identity is a silent no-op — a product
/// is created once when discovered and never replaced by this path.
pub async fn insert(pool: &PgPool, record: &ProductRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO products (id, name, metadata)
         VALUES ($1, $2, $3)
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(record.id.as_uuid())
    .bind(&record.name)
    .bind(&record.metadata)
    .execute(pool)
    .await?;

    Ok(())
}

