//! Control persistence operations.

use sqlx::PgPool;

use crosswalk_core::{ControlId, ControlRecord, ProductId};

/// Upsert a control keyed on identity. Re-synchronizing a questionnaire
/// overwrites text and metadata in place.
pub async fn upsert(pool: &PgPool, record: &ControlRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO controls (id, product_id, text, metadata)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (id) DO UPDATE SET text = EXCLUDED.text, metadata = EXCLUDED.metadata",
    )
    .bind(record.id.as_uuid())
    .bind(record.product_id.as_uuid())
    .bind(&record.text)
    .bind(&record.metadata)
    .execute(pool)
    .await?;

    Ok(())
}

/// All controls of one product. Order is unspecified; callers must not
/// depend on it.
pub async fn list_for_product(
    pool: &PgPool,
    product_id: ProductId,
) -> Result<Vec<ControlRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ControlRow>(
        "SELECT id, product_id, text, metadata FROM controls WHERE product_id = $1",
    )
    .bind(product_id.as_uuid())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ControlRow::into_record).collect())
}

/// Number of controls owned by a product.
pub async fn count_for_product(pool: &PgPool, product_id: ProductId) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM controls WHERE product_id = $1")
            .bind(product_id.as_uuid())
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ControlRow {
    id: uuid::Uuid,
    product_id: uuid::Uuid,
    text: String,
    metadata: Option<serde_json::Value>,
}

impl ControlRow {
    fn into_record(self) -> ControlRecord {
        ControlRecord {
            id: ControlId::from_uuid(self.id),
            product_id: ProductId::from_uuid(self.product_id),
            text: self.text,
            metadata: self.metadata.unwrap_or(serde_json::Value::Null),
        }
    }
}
