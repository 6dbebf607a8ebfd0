//! Mapping persistence operations.
//!
//! Mappings are immutable rows: inserted by the orchestrator after
//! threshold acceptance, deleted only via cascade when an endpoint
//! control disappears. The unique constraint on the ordered pair makes
//! re-insertion a silent no-op.

use sqlx::PgPool;

use crosswalk_core::{Confidence, ControlId, MappingRecord, ProductId};

/// Insert-or-ignore a directed mapping row.
pub async fn insert(pool: &PgPool, record: &MappingRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO mappings (source_control_id, target_control_id, confidence)
         VALUES ($1, $2, $3)
         ON CONFLICT (source_control_id, target_control_id) DO NOTHING",
    )
    .bind(record.source_id.as_uuid())
    .bind(record.target_id.as_uuid())
    .bind(record.confidence.value())
    .execute(pool)
    .await?;

    Ok(())
}

/// All mappings from one source control, best match first. Descending
/// confidence is a contract consumed by presentation layers.
pub async fn list_for_source(
    pool: &PgPool,
    source_id: ControlId,
) -> Result<Vec<MappingRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MappingRow>(
        "SELECT source_control_id, target_control_id, confidence
         FROM mappings
         WHERE source_control_id = $1
         ORDER BY confidence DESC",
    )
    .bind(source_id.as_uuid())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(MappingRow::into_record).collect()
}

/// All mappings whose source control belongs to the given product,
/// best match first. Drives the sync dump.
pub async fn list_for_product(
    pool: &PgPool,
    product_id: ProductId,
) -> Result<Vec<MappingRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MappingRow>(
        "SELECT m.source_control_id, m.target_control_id, m.confidence
         FROM mappings m
         JOIN controls c ON c.id = m.source_control_id
         WHERE c.product_id = $1
         ORDER BY m.confidence DESC",
    )
    .bind(product_id.as_uuid())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(MappingRow::into_record).collect()
}

/// Number of distinct source controls of a product that have at least
/// one mapping. Drives the percentage-mapped query.
pub async fn count_mapped_sources(
    pool: &PgPool,
    product_id: ProductId,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(DISTINCT m.source_control_id)
         FROM mappings m
         JOIN controls c ON c.id = m.source_control_id
         WHERE c.product_id = $1",
    )
    .bind(product_id.as_uuid())
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct MappingRow {
    source_control_id: uuid::Uuid,
    target_control_id: uuid::Uuid,
    confidence: f64,
}

impl MappingRow {
    fn into_record(self) -> Result<MappingRecord, sqlx::Error> {
        // Writes only store validated scores; a violation here means
        // the row was tampered with outside this service.
        let confidence = Confidence::new(self.confidence).map_err(|e| {
            sqlx::Error::Protocol(format!("stored confidence out of range: {e}"))
        })?;
        Ok(MappingRecord {
            source_id: ControlId::from_uuid(self.source_control_id),
            target_id: ControlId::from_uuid(self.target_control_id),
            confidence,
        })
    }
}
