//! Repository seam consumed by the mapping orchestrator.
//!
//! The orchestrator only needs two operations: fetch a product's
//! control set and persist an accepted mapping row. Fronting the
//! `db` modules with a trait keeps the pairwise algorithm testable
//! against an in-memory fake; retries and transactions stay out of
//! scope on both sides of the seam.

use async_trait::async_trait;
use sqlx::PgPool;

use crosswalk_core::{ControlId, ControlRecord, MappingRecord, ProductId};

use crate::db;

/// Persistence operations the orchestrator depends on. Failures
/// propagate unwrapped; the orchestrator decides what is fatal.
#[async_trait]
pub trait ControlRepository: Send + Sync {
    /// Full control set of one product; order is unspecified.
    async fn get_controls(&self, product_id: ProductId) -> Result<Vec<ControlRecord>, sqlx::Error>;

    /// Insert-or-ignore one directed mapping row.
    async fn insert_mapping(&self, mapping: &MappingRecord) -> Result<(), sqlx::Error>;

    /// Mappings from one source control, best match first. Descending
    /// confidence is part of the contract, not a storage accident.
    async fn mappings_for_source(
        &self,
        source_id: ControlId,
    ) -> Result<Vec<MappingRecord>, sqlx::Error>;
}

/// Production repository over the Postgres pool.
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ControlRepository for PgRepository {
    async fn get_controls(&self, product_id: ProductId) -> Result<Vec<ControlRecord>, sqlx::Error> {
        db::controls::list_for_product(&self.pool, product_id).await
    }

    async fn insert_mapping(&self, mapping: &MappingRecord) -> Result<(), sqlx::Error> {
        db::mappings::insert(&self.pool, mapping).await
    }

    async fn mappings_for_source(
        &self,
        source_id: ControlId,
    ) -> Result<Vec<MappingRecord>, sqlx::Error> {
        db::mappings::list_for_source(&self.pool, source_id).await
    }
}
