//! Shared application state.

use std::sync::Arc;

use parking_lot::RwLock;
use sqlx::PgPool;

use crosswalk_core::{Confidence, ProductId};
use crosswalk_matcher::MatchBackend;

use crate::repo::PgRepository;

/// State shared across all request handlers. Cheap to clone; every
/// field is a handle.
#[derive(Clone)]
pub struct AppState {
    /// Postgres pool, used directly by read-path handlers.
    pub pool: PgPool,
    /// Repository seam used by the orchestrator.
    pub repo: Arc<PgRepository>,
    /// The matching backend, swappable behind the trait.
    pub matcher: Arc<dyn MatchBackend>,
    /// Products synchronized from the catalog at startup. Remaps are
    /// scoped to this set.
    pub product_ids: Arc<RwLock<Vec<ProductId>>>,
    /// Acceptance threshold for mapping runs.
    pub threshold: Confidence,
}

impl AppState {
    pub fn new(pool: PgPool, matcher: Arc<dyn MatchBackend>, threshold: Confidence) -> Self {
        Self {
            repo: Arc::new(PgRepository::new(pool.clone())),
            pool,
            matcher,
            product_ids: Arc::new(RwLock::new(Vec::new())),
            threshold,
        }
    }

    /// The synchronized product set, snapshotted.
    pub fn products(&self) -> Vec<ProductId> {
        self.product_ids.read().clone()
    }
}
