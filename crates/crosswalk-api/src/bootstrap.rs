//! # Startup Synchronization
//!
//! Pulls the approved, non-free product set from the vendor catalog,
//! upserts products and their questionnaire controls, and returns the
//! synchronized product ids. Catalog failures here are fatal for
//! startup — without catalog data there is nothing to map — but an
//! individual control with a junk identifier is skipped, not fatal.

use sqlx::PgPool;

use crosswalk_catalog::CatalogClient;
use crosswalk_core::{ProductId, ProductRecord};

use crate::db;
use crate::error::AppError;

/// Synchronize products and controls from the catalog.
///
/// A product is synchronized when its access grant is approved and the
/// catalog marks it non-free. Controls are upserted, so re-running the
/// sync refreshes text and metadata in place.
pub async fn sync_catalog(pool: &PgPool, catalog: &CatalogClient) -> Result<Vec<ProductId>, AppError> {
    let grants = catalog.request_access().await?;
    let products = catalog.list_products().await?;

    let by_id: std::collections::HashMap<&str, _> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut synchronized = Vec::new();
    for grant in grants.iter().filter(|g| g.is_approved()) {
        let Some(summary) = by_id.get(grant.product_id.as_str()) else {
            tracing::warn!(product_id = %grant.product_id, "approved product missing from listing");
            continue;
        };
        if summary.is_free {
            continue;
        }

        let pid = match ProductId::parse(&summary.id) {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!(error = %e, "skipping product with invalid id");
                continue;
            }
        };

        db::products::insert(
            pool,
            &ProductRecord {
                id: pid,
                name: summary.name.clone(),
                metadata: serde_json::Value::Object(summary.extra.clone()),
            },
        )
        .await?;

        let controls = catalog.fetch_controls(pid).await?;
        tracing::info!(product = %pid, name = %summary.name, controls = controls.len(), "synchronized product");
        for control in &controls {
            db::controls::upsert(pool, control).await?;
        }

        synchronized.push(pid);
    }

    tracing::info!(products = synchronized.len(), "catalog sync complete");
    Ok(synchronized)
}
