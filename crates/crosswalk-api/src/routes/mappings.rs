//! # Mapping Surface
//!
//! Thin pass-throughs over the repository and orchestrator:
//! `GET /percentage/` (coverage per product), `POST /remap/{id}`
//! (re-run one product against all others), `GET /sync/` (full dump).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crosswalk_core::{MappingRecord, ProductId};

use crate::error::AppError;
use crate::state::AppState;
use crate::{db, orchestration};

/// One mapping row as exposed to sync consumers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MappingView {
    /// Source control id.
    pub source_id: String,
    /// Target control id.
    pub target_id: String,
    /// Equivalence confidence in [0, 1].
    pub confidence: f64,
}

impl From<MappingRecord> for MappingView {
    fn from(m: MappingRecord) -> Self {
        Self {
            source_id: m.source_id.to_string(),
            target_id: m.target_id.to_string(),
            confidence: m.confidence.value(),
        }
    }
}

/// Remap trigger acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemapResponse {
    pub status: String,
    pub message: String,
}

/// Build the mapping router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/percentage/", get(get_percentage))
        .route("/remap/:product_id", post(remap_product))
        .route("/sync/", get(get_sync))
}

/// GET /percentage/ — mapping coverage for every synchronized product.
///
/// Coverage is the share of a product's controls that appear as the
/// source of at least one mapping, as a percentage rounded to two
/// decimals. A product with zero controls reports 0.0.
#[utoipa::path(
    get,
    path = "/percentage/",
    responses(
        (status = 200, description = "Percentage mapped per product id", body = HashMap<String, f64>),
    ),
    tag = "mappings"
)]
pub(crate) async fn get_percentage(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, f64>>, AppError> {
    let mut result = HashMap::new();
    for pid in state.products() {
        let total = db::controls::count_for_product(&state.pool, pid).await?;
        let pct = if total == 0 {
            0.0
        } else {
            let mapped = db::mappings::count_mapped_sources(&state.pool, pid).await?;
            round2(mapped as f64 / total as f64 * 100.0)
        };
        result.insert(pid.to_string(), pct);
    }
    Ok(Json(result))
}

/// POST /remap/{product_id} — re-run one product against all others.
///
/// The targeted product pairs with every other synchronized product at
/// the configured threshold. Existing rows are untouched (inserts are
/// insert-or-ignore); previously missed equivalences may be added.
#[utoipa::path(
    post,
    path = "/remap/{product_id}",
    params(("product_id" = String, Path, description = "Product to remap")),
    responses(
        (status = 200, description = "Remap completed", body = RemapResponse),
        (status = 404, description = "Unknown or unsynchronized product"),
        (status = 422, description = "Malformed product id"),
    ),
    tag = "mappings"
)]
pub(crate) async fn remap_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<RemapResponse>, AppError> {
    let pid = ProductId::parse(&product_id)?;

    let known = state.products();
    if !known.contains(&pid) {
        return Err(AppError::NotFound(format!(
            "product {pid} is not synchronized"
        )));
    }

    // One pair per other product; unrelated pairs are left alone.
    for other in known.into_iter().filter(|p| *p != pid) {
        orchestration::map_pair(
            state.repo.as_ref(),
            state.matcher.as_ref(),
            pid,
            other,
            state.threshold,
        )
        .await?;
    }

    Ok(Json(RemapResponse {
        status: "success".into(),
        message: format!("product {pid} remapped"),
    }))
}

/// GET /sync/ — all mappings, keyed by product id, best match first.
#[utoipa::path(
    get,
    path = "/sync/",
    responses(
        (status = 200, description = "All mappings per product id", body = HashMap<String, Vec<MappingView>>),
    ),
    tag = "mappings"
)]
pub(crate) async fn get_sync(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, Vec<MappingView>>>, AppError> {
    let mut result = HashMap::new();
    for pid in state.products() {
        let mappings = db::mappings::list_for_product(&state.pool, pid).await?;
        result.insert(
            pid.to_string(),
            mappings.into_iter().map(MappingView::from).collect(),
        );
    }
    Ok(Json(result))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
