//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the Crosswalk API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Crosswalk API — Cross-Product Control Mapping",
        version = "0.1.0",
        description = "Maps compliance controls across vendor products. \
Products and their questionnaire controls are synchronized from the vendor \
catalog at startup; a semantic matching backend proposes equivalences once \
per product pair; accepted mappings are persisted symmetrically with their \
confidence score.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::health::health,
        crate::routes::mappings::get_percentage,
        crate::routes::mappings::remap_product,
        crate::routes::mappings::get_sync,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::mappings::MappingView,
        crate::routes::mappings::RemapResponse,
    )),
    tags(
        (name = "mappings", description = "Control mapping queries and triggers"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Router serving the assembled spec.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
