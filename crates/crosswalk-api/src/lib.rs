//! # crosswalk-api — Axum API Service for Crosswalk
//!
//! The service layer around the control-mapping engine. It owns:
//!
//! - Postgres persistence for products, controls, and mappings
//!   ([`db`]), with the upsert/insert-or-ignore semantics the mapping
//!   algorithm relies on;
//! - the pairwise mapping orchestrator ([`orchestration`]);
//! - catalog bootstrap at startup ([`bootstrap`]);
//! - the HTTP surface ([`routes`]): percentage-mapped per product, a
//!   single-product remap trigger, and the full mapping dump for sync.
//!
//! ## API Surface
//!
//! | Route                    | Module                | Behavior                      |
//! |--------------------------|-----------------------|-------------------------------|
//! | `GET /percentage/`       | [`routes::mappings`]  | Coverage per product          |
//! | `POST /remap/{id}`       | [`routes::mappings`]  | Re-pair one product           |
//! | `GET /sync/`             | [`routes::mappings`]  | Full mapping dump             |
//! | `GET /health`            | [`routes::health`]    | Liveness                      |
//! | `GET /openapi.json`      | [`openapi`]           | Assembled spec                |

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod openapi;
pub mod orchestration;
pub mod repo;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::mappings::router())
        .merge(routes::health::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
