//! # Crosswalk API entry point
//!
//! Startup order: tracing → config → Postgres pool + migrations →
//! catalog client → catalog sync → initial all-pairs mapping run →
//! serve. The initial mapping run happens before the listener binds,
//! so the percentage endpoint reports real coverage from the first
//! request onward.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crosswalk_api::config::AppConfig;
use crosswalk_api::state::AppState;
use crosswalk_api::{app, bootstrap, db, orchestration};
use crosswalk_catalog::{CatalogClient, CatalogConfig};
use crosswalk_matcher::{ChatMatchBackend, ChatMatcherConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    let pool = db::init_pool(&config.database_url).await?;

    let catalog = CatalogClient::new(CatalogConfig::new(
        config.catalog_base_url.clone(),
        config.catalog_email.clone(),
        config.catalog_password.clone(),
    ))?;

    let matcher = ChatMatchBackend::new(ChatMatcherConfig::new(
        config.matcher_base_url.clone(),
        config.matcher_api_key.clone(),
        config.matcher_model.clone(),
    ))?;

    let state = AppState::new(pool.clone(), Arc::new(matcher), config.threshold);

    let product_ids = bootstrap::sync_catalog(&pool, &catalog).await?;
    *state.product_ids.write() = product_ids.clone();

    if product_ids.len() > 1 {
        tracing::info!(products = product_ids.len(), "running initial all-pairs mapping batch");
        orchestration::map_all(
            state.repo.as_ref(),
            state.matcher.as_ref(),
            &product_ids,
            state.threshold,
        )
        .await?;
        tracing::info!("initial mapping batch complete");
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "crosswalk-api listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
