//! # Database Persistence Layer
//!
//! Postgres persistence for products, controls, and mappings via SQLx.
//! Every operation takes a `&PgPool` and acquires a pooled connection
//! for its own unit of work; there are no long-held transactions and
//! no retries — storage failures propagate to the caller, which owns
//! retry policy if any.
//!
//! ## Write semantics
//!
//! - products: insert-or-ignore on id (a product is created once).
//! - controls: upsert on id, overwriting text and metadata (re-sync of
//!   a questionnaire replaces content in place).
//! - mappings: insert-or-ignore on the (source, target) ordered pair,
//!   which makes re-running a mapping batch idempotent.

pub mod controls;
pub mod mappings;
pub mod products;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the connection pool and run embedded migrations.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(5)
        .max_connections(40)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(database_url)
        .await?;

    tracing::info!("connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(pool)
}
