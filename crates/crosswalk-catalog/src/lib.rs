//! # crosswalk-catalog — Authenticated Vendor Catalog Client
//!
//! HTTP client for the external product catalog. Owns the full bearer
//! token lifecycle: credential exchange against the catalog's login
//! endpoint, a single process-wide token slot, and lazy refresh driven
//! entirely from the request path — there is no background timer.
//!
//! ## Token Expiry Precedence
//!
//! 1. An explicit `expires_in` field on the login response.
//! 2. The `exp` claim of the token itself when it is JWT-shaped.
//! 3. A one-hour default.
//!
//! All three are shortened by a 60-second margin to absorb clock skew
//! and in-flight latency.
//!
//! ## Concurrency
//!
//! Concurrent callers that observe a stale token may each trigger a
//! login. That is tolerated: logins are idempotent and the window is a
//! few requests wide at worst. Serializing refresh would cost a lock
//! across an await for no observed benefit.

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod token;
pub mod types;

pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use types::{AccessGrant, ProductSummary};
