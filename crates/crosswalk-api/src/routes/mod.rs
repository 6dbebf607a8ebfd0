//! # API Route Modules
//!
//! - `mappings` — the mapping surface consumed by outside callers:
//!   percentage-mapped per product, single-product remap trigger, and
//!   the full mapping dump for sync.
//! - `health` — unauthenticated liveness probe.

pub mod health;
pub mod mappings;
