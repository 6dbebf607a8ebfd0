//! # crosswalk-core — Foundational Domain Types
//!
//! Shared vocabulary for the Crosswalk control-mapping engine. Everything
//! here is a plain value type: identifier newtypes ([`ProductId`],
//! [`ControlId`]), the range-validated [`Confidence`] score, and the
//! records that flow between the catalog client, the matching backend,
//! and the persistence layer.
//!
//! ## Design Principle
//!
//! Invalid values are unrepresentable after construction: a `Confidence`
//! is always finite and inside `[0.0, 1.0]`, and deserialization routes
//! through the same validating constructor, so out-of-range scores are
//! rejected at the system boundary rather than in front of an `INSERT`.

pub mod confidence;
pub mod error;
pub mod identity;
pub mod record;

pub use confidence::Confidence;
pub use error::ValidationError;
pub use identity::{ControlId, ProductId};
pub use record::{CandidateMapping, ControlRecord, MappingRecord, ProductRecord};
