//! # crosswalk-matcher — Semantic Matching Backend Adapter
//!
//! Wraps the single external call that takes two labeled control sets
//! and returns proposed equivalence mappings with confidence scores.
//! The backend is a parameter of the system, so the surface is a trait
//! ([`MatchBackend`]) with one production implementation
//! ([`ChatMatchBackend`]) that speaks an OpenAI-style chat-completions
//! protocol.
//!
//! ## Degradation Contract
//!
//! A matcher hiccup must never abort a multi-pair batch. Transport
//! failures, non-2xx responses, and unparseable output all collapse to
//! [`MatchOutcome::Failed`] — logged with the raw response for
//! diagnosis, never propagated as an error. "The backend found no
//! equivalences" and "the backend fell over" are distinct variants,
//! even though the orchestrator currently persists nothing in both
//! cases.

pub mod backend;
pub mod chat;
pub mod parse;

pub use backend::{ControlSet, ControlText, MatchBackend, MatchOutcome};
pub use chat::{ChatMatchBackend, ChatMatcherConfig};
