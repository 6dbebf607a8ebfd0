//! Tolerant parsing of the matcher's raw JSON answer.
//!
//! The backend is asked for a JSON array of
//! `{source_id, target_id, confidence}` triples, but the answer comes
//! out of a language model and is treated accordingly: individually
//! broken triples are dropped, a structurally broken answer fails the
//! whole parse (the adapter then degrades the pair to no mappings).

use serde::Deserialize;

use crosswalk_core::{CandidateMapping, Confidence, ControlId};

/// One triple as the backend emits it, before validation.
#[derive(Debug, Deserialize)]
struct RawCandidate {
    source_id: Option<String>,
    target_id: Option<String>,
    confidence: Option<f64>,
}

/// Parse the raw assistant answer into validated candidates.
///
/// Per-triple rules:
/// - missing `source_id` or `target_id` → dropped silently;
/// - non-UUID ids → dropped with a warning;
/// - missing `confidence` → defaults to 0.0;
/// - out-of-range or non-finite confidence → dropped with a warning,
///   so nothing invalid ever reaches persistence.
///
/// # Errors
///
/// Returns `Err` only when the content is not a JSON array of objects
/// at all; callers map that to [`MatchOutcome::Failed`](crate::MatchOutcome).
pub fn parse_candidates(content: &str) -> Result<Vec<CandidateMapping>, serde_json::Error> {
    let raw: Vec<RawCandidate> = serde_json::from_str(strip_fences(content))?;

    let mut candidates = Vec::with_capacity(raw.len());
    for triple in raw {
        let (Some(source), Some(target)) = (triple.source_id, triple.target_id) else {
            continue;
        };
        let source_id = match ControlId::parse(&source) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "dropping candidate with invalid source id");
                continue;
            }
        };
        let target_id = match ControlId::parse(&target) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "dropping candidate with invalid target id");
                continue;
            }
        };
        let confidence = match Confidence::new(triple.confidence.unwrap_or(0.0)) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(%source_id, %target_id, error = %e, "dropping candidate with invalid confidence");
                continue;
            }
        };
        candidates.push(CandidateMapping {
            source_id,
            target_id,
            confidence,
        });
    }
    Ok(candidates)
}

/// Strip a surrounding markdown code fence, if any. Chat backends often
/// wrap JSON answers in ```json fences despite being told not to.
fn strip_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
