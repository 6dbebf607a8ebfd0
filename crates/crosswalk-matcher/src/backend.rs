//! The matching backend trait and its input/output contract.

use async_trait::async_trait;

use crosswalk_core::{CandidateMapping, ControlId, ControlRecord, ProductId};

/// One control as the matcher sees it: identity plus semantic text.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlText {
    pub id: ControlId,
    pub text: String,
}

/// A labeled control set for one side of a pairwise matching call.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSet {
    pub product_id: ProductId,
    pub controls: Vec<ControlText>,
}

impl ControlSet {
    /// Build a control set from repository records. Records belonging
    /// to other products are the caller's bug; this does not filter.
    pub fn from_records(product_id: ProductId, records: &[ControlRecord]) -> Self {
        Self {
            product_id,
            controls: records
                .iter()
                .map(|r| ControlText {
                    id: r.id,
                    text: r.text.clone(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// Result of one matching call.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The backend answered with zero or more well-formed candidates.
    Candidates(Vec<CandidateMapping>),
    /// The call failed or the answer was unusable. The pair degrades to
    /// "no mappings produced"; the batch continues.
    Failed { reason: String },
}

impl MatchOutcome {
    /// Collapse to the candidate list, treating failure as empty.
    /// This is the orchestrator's current view of both variants.
    pub fn into_candidates(self) -> Vec<CandidateMapping> {
        match self {
            Self::Candidates(c) => c,
            Self::Failed { .. } => Vec::new(),
        }
    }
}

/// A semantic matching backend: one call per product pair, both full
/// control sets batched into that call. Callers short-circuit on empty
/// input before invoking this.
#[async_trait]
pub trait MatchBackend: Send + Sync {
    async fn propose(&self, a: &ControlSet, b: &ControlSet) -> MatchOutcome;
}
