//! # Mapping Orchestrator
//!
//! Drives pairwise control mapping: fetch both control sets, one
//! batched matcher call per product pair, threshold filter, then a
//! forward and a reverse write per accepted candidate.
//!
//! ## Cost model
//!
//! All controls of a pair go into a single matcher call, so external
//! calls scale with the number of product pairs, not with the number
//! of control pairs. Pairs run strictly sequentially; at most one
//! matcher call is in flight at any time.
//!
//! ## Failure model
//!
//! - A matcher failure degrades its pair to "no mappings produced";
//!   the batch continues.
//! - A storage failure while fetching controls propagates — without
//!   the control set the pair cannot proceed at all.
//! - A storage failure on an individual mapping write is logged and
//!   the pair continues. A failure on the reverse half leaves an
//!   asymmetric row; re-running the batch converges back to symmetry
//!   because inserts are insert-or-ignore.

use crosswalk_core::{Confidence, ProductId};
use crosswalk_matcher::{ControlSet, MatchBackend, MatchOutcome};

use crate::repo::ControlRepository;

/// Outcome counters for one pair, reported by [`map_pair`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PairReport {
    /// Candidates at or above the threshold (each worth two rows).
    pub accepted: usize,
    /// Candidates below the threshold, discarded without trace.
    pub discarded: usize,
    /// Individual row writes that failed and were skipped.
    pub failed_writes: usize,
}

/// Map all controls between two products in one matcher call.
///
/// Short-circuits without calling the backend when either control set
/// is empty. Candidates with `confidence >= threshold` (boundary
/// inclusive) are persisted forward then reverse with equal confidence.
///
/// # Errors
///
/// Propagates storage failures from the control-set fetch only; write
/// failures are counted in the report instead.
pub async fn map_pair(
    repo: &dyn ControlRepository,
    backend: &dyn MatchBackend,
    product_a: ProductId,
    product_b: ProductId,
    threshold: Confidence,
) -> Result<PairReport, sqlx::Error> {
    let controls_a = repo.get_controls(product_a).await?;
    let controls_b = repo.get_controls(product_b).await?;

    if controls_a.is_empty() || controls_b.is_empty() {
        tracing::warn!(%product_a, %product_b, "no controls to map for pair, skipping");
        return Ok(PairReport::default());
    }

    tracing::info!(%product_a, %product_b, "mapping product pair");

    let set_a = ControlSet::from_records(product_a, &controls_a);
    let set_b = ControlSet::from_records(product_b, &controls_b);

    let candidates = match backend.propose(&set_a, &set_b).await {
        MatchOutcome::Candidates(candidates) => candidates,
        MatchOutcome::Failed { reason } => {
            // Degraded to empty; the batch must survive one bad pair.
            tracing::warn!(%product_a, %product_b, %reason, "matcher failed, pair produces no mappings");
            Vec::new()
        }
    };

    let mut report = PairReport::default();
    for candidate in candidates {
        if !candidate.confidence.meets(threshold) {
            report.discarded += 1;
            continue;
        }

        let forward = candidate.into_mapping();
        let reverse = forward.reversed();
        let mut wrote_both = true;
        for row in [forward, reverse] {
            if let Err(e) = repo.insert_mapping(&row).await {
                tracing::error!(
                    source = %row.source_id,
                    target = %row.target_id,
                    "failed to insert mapping: {e}"
                );
                report.failed_writes += 1;
                wrote_both = false;
            }
        }
        if wrote_both {
            report.accepted += 1;
        }
    }

    tracing::info!(
        %product_a,
        %product_b,
        accepted = report.accepted,
        discarded = report.discarded,
        "completed mapping pair"
    );
    Ok(report)
}

/// Map every unordered pair drawn from `product_ids`, sequentially.
///
/// Upper-triangular enumeration: for i < j, pair (i, j). No self-pairs,
/// no repeated pairs — exactly n·(n−1)/2 matcher calls for n products.
/// Re-running adds no duplicate rows but may add previously missed
/// mappings, since the matcher is not deterministic across calls.
pub async fn map_all(
    repo: &dyn ControlRepository,
    backend: &dyn MatchBackend,
    product_ids: &[ProductId],
    threshold: Confidence,
) -> Result<(), sqlx::Error> {
    for (i, &a) in product_ids.iter().enumerate() {
        for &b in &product_ids[i + 1..] {
            map_pair(repo, backend, a, b, threshold).await?;
        }
    }
    Ok(())
}
