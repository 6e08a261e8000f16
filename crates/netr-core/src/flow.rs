//! The local scan flow: gatekeeper, one classifier call, one keyword score.
//!
//! Per invocation the flow moves Idle → Validating → {Rejected | Calling} →
//! {Rendered | Errored}. Rejection and classifier failure are both terminal
//! for the invocation; nothing is retried and nothing is persisted.

use thiserror::Error;
use tracing::info;

use crate::classify::{CANDIDATE_LABELS, ClassificationResult, ZeroShotClassifier};
use crate::keywords::{RiskBucket, keyword_score};
use crate::request::{ValidationError, require_text};

/// Everything the display layer needs for one scan. Lives for a single
/// request cycle.
#[derive(Debug)]
pub struct ScanReport {
    pub interpretation: ClassificationResult,
    pub keyword_matches: usize,
    pub risk: RiskBucket,
}

#[derive(Debug, Error)]
pub enum ScanError {
    /// Input rejected before any classifier call.
    #[error("{0}")]
    Rejected(#[from] ValidationError),
    #[error("classification failed: {0}")]
    Classifier(#[source] anyhow::Error),
}

/// Run one scan: validate, classify once, score keywords, bucket risk.
///
/// The risk bucket is derived solely from the keyword count; the
/// classification result is informational and never feeds into it.
pub fn run_scan<C: ZeroShotClassifier>(
    text: &str,
    classifier: &mut C,
) -> Result<ScanReport, ScanError> {
    let text = require_text(text)?;

    let interpretation = classifier
        .classify(text, &CANDIDATE_LABELS)
        .map_err(ScanError::Classifier)?;

    let keyword_matches = keyword_score(text);
    let risk = RiskBucket::from_score(keyword_matches);

    info!(keyword_matches, risk = ?risk, "scan complete");
    Ok(ScanReport {
        interpretation,
        keyword_matches,
        risk,
    })
}
