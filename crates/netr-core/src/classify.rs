//! Zero-shot classification types and the classifier capability seam.
//!
//! The classifier is an injected dependency rather than module state, so
//! flow code can run against a mock and the real model is constructed
//! exactly once at startup.

/// Candidate labels for coded-speech interpretation, in fixed order.
pub const CANDIDATE_LABELS: [&str; 3] = ["criminal code", "military code", "normal message"];

/// Labels paired positionally with scores in `[0, 1]`, ordered by
/// descending score.
///
/// The ordering is produced by the classifier; consumers display it as-is
/// and never re-sort.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl ClassificationResult {
    /// Iterate `(label, score)` pairs in classifier order.
    pub fn ranked(&self) -> impl Iterator<Item = (&str, f32)> {
        self.labels
            .iter()
            .map(|l| l.as_str())
            .zip(self.scores.iter().copied())
    }
}

/// Capability to classify text against a set of candidate labels.
///
/// `&mut self` because inference backends (ONNX sessions) require exclusive
/// access to run.
pub trait ZeroShotClassifier {
    fn classify(&mut self, text: &str, labels: &[&str]) -> anyhow::Result<ClassificationResult>;
}
