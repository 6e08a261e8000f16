//! Zero-shot classification by embedding similarity.
//!
//! Each candidate label is turned into a hypothesis sentence; the input text
//! and all hypotheses are embedded in one batch, cosine similarities are
//! sharpened and softmaxed into a probability distribution, and labels are
//! returned ordered by descending score.

use netr_core::ClassificationResult;

/// Softmax sharpening applied to cosine similarities. Raw similarities
/// cluster in a narrow band, so without sharpening every label would score
/// near 1/n.
const TEMPERATURE: f32 = 10.0;

/// Hypothesis sentence for a candidate label. Embedding the hypothesis
/// rather than the bare label gives the label phrase sentence-like context.
pub fn hypothesis(label: &str) -> String {
    format!("This message is an example of {label}.")
}

/// Softmax over sharpened scores.
fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores
        .iter()
        .map(|&s| ((s - max) * TEMPERATURE).exp())
        .collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Turn raw similarities into a descending-ordered classification result.
pub fn rank(labels: &[&str], sims: &[f32]) -> ClassificationResult {
    let probs = softmax(sims);
    let mut pairs: Vec<(String, f32)> =
        labels.iter().map(|l| l.to_string()).zip(probs).collect();
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let (labels, scores) = pairs.into_iter().unzip();
    ClassificationResult { labels, scores }
}

#[cfg(feature = "onnx")]
mod onnx {
    use std::path::Path;

    use netr_core::{ClassificationResult, ZeroShotClassifier};
    use tracing::info;

    use crate::embedder::SentenceEmbedder;

    /// Zero-shot classifier backed by the local sentence embedder.
    ///
    /// Loading the model is the costly step; construct once at startup and
    /// reuse for every request. A load failure is fatal for the process.
    pub struct EmbeddingClassifier {
        embedder: SentenceEmbedder,
    }

    impl EmbeddingClassifier {
        pub fn load(model_dir: &Path) -> anyhow::Result<Self> {
            let embedder = SentenceEmbedder::load(model_dir)?;
            Ok(Self { embedder })
        }
    }

    impl ZeroShotClassifier for EmbeddingClassifier {
        fn classify(
            &mut self,
            text: &str,
            labels: &[&str],
        ) -> anyhow::Result<ClassificationResult> {
            anyhow::ensure!(!labels.is_empty(), "no candidate labels");

            let hypotheses: Vec<String> = labels.iter().map(|l| super::hypothesis(l)).collect();
            let mut inputs: Vec<&str> = Vec::with_capacity(labels.len() + 1);
            inputs.push(text);
            inputs.extend(hypotheses.iter().map(|h| h.as_str()));

            let vectors = self.embedder.embed_batch(&inputs)?;
            let (text_vec, label_vecs) = vectors
                .split_first()
                .ok_or_else(|| anyhow::anyhow!("embedder returned no vectors"))?;

            let sims: Vec<f32> = label_vecs
                .iter()
                .map(|v| v.iter().zip(text_vec).map(|(a, b)| a * b).sum())
                .collect();

            let result = super::rank(labels, &sims);
            info!(top = %result.labels[0], score = result.scores[0], "classified message");
            Ok(result)
        }
    }
}

#[cfg(feature = "onnx")]
pub use onnx::EmbeddingClassifier;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(&[0.31, 0.22, 0.15]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for p in &probs {
            assert!((0.0..=1.0).contains(p));
        }
    }

    #[test]
    fn softmax_preserves_order() {
        let probs = softmax(&[0.1, 0.5, 0.3]);
        assert!(probs[1] > probs[2]);
        assert!(probs[2] > probs[0]);
    }

    #[test]
    fn rank_orders_labels_by_descending_score() {
        let result = rank(
            &["criminal code", "military code", "normal message"],
            &[0.2, 0.1, 0.6],
        );
        assert_eq!(
            result.labels,
            vec!["normal message", "criminal code", "military code"]
        );
        assert!(result.scores[0] > result.scores[1]);
        assert!(result.scores[1] > result.scores[2]);
        let sum: f32 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn hypothesis_embeds_the_label() {
        assert_eq!(
            hypothesis("criminal code"),
            "This message is an example of criminal code."
        );
    }
}
