//! Local AI inference: ONNX Runtime sentence embeddings and the
//! embedding-similarity zero-shot classifier.

#[cfg(feature = "onnx")]
mod embedder;
#[cfg(feature = "onnx")]
pub use embedder::SentenceEmbedder;

pub mod zero_shot;
#[cfg(feature = "onnx")]
pub use zero_shot::EmbeddingClassifier;
