//! ONNX Runtime sentence embeddings.
//!
//! Wraps a sentence-transformers model (all-MiniLM-L6-v2 by default) and
//! produces L2-normalized vectors by attention-masked mean pooling. The
//! model directory must contain `model.onnx` and `tokenizer.json`.

use std::path::Path;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;

const MAX_TOKENS: usize = 256;

/// Sentence embedding generator.
///
/// Construction loads the ONNX session and tokenizer; this is the costly
/// step and happens once for the process lifetime.
pub struct SentenceEmbedder {
    session: Session,
    tokenizer: Tokenizer,
    dim: usize,
}

impl SentenceEmbedder {
    /// Load a model from a directory containing `model.onnx` and `tokenizer.json`.
    pub fn load(model_dir: &Path) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer.json not found in {model_dir:?}"
        );

        let session = Session::builder()?.commit_from_file(&model_path)?;
        let dim = output_dim(session.outputs()[0].dtype()).unwrap_or(384);

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;
        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            ..Default::default()
        }));

        info!(dim, model = %model_path.display(), "loaded embedding model");
        Ok(Self {
            session,
            tokenizer,
            dim,
        })
    }

    /// Embedding dimensionality (384 for all-MiniLM-L6-v2).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Embed a batch of texts, one normalized vector per input.
    pub fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let batch = texts.len();
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;
        let seq_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        // Flat [batch, seq_len] input tensors.
        let mut input_ids = vec![0i64; batch * seq_len];
        let mut attention_mask = vec![0i64; batch * seq_len];
        let mut token_type_ids = vec![0i64; batch * seq_len];
        for (i, enc) in encodings.iter().enumerate() {
            let row = i * seq_len;
            for (j, &id) in enc.get_ids().iter().enumerate() {
                input_ids[row + j] = id as i64;
            }
            for (j, &m) in enc.get_attention_mask().iter().enumerate() {
                attention_mask[row + j] = m as i64;
            }
            for (j, &t) in enc.get_type_ids().iter().enumerate() {
                token_type_ids[row + j] = t as i64;
            }
        }

        let shape = [batch as i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.clone().into_boxed_slice()))?;
        let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))?;

        let outputs = self.session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
            "token_type_ids" => type_tensor,
        ])?;

        // Token embeddings come back as [batch, seq_len, dim].
        let (out_shape, out_data) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = out_shape;
        anyhow::ensure!(
            dims.len() == 3 && dims[0] as usize == batch && dims[2] as usize == self.dim,
            "unexpected output shape {dims:?}, expected [{batch}, {seq_len}, {}]",
            self.dim
        );
        let out_seq_len = dims[1] as usize;

        let mut embeddings = Vec::with_capacity(batch);
        for i in 0..batch {
            embeddings.push(mean_pool(
                out_data,
                &attention_mask[i * seq_len..(i + 1) * seq_len],
                i,
                out_seq_len,
                self.dim,
            ));
        }
        Ok(embeddings)
    }
}

/// Attention-masked mean pooling over one row of the token-embedding tensor,
/// followed by L2 normalization.
fn mean_pool(data: &[f32], mask: &[i64], row: usize, seq_len: usize, dim: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; dim];
    let mut tokens = 0.0f32;
    for (j, &m) in mask.iter().take(seq_len).enumerate() {
        if m > 0 {
            let offset = (row * seq_len + j) * dim;
            for (p, &v) in pooled.iter_mut().zip(&data[offset..offset + dim]) {
                *p += v;
            }
            tokens += 1.0;
        }
    }
    if tokens > 0.0 {
        for p in &mut pooled {
            *p /= tokens;
        }
    }
    normalize(&mut pooled);
    pooled
}

/// L2-normalize a vector in place.
fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Infer the embedding dimension from the model's first output shape.
fn output_dim(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Workspace-relative model directory. The ONNX artifact is not checked
    /// in; tests that need it fail with a download hint when it is absent.
    fn require_model() -> PathBuf {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/all-MiniLM-L6-v2");
        assert!(
            dir.join("model.onnx").exists(),
            "model.onnx missing from {}; fetch it with\n  \
             curl -L -o models/all-MiniLM-L6-v2/model.onnx \
             https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main/onnx/model.onnx",
            dir.display()
        );
        dir
    }

    #[test]
    fn load_model() {
        let embedder = SentenceEmbedder::load(&require_model()).unwrap();
        assert_eq!(embedder.dim(), 384);
    }

    #[test]
    fn embeddings_are_unit_norm() {
        let mut embedder = SentenceEmbedder::load(&require_model()).unwrap();
        let vecs = embedder
            .embed_batch(&["the eagle has landed", "see you at the party"])
            .unwrap();
        assert_eq!(vecs.len(), 2);
        for v in &vecs {
            assert_eq!(v.len(), 384);
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-4, "expected unit norm, got {norm}");
        }
    }

    #[test]
    fn similar_texts_are_closer() {
        let mut embedder = SentenceEmbedder::load(&require_model()).unwrap();
        let vecs = embedder
            .embed_batch(&[
                "the package will be delivered at midnight",
                "the courier drops the payload at dawn",
                "my cat enjoys sleeping in the sun",
            ])
            .unwrap();

        let dot = |a: &[f32], b: &[f32]| a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
        assert!(
            dot(&vecs[0], &vecs[1]) > dot(&vecs[0], &vecs[2]),
            "delivery texts should be more similar than delivery vs cat"
        );
    }

    #[test]
    fn empty_batch() {
        let mut embedder = SentenceEmbedder::load(&require_model()).unwrap();
        assert!(embedder.embed_batch(&[]).unwrap().is_empty());
    }
}
