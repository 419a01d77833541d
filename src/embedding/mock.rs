use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::EmbeddingError;
use super::TextEmbedder;

/// Embedder that returns preconfigured vectors per text.
#[derive(Debug, Default)]
pub struct FixedEmbedder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    fallback: Option<Vec<f32>>,
    calls: AtomicUsize,
}

impl FixedEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    /// Maps `text` to `vector`.
    pub fn with_text(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    /// Vector returned for any unmapped text.
    pub fn with_fallback(mut self, vector: Vec<f32>) -> Self {
        self.fallback = Some(vector);
        self
    }

    /// Number of `embed` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextEmbedder for FixedEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vectors
            .get(text)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: format!("no fixed vector for text '{text}'"),
            })
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}

/// Embedder whose every call fails.
#[derive(Debug, Default)]
pub struct FailingEmbedder {
    pub dim: usize,
}

impl TextEmbedder for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed {
            reason: "embedding backend unavailable".to_string(),
        })
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}
