use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default MiniLM output dimension.
pub const MINILM_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// MiniLM-L6 was trained on 256-token windows.
pub const MINILM_MAX_SEQ_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq)]
/// Configuration for [`MiniLmEmbedder`](super::MiniLmEmbedder).
pub struct MiniLmConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    /// `None` runs the deterministic stub.
    pub model_dir: Option<PathBuf>,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Output embedding dimension. Must match the model's hidden size.
    pub embedding_dim: usize,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: MINILM_MAX_SEQ_LEN,
            embedding_dim: MINILM_EMBEDDING_DIM,
        }
    }
}

impl MiniLmConfig {
    /// Creates a config for the model stored in `model_dir`.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files required).
    pub fn stub() -> Self {
        Self::default()
    }

    /// Overrides the output dimension.
    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    /// Returns `true` when no model directory is configured.
    pub fn is_stub(&self) -> bool {
        self.model_dir.is_none()
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be > 0".to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be > 0".to_string(),
            });
        }

        if let Some(ref dir) = self.model_dir
            && dir.as_os_str().is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir cannot be empty when provided".to_string(),
            });
        }

        Ok(())
    }
}
