use std::path::PathBuf;
use thiserror::Error;

/// Failures of the embedding collaborator.
///
/// Any of these aborts the current request; the engine has no fallback vector.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// `COPILOT_EMBEDDING_MODEL_PATH` points at a directory that does not exist.
    #[error("MiniLM model directory not found: {path}")]
    ModelNotFound { path: PathBuf },

    /// Weights or `config.json` are missing or unreadable.
    #[error("could not load MiniLM model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("could not embed text: {reason}")]
    InferenceFailed { reason: String },

    #[error("could not tokenize text: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A tensor operation failed inside candle.
    #[error("tensor backend error: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("could not read model file: {0}")]
    Io(#[from] std::io::Error),
}
