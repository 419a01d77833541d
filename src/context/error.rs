use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vector::VectorError;

#[derive(Debug, Error)]
/// Failures while deriving a session context vector.
pub enum ContextError {
    /// Note vectors disagree on dimension.
    #[error(transparent)]
    Vector(#[from] VectorError),

    /// The job description had to be embedded on demand and that failed.
    #[error("failed to embed job description: {0}")]
    Embedding(#[from] EmbeddingError),
}
