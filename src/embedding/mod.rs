//! Embedding collaborator.
//!
//! - [`TextEmbedder`] is the seam the engine depends on (text → unit vector).
//! - [`minilm`] provides the BERT sentence encoder and its stub mode.
//! - [`lazy`] wraps it in a load-once, process-wide handle.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Load-once embedder handle.
pub mod lazy;
/// MiniLM sentence encoder.
pub mod minilm;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use lazy::{LazyEmbedder, global_embedder};
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingEmbedder, FixedEmbedder};

/// Turns text into a fixed-dimension, L2-normalized vector.
///
/// Implementations are CPU-bound and synchronous.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimension of every vector this embedder returns.
    fn embedding_dim(&self) -> usize;
}
