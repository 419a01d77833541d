use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::info;

use super::error::EmbeddingError;
use super::minilm::{MiniLmConfig, MiniLmEmbedder};
use super::TextEmbedder;

/// Embedder that loads its model on first use and keeps it for the process lifetime.
///
/// Loading happens at most once. Concurrent first callers wait on `init` while a single
/// thread loads; a failed load is not cached, so the next call retries.
pub struct LazyEmbedder {
    config: MiniLmConfig,
    cell: OnceLock<MiniLmEmbedder>,
    init: Mutex<()>,
}

impl LazyEmbedder {
    pub fn new(config: MiniLmConfig) -> Self {
        Self {
            config,
            cell: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Returns the loaded embedder, loading it if needed.
    pub fn get(&self) -> Result<&MiniLmEmbedder, EmbeddingError> {
        if let Some(embedder) = self.cell.get() {
            return Ok(embedder);
        }

        let _guard = self.init.lock();
        if let Some(embedder) = self.cell.get() {
            return Ok(embedder);
        }

        info!(stub = self.config.is_stub(), "Loading embedding model (first use)");
        let embedder = MiniLmEmbedder::load(self.config.clone())?;
        Ok(self.cell.get_or_init(|| embedder))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }
}

impl TextEmbedder for LazyEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.get()?.embed(text)
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }
}

static GLOBAL_EMBEDDER: OnceLock<Arc<LazyEmbedder>> = OnceLock::new();

/// Process-wide embedder handle.
///
/// The first caller's config wins; later calls return the same handle regardless of the
/// config they pass.
pub fn global_embedder(config: &MiniLmConfig) -> Arc<LazyEmbedder> {
    GLOBAL_EMBEDDER
        .get_or_init(|| Arc::new(LazyEmbedder::new(config.clone())))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_embedder_loads_on_first_use() {
        let lazy = LazyEmbedder::new(MiniLmConfig::stub().with_embedding_dim(8));
        assert!(!lazy.is_loaded());
        assert_eq!(lazy.embedding_dim(), 8);

        let v = lazy.embed("hello").unwrap();
        assert_eq!(v.len(), 8);
        assert!(lazy.is_loaded());

        let first = lazy.get().unwrap() as *const MiniLmEmbedder;
        let second = lazy.get().unwrap() as *const MiniLmEmbedder;
        assert_eq!(first, second);
    }

    #[test]
    fn test_lazy_embedder_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let lazy = LazyEmbedder::new(MiniLmConfig::new(dir.path().join("missing")));

        assert!(lazy.embed("x").is_err());
        assert!(!lazy.is_loaded());
        assert!(lazy.embed("x").is_err());
    }

    #[test]
    fn test_lazy_embedder_shared_across_threads() {
        let lazy = Arc::new(LazyEmbedder::new(MiniLmConfig::stub().with_embedding_dim(4)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                std::thread::spawn(move || lazy.embed("same").unwrap())
            })
            .collect();

        let results: Vec<Vec<f32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_global_embedder_is_singleton() {
        let a = global_embedder(&MiniLmConfig::stub());
        let b = global_embedder(&MiniLmConfig::stub().with_embedding_dim(2));
        assert!(Arc::ptr_eq(&a, &b));
    }
}
