use super::*;
use crate::vector::{cosine_distance, l2_norm};

#[test]
fn test_default_config_is_stub() {
    let config = MiniLmConfig::default();
    assert!(config.is_stub());
    assert_eq!(config.embedding_dim, 384);
    assert_eq!(config.max_seq_len, MINILM_MAX_SEQ_LEN);
}

#[test]
fn test_config_validation() {
    assert!(MiniLmConfig::stub().validate().is_ok());
    assert!(MiniLmConfig::stub().with_embedding_dim(0).validate().is_err());
    assert!(MiniLmConfig::new("").validate().is_err());

    let config = MiniLmConfig {
        max_seq_len: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(EmbeddingError::InvalidConfig { .. })
    ));
}

#[test]
fn test_stub_embedding_is_unit_length_and_sized() {
    let embedder = MiniLmEmbedder::load(MiniLmConfig::stub()).unwrap();
    assert!(embedder.is_stub());

    let v = embedder.embed("Kubernetes rollout strategies").unwrap();
    assert_eq!(v.len(), 384);
    assert!((l2_norm(&v) - 1.0).abs() < 1e-4);
}

#[test]
fn test_stub_embedding_is_deterministic() {
    let embedder = MiniLmEmbedder::load(MiniLmConfig::stub()).unwrap();

    let a = embedder.embed("same text").unwrap();
    let b = embedder.embed("same text").unwrap();
    let c = embedder.embed("other text").unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(cosine_distance(&a, &b).unwrap().abs() < 1e-5);
}

#[test]
fn test_stub_respects_custom_dimension() {
    let embedder = MiniLmEmbedder::load(MiniLmConfig::stub().with_embedding_dim(16)).unwrap();
    assert_eq!(embedder.embedding_dim(), 16);
    assert_eq!(embedder.embed("x").unwrap().len(), 16);
}

#[test]
fn test_missing_model_dir_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = MiniLmEmbedder::load(MiniLmConfig::new(&missing)).unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_model_dir_without_weights_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();

    let err = MiniLmEmbedder::load(MiniLmConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelLoadFailed { .. }));
}

#[test]
fn test_debug_does_not_dump_weights() {
    let embedder = MiniLmEmbedder::load(MiniLmConfig::stub()).unwrap();
    let debug = format!("{:?}", embedder);
    assert!(debug.contains("Stub"));
    assert!(debug.contains("384"));
}
