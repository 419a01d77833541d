//! Cross-cutting, shared constants.
//!
//! # Dimension Invariants
//!
//! Every vector compared by the engine (notes, CV chunks, questions, job descriptions)
//! must come from the same embedding space. The compile-time default matches the
//! MiniLM-L6 sentence encoder; [`validate_embedding_dim`] checks a loaded model against
//! the configured dimension.

pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max distance for a CV chunk to count as trustworthy evidence.
pub const DEFAULT_CHUNK_MAX_DISTANCE: f32 = 0.58;

/// Max distance for the best preloaded question to be suggested.
pub const DEFAULT_QUESTION_MAX_DISTANCE: f32 = 0.60;

/// Similarity below which the conversation is HIGH risk.
pub const HIGH_RISK_SIMILARITY: f32 = 0.3;

/// Similarity below which the conversation is MEDIUM risk.
pub const MEDIUM_RISK_SIMILARITY: f32 = 0.5;

pub const DEFAULT_NOTES_WINDOW: usize = 5;
pub const DEFAULT_TOP_K_QUESTIONS: usize = 3;
pub const DEFAULT_TOP_K_CHUNKS: usize = 3;
pub const DEFAULT_COVERAGE_TOP_K: usize = 5;

pub const MAX_NOTES_WINDOW: usize = 20;
pub const MAX_TOP_K: usize = 10;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimValidationError {
    #[error("embedding dimension cannot be zero")]
    ZeroDimension,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Validates that a runtime embedding dimension is non-zero and matches the expected one.
///
/// # Example
///
/// ```
/// use copilot::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// let embedder_dim = 384;
/// validate_embedding_dim(embedder_dim, DEFAULT_EMBEDDING_DIM).unwrap();
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_embedding_dim_zero() {
        assert_eq!(
            validate_embedding_dim(0, DEFAULT_EMBEDDING_DIM),
            Err(DimValidationError::ZeroDimension)
        );
        assert_eq!(
            validate_embedding_dim(0, 0),
            Err(DimValidationError::ZeroDimension)
        );
    }

    #[test]
    fn test_validate_embedding_dim_mismatch() {
        assert!(validate_embedding_dim(384, 384).is_ok());
        assert_eq!(
            validate_embedding_dim(768, 384),
            Err(DimValidationError::DimensionMismatch {
                expected: 384,
                actual: 768
            })
        );
    }

    #[test]
    fn test_risk_bands_are_ordered() {
        assert!(HIGH_RISK_SIMILARITY < MEDIUM_RISK_SIMILARITY);
        assert!(DEFAULT_CHUNK_MAX_DISTANCE < DEFAULT_QUESTION_MAX_DISTANCE);
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::ZeroDimension;
        assert_eq!(err.to_string(), "embedding dimension cannot be zero");

        let err = DimValidationError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 384, got 768");
    }
}
