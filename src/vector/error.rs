use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Errors returned by vector math.
pub enum VectorError {
    /// Two vectors from different embedding spaces were compared.
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the reference vector.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },
}
