use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
/// Errors from the text-generation collaborator.
pub enum GenerationError {
    /// The provider rejected or failed the request.
    #[error("generation provider error: {message}")]
    Provider { message: String },

    /// No answer within the configured budget.
    #[error("generation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The provider answered with no text.
    #[error("generation returned an empty response")]
    EmptyResponse,
}

pub type GenerationResult<T> = Result<T, GenerationError>;
