use thiserror::Error;
use uuid::Uuid;

use crate::context::ContextError;
use crate::embedding::EmbeddingError;
use crate::store::StoreError;
use crate::vector::VectorError;

/// Kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Session,
    Candidate,
    Cv,
    ActiveCv,
    JobDescription,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Entity::Session => "session",
            Entity::Candidate => "candidate",
            Entity::Cv => "CV",
            Entity::ActiveCv => "active CV for candidate",
            Entity::JobDescription => "job description",
        })
    }
}

#[derive(Debug, Error)]
/// Errors surfaced by [`CopilotEngine`](super::CopilotEngine) operations.
pub enum CopilotError {
    /// A record required to answer the request does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: Uuid },

    /// Request parameters out of range.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Vectors of different dimensions were compared.
    #[error(transparent)]
    DimensionMismatch(#[from] VectorError),

    /// No context vector could be produced.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// A record that must carry a stored vector has none.
    #[error("{entity} {id} has no stored embedding")]
    MissingEmbedding { entity: Entity, id: Uuid },

    /// The CV has no chunk text to draft questions from.
    #[error("CV {cv_id} has no text")]
    EmptyCv { cv_id: Uuid },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl CopilotError {
    pub fn not_found(entity: Entity, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ContextError> for CopilotError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Vector(e) => Self::DimensionMismatch(e),
            ContextError::Embedding(e) => Self::Embedding(e),
        }
    }
}

pub type CopilotResult<T> = Result<T, CopilotError>;
