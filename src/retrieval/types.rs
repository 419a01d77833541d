use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scoreable entry of a retrieval pool, as snapshotted at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolItem<P> {
    pub id: Uuid,
    pub payload: P,
    /// Missing when embedding failed upstream; such items are never ranked.
    pub vector: Option<Vec<f32>>,
}

impl<P> PoolItem<P> {
    pub fn new(id: Uuid, payload: P, vector: Option<Vec<f32>>) -> Self {
        Self {
            id,
            payload,
            vector,
        }
    }
}

/// A pool item annotated with its cosine distance to the query. Lower is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem<P> {
    pub id: Uuid,
    #[serde(flatten)]
    pub payload: P,
    pub distance: f32,
}

impl<P> ScoredItem<P> {
    /// Returns `true` if the distance is within `threshold` (inclusive).
    pub fn within(&self, threshold: f32) -> bool {
        self.distance <= threshold
    }
}

/// Display payload of a CV chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub content: String,
    pub page_number: Option<i32>,
    pub chunk_index: i32,
}

/// Display payload of a preloaded interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub question_text: String,
}

pub type ScoredChunk = ScoredItem<ChunkPayload>;
pub type ScoredQuestion = ScoredItem<QuestionPayload>;
