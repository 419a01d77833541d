use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::retrieval::{ChunkPayload, PoolItem, QuestionPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Live,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_description_id: Uuid,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvRecord {
    pub id: Uuid,
    pub candidate_id: Uuid,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Whole-document embedding used for coverage.
    #[serde(default)]
    pub vector: Option<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvChunkRecord {
    pub id: Uuid,
    pub cv_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub page_number: Option<i32>,
    pub chunk_index: i32,
    #[serde(default)]
    pub vector: Option<Vec<f32>>,
}

impl CvChunkRecord {
    pub fn into_pool_item(self) -> PoolItem<ChunkPayload> {
        PoolItem::new(
            self.id,
            ChunkPayload {
                content: self.content,
                page_number: self.page_number,
                chunk_index: self.chunk_index,
            },
            self.vector,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionRecord {
    pub id: Uuid,
    pub title: String,
    pub description_text: String,
    #[serde(default)]
    pub vector: Option<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: Uuid,
    pub session_id: Uuid,
    #[serde(default)]
    pub author: Option<String>,
    pub note_text: String,
    /// Missing when embedding failed at capture time.
    #[serde(default)]
    pub vector: Option<Vec<f32>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: Uuid,
    pub job_description_id: Uuid,
    /// Set for questions a recruiter added during a specific session.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub question_text: String,
    #[serde(default)]
    pub vector: Option<Vec<f32>>,
    #[serde(default)]
    pub asked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub asked_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuestionRecord {
    pub fn is_asked(&self) -> bool {
        self.asked_at.is_some()
    }

    pub fn into_pool_item(self) -> PoolItem<QuestionPayload> {
        PoolItem::new(
            self.id,
            QuestionPayload {
                question_text: self.question_text,
            },
            self.vector,
        )
    }
}

/// Which slice of the question bank a pool lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum QuestionScope {
    Session(Uuid),
    JobDescription(Uuid),
}

impl std::fmt::Display for QuestionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionScope::Session(id) => write!(f, "questions(session={id})"),
            QuestionScope::JobDescription(id) => write!(f, "questions(job={id})"),
        }
    }
}

fn default_true() -> bool {
    true
}
