//! In-memory interview data built around three orthogonal axes.
//!
//! `AXIS_JOB` is the job description direction; notes, chunks and questions are placed
//! relative to it so distances are easy to reason about (`1 - dot`).

use std::sync::Arc;

use chrono::DateTime;
use uuid::Uuid;

use copilot::embedding::{FixedEmbedder, TextEmbedder};
use copilot::generation::{FollowupGenerator, GenerationSettings, TextGenerator};
use copilot::orchestrator::CopilotEngine;
use copilot::retrieval::ReliabilityThresholds;
use copilot::store::{
    CandidateRecord, CvChunkRecord, CvRecord, InMemoryStore, JobDescriptionRecord, NoteRecord,
    QuestionRecord, SessionRecord, SessionStatus,
};

pub const DIM: usize = 3;
pub const AXIS_JOB: [f32; 3] = [1.0, 0.0, 0.0];
pub const AXIS_SIDE: [f32; 3] = [0.0, 1.0, 0.0];
pub const AXIS_OFF_TOPIC: [f32; 3] = [0.0, 0.0, 1.0];

pub const JOB_TITLE: &str = "Senior Rust Engineer";
pub const JOB_TEXT: &str = "Design and operate Rust services on Kubernetes.";
pub const CANDIDATE_NAME: &str = "Grace Hopper";

pub struct InterviewFixture {
    pub store: Arc<InMemoryStore>,
    pub session_id: Uuid,
    pub candidate_id: Uuid,
    pub cv_id: Uuid,
    pub job_id: Uuid,
}

impl InterviewFixture {
    /// Session with a candidate, an active CV on the job axis and a job with a stored vector.
    pub fn new() -> Self {
        Self::with_job_vector(Some(AXIS_JOB.to_vec()))
    }

    pub fn with_job_vector(job_vector: Option<Vec<f32>>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let session_id = Uuid::new_v4();
        let candidate_id = Uuid::new_v4();
        let cv_id = Uuid::new_v4();
        let job_id = Uuid::new_v4();

        store.insert_session(SessionRecord {
            id: session_id,
            candidate_id,
            job_description_id: job_id,
            status: SessionStatus::Live,
            started_at: DateTime::from_timestamp(1_700_000_000, 0),
            ended_at: None,
        });
        store.insert_candidate(CandidateRecord {
            id: candidate_id,
            full_name: CANDIDATE_NAME.to_string(),
            email: Some("grace@example.com".to_string()),
        });
        store.insert_cv(CvRecord {
            id: cv_id,
            candidate_id,
            is_active: true,
            created_at: DateTime::from_timestamp(1_690_000_000, 0),
            vector: Some(vec![0.8, 0.6, 0.0]),
        });
        store.insert_job_description(JobDescriptionRecord {
            id: job_id,
            title: JOB_TITLE.to_string(),
            description_text: JOB_TEXT.to_string(),
            vector: job_vector,
        });

        Self {
            store,
            session_id,
            candidate_id,
            cv_id,
            job_id,
        }
    }

    pub fn add_note(&self, text: &str, vector: Option<[f32; 3]>, secs: i64) {
        self.store.insert_note(NoteRecord {
            id: Uuid::new_v4(),
            session_id: self.session_id,
            author: Some("recruiter".to_string()),
            note_text: text.to_string(),
            vector: vector.map(|v| v.to_vec()),
            created_at: DateTime::from_timestamp(1_700_000_000 + secs, 0),
        });
    }

    pub fn add_chunk(&self, content: &str, chunk_index: i32, vector: [f32; 3]) -> Uuid {
        let id = Uuid::new_v4();
        self.store.insert_cv_chunk(CvChunkRecord {
            id,
            cv_id: self.cv_id,
            content: content.to_string(),
            page_number: Some(1),
            chunk_index,
            vector: Some(vector.to_vec()),
        });
        id
    }

    /// Adds a preloaded question; `in_session` ties it to this fixture's session.
    pub fn add_question(&self, text: &str, in_session: bool, vector: [f32; 3]) -> Uuid {
        let id = Uuid::new_v4();
        self.store.insert_question(QuestionRecord {
            id,
            job_description_id: self.job_id,
            session_id: in_session.then_some(self.session_id),
            question_text: text.to_string(),
            vector: Some(vector.to_vec()),
            asked_at: None,
            asked_by: None,
            created_at: DateTime::from_timestamp(1_699_999_000, 0),
        });
        id
    }

    /// Engine with an embedder that maps every text onto the job axis.
    pub fn engine(&self, backend: Arc<dyn TextGenerator>) -> CopilotEngine<InMemoryStore> {
        let embedder = FixedEmbedder::new(DIM).with_fallback(AXIS_JOB.to_vec());
        self.engine_with(Arc::new(embedder), backend)
    }

    pub fn engine_with(
        &self,
        embedder: Arc<dyn TextEmbedder>,
        backend: Arc<dyn TextGenerator>,
    ) -> CopilotEngine<InMemoryStore> {
        CopilotEngine::new(
            Arc::clone(&self.store),
            embedder,
            FollowupGenerator::new(backend, GenerationSettings::default()),
            ReliabilityThresholds::default(),
        )
    }
}
