use std::future::Future;

use uuid::Uuid;

use super::error::StoreError;
use super::model::{
    CandidateRecord, CvChunkRecord, CvRecord, JobDescriptionRecord, NoteRecord, QuestionRecord,
    QuestionScope, SessionRecord,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Interview sessions.
pub trait SessionRepository: Send + Sync {
    fn fetch_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<SessionRecord>>> + Send;

    /// Every session, most recently started first; sessions never started sort last.
    fn fetch_sessions(&self) -> impl Future<Output = StoreResult<Vec<SessionRecord>>> + Send;
}

/// Candidates.
pub trait CandidateRepository: Send + Sync {
    fn fetch_candidate(
        &self,
        candidate_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<CandidateRecord>>> + Send;
}

/// CVs and their chunks.
pub trait CvRepository: Send + Sync {
    /// The candidate's active CV. With several active CVs the most recently created
    /// wins; CVs without a creation time sort last.
    fn fetch_active_cv(
        &self,
        candidate_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<CvRecord>>> + Send;

    fn fetch_cv(&self, cv_id: Uuid) -> impl Future<Output = StoreResult<Option<CvRecord>>> + Send;

    /// Chunk pool of one CV.
    fn fetch_cv_chunks(
        &self,
        cv_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<CvChunkRecord>>> + Send;

    /// Chunk pool across every CV.
    fn fetch_all_cv_chunks(&self) -> impl Future<Output = StoreResult<Vec<CvChunkRecord>>> + Send;
}

/// Recruiter notes.
pub trait NoteRepository: Send + Sync {
    /// The `limit` most recent notes of a session, newest first.
    fn fetch_recent_notes(
        &self,
        session_id: Uuid,
        limit: usize,
    ) -> impl Future<Output = StoreResult<Vec<NoteRecord>>> + Send;

    /// Every note of a session in chronological order.
    fn fetch_session_notes(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<NoteRecord>>> + Send;
}

/// Job descriptions.
pub trait JobRepository: Send + Sync {
    fn fetch_job_description(
        &self,
        job_description_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<JobDescriptionRecord>>> + Send;
}

/// Preloaded question bank.
pub trait QuestionRepository: Send + Sync {
    /// Questions in `scope`, optionally without the ones already asked.
    ///
    /// Stores that cannot resolve [`QuestionScope::Session`] return
    /// [`StoreError::UnsupportedScope`].
    fn fetch_question_pool(
        &self,
        scope: QuestionScope,
        exclude_asked: bool,
    ) -> impl Future<Output = StoreResult<Vec<QuestionRecord>>> + Send;

    /// Every question tied to a session, asked or not.
    fn fetch_session_questions(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<QuestionRecord>>> + Send;
}

/// Everything the engine reads.
pub trait CopilotStore:
    SessionRepository
    + CandidateRepository
    + CvRepository
    + NoteRepository
    + JobRepository
    + QuestionRepository
{
}

impl<T> CopilotStore for T where
    T: SessionRepository
        + CandidateRepository
        + CvRepository
        + NoteRepository
        + JobRepository
        + QuestionRepository
{
}
