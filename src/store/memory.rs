use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::error::StoreError;
use super::model::{
    CandidateRecord, CvChunkRecord, CvRecord, JobDescriptionRecord, NoteRecord, QuestionRecord,
    QuestionScope, SessionRecord,
};
use super::repository::{
    CandidateRepository, CvRepository, JobRepository, NoteRepository, QuestionRepository,
    SessionRepository, StoreResult,
};

/// Serializable copy of every table the engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
    #[serde(default)]
    pub cvs: Vec<CvRecord>,
    #[serde(default)]
    pub cv_chunks: Vec<CvChunkRecord>,
    #[serde(default)]
    pub job_descriptions: Vec<JobDescriptionRecord>,
    #[serde(default)]
    pub notes: Vec<NoteRecord>,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    /// `false` for schemas where questions cannot be tied to a session.
    #[serde(default = "default_session_questions_supported")]
    pub session_questions_supported: bool,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            candidates: Vec::new(),
            cvs: Vec::new(),
            cv_chunks: Vec::new(),
            job_descriptions: Vec::new(),
            notes: Vec::new(),
            questions: Vec::new(),
            session_questions_supported: true,
        }
    }
}

impl StoreSnapshot {
    pub fn from_json(json: &str, origin: &Path) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|source| StoreError::SnapshotParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw, path)
    }
}

fn default_session_questions_supported() -> bool {
    true
}

/// Repository implementation over an in-process [`StoreSnapshot`].
///
/// Reads clone the matching records so no lock is held past a single call.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreSnapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
        }
    }

    /// Loads a JSON snapshot from disk.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let snapshot = StoreSnapshot::load(path)?;
        info!(
            path = %path.display(),
            sessions = snapshot.sessions.len(),
            cvs = snapshot.cvs.len(),
            chunks = snapshot.cv_chunks.len(),
            questions = snapshot.questions.len(),
            "Loaded store snapshot"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.data.read().clone()
    }

    pub fn set_session_questions_supported(&self, supported: bool) {
        self.data.write().session_questions_supported = supported;
    }

    pub fn insert_session(&self, record: SessionRecord) {
        self.data.write().sessions.push(record);
    }

    pub fn insert_candidate(&self, record: CandidateRecord) {
        self.data.write().candidates.push(record);
    }

    pub fn insert_cv(&self, record: CvRecord) {
        self.data.write().cvs.push(record);
    }

    pub fn insert_cv_chunk(&self, record: CvChunkRecord) {
        self.data.write().cv_chunks.push(record);
    }

    pub fn insert_job_description(&self, record: JobDescriptionRecord) {
        self.data.write().job_descriptions.push(record);
    }

    pub fn insert_note(&self, record: NoteRecord) {
        self.data.write().notes.push(record);
    }

    pub fn insert_question(&self, record: QuestionRecord) {
        self.data.write().questions.push(record);
    }

    /// Marks a question as asked. Returns `false` if no question has this id.
    pub fn mark_asked(
        &self,
        question_id: Uuid,
        asked_by: Option<String>,
        at: DateTime<Utc>,
    ) -> bool {
        let mut data = self.data.write();
        match data.questions.iter_mut().find(|q| q.id == question_id) {
            Some(question) => {
                question.asked_at = Some(at);
                question.asked_by = asked_by;
                true
            }
            None => false,
        }
    }
}

impl SessionRepository for InMemoryStore {
    async fn fetch_session(&self, session_id: Uuid) -> StoreResult<Option<SessionRecord>> {
        Ok(self
            .data
            .read()
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .cloned())
    }

    async fn fetch_sessions(&self) -> StoreResult<Vec<SessionRecord>> {
        let mut sessions = self.data.read().sessions.clone();
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(sessions)
    }
}

impl CandidateRepository for InMemoryStore {
    async fn fetch_candidate(&self, candidate_id: Uuid) -> StoreResult<Option<CandidateRecord>> {
        Ok(self
            .data
            .read()
            .candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .cloned())
    }
}

impl CvRepository for InMemoryStore {
    async fn fetch_active_cv(&self, candidate_id: Uuid) -> StoreResult<Option<CvRecord>> {
        let data = self.data.read();
        let mut active: Vec<&CvRecord> = data
            .cvs
            .iter()
            .filter(|cv| cv.candidate_id == candidate_id && cv.is_active)
            .collect();
        if active.len() > 1 {
            debug!(candidate_id = %candidate_id, count = active.len(), "Multiple active CVs");
        }
        // Newest first, undated last.
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active.first().map(|cv| (*cv).clone()))
    }

    async fn fetch_cv(&self, cv_id: Uuid) -> StoreResult<Option<CvRecord>> {
        Ok(self.data.read().cvs.iter().find(|cv| cv.id == cv_id).cloned())
    }

    async fn fetch_cv_chunks(&self, cv_id: Uuid) -> StoreResult<Vec<CvChunkRecord>> {
        Ok(self
            .data
            .read()
            .cv_chunks
            .iter()
            .filter(|chunk| chunk.cv_id == cv_id)
            .cloned()
            .collect())
    }

    async fn fetch_all_cv_chunks(&self) -> StoreResult<Vec<CvChunkRecord>> {
        Ok(self.data.read().cv_chunks.clone())
    }
}

impl NoteRepository for InMemoryStore {
    async fn fetch_recent_notes(
        &self,
        session_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<NoteRecord>> {
        let mut notes: Vec<NoteRecord> = self
            .data
            .read()
            .notes
            .iter()
            .rev()
            .filter(|n| n.session_id == session_id)
            .cloned()
            .collect();
        // Newest first; later inserts win ties.
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes.truncate(limit);
        Ok(notes)
    }

    async fn fetch_session_notes(&self, session_id: Uuid) -> StoreResult<Vec<NoteRecord>> {
        let mut notes: Vec<NoteRecord> = self
            .data
            .read()
            .notes
            .iter()
            .filter(|n| n.session_id == session_id)
            .cloned()
            .collect();
        sort_chronological(&mut notes, |n| n.created_at);
        Ok(notes)
    }
}

impl JobRepository for InMemoryStore {
    async fn fetch_job_description(
        &self,
        job_description_id: Uuid,
    ) -> StoreResult<Option<JobDescriptionRecord>> {
        Ok(self
            .data
            .read()
            .job_descriptions
            .iter()
            .find(|jd| jd.id == job_description_id)
            .cloned())
    }
}

impl QuestionRepository for InMemoryStore {
    async fn fetch_question_pool(
        &self,
        scope: QuestionScope,
        exclude_asked: bool,
    ) -> StoreResult<Vec<QuestionRecord>> {
        let data = self.data.read();
        if matches!(scope, QuestionScope::Session(_)) && !data.session_questions_supported {
            return Err(StoreError::UnsupportedScope { scope });
        }

        Ok(data
            .questions
            .iter()
            .filter(|q| match scope {
                QuestionScope::Session(id) => q.session_id == Some(id),
                QuestionScope::JobDescription(id) => q.job_description_id == id,
            })
            .filter(|q| !(exclude_asked && q.is_asked()))
            .cloned()
            .collect())
    }

    async fn fetch_session_questions(&self, session_id: Uuid) -> StoreResult<Vec<QuestionRecord>> {
        let data = self.data.read();
        if !data.session_questions_supported {
            return Err(StoreError::UnsupportedScope {
                scope: QuestionScope::Session(session_id),
            });
        }

        let mut questions: Vec<QuestionRecord> = data
            .questions
            .iter()
            .filter(|q| q.session_id == Some(session_id))
            .cloned()
            .collect();
        drop(data);
        sort_chronological(&mut questions, |q| q.created_at);
        Ok(questions)
    }
}

/// Oldest first, undated last. Stable for equal timestamps.
fn sort_chronological<T>(items: &mut [T], key: impl Fn(&T) -> Option<DateTime<Utc>>) {
    items.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
