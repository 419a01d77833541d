use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_NOTES_WINDOW, DEFAULT_TOP_K_CHUNKS, DEFAULT_TOP_K_QUESTIONS, MAX_NOTES_WINDOW,
    MAX_TOP_K,
};
use crate::context::ContextSource;
use crate::generation::{GeneratedQuestion, GeneratedQuestionSet, LlmRecap};
use crate::retrieval::{ScoredChunk, ScoredQuestion};
use crate::scoring::{CoverageScore, RiskLevel};
use crate::store::SessionStatus;

use super::error::{CopilotError, CopilotResult};

fn check_range(name: &str, value: usize, max: usize) -> CopilotResult<()> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(CopilotError::InvalidRequest {
            reason: format!("{name} must be between 1 and {max}, got {value}"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextQuestionRequest {
    pub session_id: Uuid,
    pub notes_window: usize,
    pub top_k_questions: usize,
    pub top_k_chunks: usize,
}

impl NextQuestionRequest {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            notes_window: DEFAULT_NOTES_WINDOW,
            top_k_questions: DEFAULT_TOP_K_QUESTIONS,
            top_k_chunks: DEFAULT_TOP_K_CHUNKS,
        }
    }

    pub fn with_notes_window(mut self, notes_window: usize) -> Self {
        self.notes_window = notes_window;
        self
    }

    pub fn with_top_k_questions(mut self, k: usize) -> Self {
        self.top_k_questions = k;
        self
    }

    pub fn with_top_k_chunks(mut self, k: usize) -> Self {
        self.top_k_chunks = k;
        self
    }

    /// Window 1..=20, both top-k 1..=10.
    pub fn validate(&self) -> CopilotResult<()> {
        check_range("notes_window", self.notes_window, MAX_NOTES_WINDOW)?;
        check_range("top_k_questions", self.top_k_questions, MAX_TOP_K)?;
        check_range("top_k_chunks", self.top_k_chunks, MAX_TOP_K)
    }
}

/// Which question pool the suggestions were ranked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionPoolScope {
    Session,
    JobDescription,
}

/// Reliability flags shown next to the suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    /// At least one evidence chunk passed the chunk threshold.
    pub chunks_are_reliable: bool,
    pub best_preloaded_is_reliable: bool,
    pub chunk_max_distance: f32,
    pub question_max_distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextQuestionDecision {
    pub session_id: Uuid,
    pub candidate_id: Uuid,
    pub cv_id: Uuid,
    pub job_description_id: Uuid,
    /// Context-to-job similarity, four decimals.
    pub jd_similarity: f32,
    pub risk_level: RiskLevel,
    /// Window notes, oldest first.
    pub context_notes: Vec<String>,
    pub context_source: ContextSource,
    /// `None` unless the closest question passed the question threshold.
    pub best_preloaded_question: Option<ScoredQuestion>,
    /// Closest unasked questions, not threshold-gated.
    pub suggested_preloaded_questions: Vec<ScoredQuestion>,
    pub question_pool: QuestionPoolScope,
    /// Closest CV chunks within the chunk threshold.
    pub evidence_chunks: Vec<ScoredChunk>,
    pub signals: Signals,
    pub generated_next_question: GeneratedQuestion,
}

/// Ad-hoc suggestion for a single note typed during a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSuggestionRequest {
    pub cv_id: Uuid,
    pub job_description_id: Uuid,
    pub note_text: String,
    pub top_k: usize,
}

impl LiveSuggestionRequest {
    pub fn new(cv_id: Uuid, job_description_id: Uuid, note_text: impl Into<String>) -> Self {
        Self {
            cv_id,
            job_description_id,
            note_text: note_text.into(),
            top_k: DEFAULT_TOP_K_CHUNKS,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn validate(&self) -> CopilotResult<()> {
        if self.note_text.trim().is_empty() {
            return Err(CopilotError::InvalidRequest {
                reason: "note_text must not be empty".to_string(),
            });
        }
        check_range("top_k", self.top_k, MAX_TOP_K)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSuggestion {
    pub cv_id: Uuid,
    pub job_description_id: Uuid,
    pub note: String,
    pub jd_similarity: f32,
    pub risk_level: RiskLevel,
    pub best_preloaded_question: Option<ScoredQuestion>,
    pub suggested_preloaded_questions: Vec<ScoredQuestion>,
    /// CV chunks within the chunk threshold.
    pub related_cv_chunks: Vec<ScoredChunk>,
    pub signals: Signals,
    pub generated_followup_question: GeneratedQuestion,
}

/// CV-to-job match plus the chunks that best explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub cv_id: Uuid,
    pub job_description_id: Uuid,
    #[serde(flatten)]
    pub score: CoverageScore,
    pub top_chunks: Vec<ScoredChunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub cv_id: Uuid,
    pub job_description_id: Uuid,
    pub jd_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub author: Option<String>,
    pub note_text: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEntry {
    pub question_id: Uuid,
    pub question_text: String,
    pub asked_at: Option<DateTime<Utc>>,
    pub asked_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionQuestions {
    pub asked: Vec<QuestionEntry>,
    pub unasked: Vec<QuestionEntry>,
}

/// End-of-session summary for the recruiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecap {
    pub session: SessionInfo,
    pub coverage: CoverageReport,
    /// Every note of the session, oldest first.
    pub notes: Vec<NoteEntry>,
    pub questions: SessionQuestions,
    pub llm_recap: LlmRecap,
}

/// What a timeline entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    Note,
    /// A question that was asked; its timestamp is `asked_at`.
    Question,
}

/// One event of a session: a note written or a question asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    /// Note author, or whoever asked the question.
    pub author: Option<String>,
    pub text: String,
    pub asked_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTimeline {
    pub session_id: Uuid,
    /// Oldest first; undated entries last.
    pub timeline: Vec<TimelineEntry>,
}

/// One row of the session overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub job_description_id: Uuid,
    pub jd_title: Option<String>,
    /// `None` without an active CV or without both stored vectors.
    pub coverage_score: Option<f32>,
    pub notes_count: usize,
    pub questions_asked_count: usize,
}

/// Questions drafted for a candidate before the interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvQuestionPlan {
    pub candidate_id: Uuid,
    pub cv_id: Uuid,
    pub job_description_id: Uuid,
    #[serde(flatten)]
    pub generated: GeneratedQuestionSet,
}
