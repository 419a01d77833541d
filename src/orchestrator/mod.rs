//! End-to-end suggestion flow.
//!
//! [`CopilotEngine::compute_next_question`] runs the full pipeline for a session:
//! context → risk → question pool fallback → ranking → reliability gating → generation.
//! Identity lookups are fatal; every advisory step degrades to a flagged fallback.

mod engine;
mod error;
mod types;


pub use engine::CopilotEngine;
pub use error::{CopilotError, CopilotResult, Entity};
pub use types::{
    CoverageReport, CvQuestionPlan, LiveSuggestion, LiveSuggestionRequest, NextQuestionDecision,
    NextQuestionRequest, NoteEntry, QuestionEntry, QuestionPoolScope, SessionInfo,
    SessionQuestions, SessionRecap, SessionSummary, SessionTimeline, Signals, TimelineEntry,
    TimelineKind,
};
