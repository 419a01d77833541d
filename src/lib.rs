//! Interview copilot library crate (used by the snapshot runner and integration tests).
//!
//! # Public API Surface
//!
//! The engine answers "what should the interviewer ask next?" for a live session by
//! combining recent notes, the candidate's CV and the job description. Exports are
//! organized by module:
//!
//! ## Engine
//! - [`CopilotEngine`] - next-question, live-suggestion, coverage, search and recap flows,
//!   plus session listing, session timelines and CV question plans
//! - [`NextQuestionRequest`], [`NextQuestionDecision`], [`LiveSuggestion`], [`SessionRecap`]
//! - [`CopilotError`] - fatal lookup and input errors (advisory steps degrade instead)
//!
//! ## Building Blocks
//! - [`vector`] - dot product, cosine distance, normalization, averaging
//! - [`context`] - rolling session context with job-description fallback
//! - [`scoring`] - similarity, risk bands and coverage
//! - [`retrieval`] - ranking and reliability gating
//!
//! ## Collaborators
//! - [`TextEmbedder`], [`MiniLmEmbedder`], [`LazyEmbedder`] - embeddings
//! - [`TextGenerator`], [`FollowupGenerator`], [`GenaiGenerator`] - question generation
//! - [`CopilotStore`], [`InMemoryStore`] - read-side data access
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `COPILOT_*` environment settings
//!
//! ## Test/Mock Support
//! Mock embedders and failing generators are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod context;
pub mod embedding;
pub mod generation;
pub mod orchestrator;
pub mod retrieval;
pub mod scoring;
pub mod store;
pub mod vector;

pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use context::{ContextError, ContextSource, SessionContext, build_context};
pub use embedding::{
    EmbeddingError, LazyEmbedder, MINILM_EMBEDDING_DIM, MiniLmConfig, MiniLmEmbedder,
    TextEmbedder, global_embedder,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{FailingEmbedder, FixedEmbedder};
pub use generation::{
    FallbackQuestions, FollowupGenerator, GenaiGenerator, GeneratedQuestion, GeneratedQuestionSet,
    GenerationError, GenerationSettings, GenerationSource, LlmRecap, MockGenerator, TextGenerator,
};
#[cfg(any(test, feature = "mock"))]
pub use generation::{FailingGenerator, SlowGenerator};
pub use orchestrator::{
    CopilotEngine, CopilotError, CopilotResult, CoverageReport, CvQuestionPlan, Entity,
    LiveSuggestion, LiveSuggestionRequest, NextQuestionDecision, NextQuestionRequest,
    QuestionPoolScope, SessionRecap, SessionSummary, SessionTimeline, Signals, TimelineEntry,
};
pub use retrieval::{ReliabilityThresholds, ScoredChunk, ScoredQuestion};
pub use scoring::{CoverageScore, RiskAssessment, RiskLevel};
pub use store::{CopilotStore, InMemoryStore, StoreError, StoreSnapshot};
pub use vector::VectorError;
