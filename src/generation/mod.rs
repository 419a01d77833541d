//! Text-generation collaborator.
//!
//! [`TextGenerator`] is the raw seam to a chat model. [`FollowupGenerator`] owns the
//! prompts, the time budget and the fallback table, and turns every failure into a
//! typed fallback result.

pub mod cv_questions;
mod error;
pub mod fallback;
pub mod followup;
pub mod mock;
pub mod prompt;
pub mod provider;
pub mod recap;


use async_trait::async_trait;

pub use cv_questions::{GeneratedQuestionSet, parse_question_lines};
pub use error::{GenerationError, GenerationResult};
pub use fallback::FallbackQuestions;
pub use followup::{
    DEFAULT_GENERATION_TEMPERATURE, DEFAULT_GENERATION_TIMEOUT, DEFAULT_LANGUAGE,
    FollowupGenerator, GeneratedQuestion, GenerationSettings, GenerationSource,
};
pub use mock::{MOCK_RESPONSE, MockGenerator};
#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingGenerator, SlowGenerator};
pub use prompt::{
    CV_QUESTION_COUNT, CvQuestionsPromptInput, Prompt, RecapPromptInput, compose_call_context,
};
pub use provider::GenaiGenerator;
pub use recap::{LlmRecap, parse_recap};

#[async_trait]
/// A chat model: one prompt in, one text out.
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> GenerationResult<String>;
}
