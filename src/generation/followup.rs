use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::scoring::RiskLevel;

use super::error::{GenerationError, GenerationResult};
use super::fallback::FallbackQuestions;
use super::prompt::{Prompt, followup_prompt};
use super::TextGenerator;

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_millis(8000);
pub const DEFAULT_GENERATION_TEMPERATURE: f64 = 0.4;
pub const DEFAULT_LANGUAGE: &str = "Italian";

/// Where a generated text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationSource {
    #[default]
    Model,
    Fallback,
}

/// Follow-up question returned to the interviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub text: String,
    pub source: GenerationSource,
}

impl GeneratedQuestion {
    pub fn is_fallback(&self) -> bool {
        self.source == GenerationSource::Fallback
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub timeout: Duration,
    pub temperature: f64,
    pub language: String,
    pub fallbacks: FallbackQuestions,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::for_language(DEFAULT_LANGUAGE)
    }
}

impl GenerationSettings {
    /// Default timeout and temperature with fallbacks in `language`.
    pub fn for_language(language: &str) -> Self {
        Self {
            timeout: DEFAULT_GENERATION_TIMEOUT,
            temperature: DEFAULT_GENERATION_TEMPERATURE,
            language: language.to_string(),
            fallbacks: FallbackQuestions::for_language(language),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: FallbackQuestions) -> Self {
        self.fallbacks = fallbacks;
        self
    }
}

/// Wraps a [`TextGenerator`] with the follow-up prompt, a time budget and canned
/// fallbacks. Never returns an error.
#[derive(Clone)]
pub struct FollowupGenerator {
    backend: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
}

impl std::fmt::Debug for FollowupGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FollowupGenerator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl FollowupGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self { backend, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn fallbacks(&self) -> &FallbackQuestions {
        &self.settings.fallbacks
    }

    /// Asks for one follow-up question given the job text and the composed call context.
    ///
    /// Provider errors and timeouts yield the fallback for `risk`; a blank answer yields
    /// the generic default.
    pub async fn generate(
        &self,
        job_text: &str,
        call_context: &str,
        risk: RiskLevel,
    ) -> GeneratedQuestion {
        let mut prompt = followup_prompt(&self.settings.language, job_text, call_context, risk);
        prompt.temperature = Some(self.settings.temperature);

        match self.complete(&prompt).await {
            Ok(text) => {
                debug!(risk = %risk, "Generated follow-up question");
                GeneratedQuestion {
                    text,
                    source: GenerationSource::Model,
                }
            }
            Err(GenerationError::EmptyResponse) => {
                warn!(risk = %risk, "Model returned no question; using default fallback");
                GeneratedQuestion {
                    text: self.settings.fallbacks.default.clone(),
                    source: GenerationSource::Fallback,
                }
            }
            Err(e) => {
                warn!(risk = %risk, error = %e, "Follow-up generation failed; using risk fallback");
                GeneratedQuestion {
                    text: self.settings.fallbacks.for_risk(risk).to_string(),
                    source: GenerationSource::Fallback,
                }
            }
        }
    }

    /// Calls the backend within the configured timeout.
    pub(super) async fn complete(&self, prompt: &Prompt) -> GenerationResult<String> {
        let timeout = self.settings.timeout;
        match tokio::time::timeout(timeout, self.backend.complete(prompt)).await {
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    Err(GenerationError::EmptyResponse)
                } else {
                    Ok(text.to_string())
                }
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(GenerationError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }
}
