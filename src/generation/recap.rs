use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::followup::{FollowupGenerator, GenerationSource};
use super::prompt::{RecapPromptInput, recap_prompt};

/// Model-written recap of an interview session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmRecap {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps_or_risks: Vec<String>,
    #[serde(default)]
    pub recommended_next_steps: Vec<String>,
    #[serde(default)]
    pub source: GenerationSource,
}

impl LlmRecap {
    /// Empty recap used when the model could not be called.
    pub fn unavailable() -> Self {
        Self {
            source: GenerationSource::Fallback,
            ..Default::default()
        }
    }
}

#[derive(Deserialize)]
struct RawRecap {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    gaps_or_risks: Vec<String>,
    #[serde(default)]
    recommended_next_steps: Vec<String>,
}

/// Parses model output as a recap.
///
/// Accepts bare JSON or JSON inside a Markdown code fence. Anything else becomes a recap
/// whose summary is the raw text and whose lists are empty.
pub fn parse_recap(raw: &str) -> LlmRecap {
    let trimmed = raw.trim();
    match serde_json::from_str::<RawRecap>(strip_code_fence(trimmed)) {
        Ok(parsed) => LlmRecap {
            summary: parsed.summary,
            strengths: parsed.strengths,
            gaps_or_risks: parsed.gaps_or_risks,
            recommended_next_steps: parsed.recommended_next_steps,
            source: GenerationSource::Model,
        },
        Err(e) => {
            debug!(error = %e, "Recap is not valid JSON; keeping raw text");
            LlmRecap {
                summary: trimmed.to_string(),
                source: GenerationSource::Model,
                ..Default::default()
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

impl FollowupGenerator {
    /// Asks the model for a structured recap of a session.
    pub async fn summarize_session(&self, input: &RecapPromptInput<'_>) -> LlmRecap {
        let prompt = recap_prompt(&self.settings().language, input);
        match self.complete(&prompt).await {
            Ok(text) => parse_recap(&text),
            Err(e) => {
                warn!(error = %e, "Recap generation failed");
                LlmRecap::unavailable()
            }
        }
    }
}
