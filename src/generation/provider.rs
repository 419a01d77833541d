use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, error};

use super::error::{GenerationError, GenerationResult};
use super::prompt::Prompt;
use super::TextGenerator;

/// [`TextGenerator`] backed by the `genai` multi-provider client.
///
/// Provider credentials come from the environment (for example `OPENAI_API_KEY`), as
/// resolved by `genai` for the configured model name.
pub struct GenaiGenerator {
    client: Client,
    model: String,
    temperature: f64,
}

impl std::fmt::Debug for GenaiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiGenerator")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GenaiGenerator {
    pub fn new(model: impl Into<String>, temperature: f64) -> Self {
        Self::with_client(Client::default(), model, temperature)
    }

    pub fn with_client(client: Client, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GenaiGenerator {
    async fn complete(&self, prompt: &Prompt) -> GenerationResult<String> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(prompt.system.clone()),
            ChatMessage::user(prompt.user.clone()),
        ]);
        let options =
            ChatOptions::default().with_temperature(prompt.temperature.unwrap_or(self.temperature));

        debug!(model = %self.model, "Sending chat request");
        let response = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await
            .map_err(|e| {
                error!("Provider error: {}", e);
                GenerationError::Provider {
                    message: e.to_string(),
                }
            })?;

        let text = response.first_text().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}
