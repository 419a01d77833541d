use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::GenerationResult;
use super::prompt::Prompt;
use super::TextGenerator;

pub const MOCK_RESPONSE: &str =
    "[mock] How would you roll back a failed deployment of this service?";

/// Deterministic generator used when no provider should be called.
///
/// Answers every prompt with the same text and records the prompts it saw.
#[derive(Debug)]
pub struct MockGenerator {
    response: String,
    prompts: Mutex<Vec<Prompt>>,
}

impl MockGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().clone()
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().last().cloned()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(MOCK_RESPONSE)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(&self, prompt: &Prompt) -> GenerationResult<String> {
        self.prompts.lock().push(prompt.clone());
        Ok(self.response.clone())
    }
}

#[cfg(any(test, feature = "mock"))]
pub use testing::{FailingGenerator, SlowGenerator};

#[cfg(any(test, feature = "mock"))]
mod testing {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::super::error::{GenerationError, GenerationResult};
    use super::super::prompt::Prompt;
    use super::super::TextGenerator;

    /// Generator whose every call fails with `error`.
    #[derive(Debug, Clone)]
    pub struct FailingGenerator {
        pub error: GenerationError,
    }

    impl FailingGenerator {
        pub fn new(error: GenerationError) -> Self {
            Self { error }
        }
    }

    impl Default for FailingGenerator {
        fn default() -> Self {
            Self::new(GenerationError::Provider {
                message: "provider unavailable".to_string(),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn complete(&self, _prompt: &Prompt) -> GenerationResult<String> {
            Err(self.error.clone())
        }
    }

    /// Generator that sleeps before answering.
    #[derive(Debug, Clone)]
    pub struct SlowGenerator {
        pub delay: Duration,
        pub response: String,
    }

    impl SlowGenerator {
        pub fn new(delay: Duration, response: impl Into<String>) -> Self {
            Self {
                delay,
                response: response.into(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn complete(&self, _prompt: &Prompt) -> GenerationResult<String> {
            tokio::time::sleep(self.delay).await;
            Ok(self.response.clone())
        }
    }
}
