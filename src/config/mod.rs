//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `COPILOT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use uuid::Uuid;

use crate::constants::{
    DEFAULT_CHUNK_MAX_DISTANCE, DEFAULT_EMBEDDING_DIM, DEFAULT_NOTES_WINDOW,
    DEFAULT_QUESTION_MAX_DISTANCE, DEFAULT_TOP_K_CHUNKS, DEFAULT_TOP_K_QUESTIONS,
    MAX_NOTES_WINDOW, MAX_TOP_K,
};
use crate::embedding::MiniLmConfig;
use crate::generation::{
    DEFAULT_GENERATION_TEMPERATURE, DEFAULT_GENERATION_TIMEOUT, DEFAULT_LANGUAGE,
    GenerationSettings,
};
use crate::orchestrator::NextQuestionRequest;
use crate::retrieval::ReliabilityThresholds;

/// Default generation model used when `COPILOT_GENERATION_MODEL` is not set.
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

/// Engine configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `COPILOT_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Evidence and preloaded-question distance ceilings. Default: `0.58` / `0.60`.
    pub thresholds: ReliabilityThresholds,

    /// Recent notes averaged into the context vector. Default: `5`.
    pub notes_window: usize,

    /// Preloaded questions suggested per request. Default: `3`.
    pub top_k_questions: usize,

    /// CV chunks returned as evidence per request. Default: `3`.
    pub top_k_chunks: usize,

    /// MiniLM model directory (`config.json`, `tokenizer.json`, `model.safetensors`).
    /// Unset runs the embedder in stub mode.
    pub embedding_model_path: Option<PathBuf>,

    /// Embedding dimension. Default: `384`.
    pub embedding_dim: usize,

    /// Chat model name passed to the provider. Default: `gpt-4o-mini`.
    pub generation_model: String,

    /// Budget for one generation call. Default: 8 s.
    pub generation_timeout: Duration,

    /// Default: `0.4`.
    pub generation_temperature: f64,

    /// Language of prompts and fallback questions. Default: `Italian`.
    pub language: String,

    /// Answer generation requests with the mock generator instead of a provider.
    pub mock_provider: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: ReliabilityThresholds::new(
                DEFAULT_CHUNK_MAX_DISTANCE,
                DEFAULT_QUESTION_MAX_DISTANCE,
            ),
            notes_window: DEFAULT_NOTES_WINDOW,
            top_k_questions: DEFAULT_TOP_K_QUESTIONS,
            top_k_chunks: DEFAULT_TOP_K_CHUNKS,
            embedding_model_path: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            generation_temperature: DEFAULT_GENERATION_TEMPERATURE,
            language: DEFAULT_LANGUAGE.to_string(),
            mock_provider: false,
        }
    }
}

impl Config {
    const ENV_CHUNK_MAX_DISTANCE: &'static str = "COPILOT_CHUNK_MAX_DISTANCE";
    const ENV_QUESTION_MAX_DISTANCE: &'static str = "COPILOT_QUESTION_MAX_DISTANCE";
    const ENV_NOTES_WINDOW: &'static str = "COPILOT_NOTES_WINDOW";
    const ENV_TOP_K_QUESTIONS: &'static str = "COPILOT_TOP_K_QUESTIONS";
    const ENV_TOP_K_CHUNKS: &'static str = "COPILOT_TOP_K_CHUNKS";
    const ENV_EMBEDDING_MODEL_PATH: &'static str = "COPILOT_EMBEDDING_MODEL_PATH";
    const ENV_EMBEDDING_DIM: &'static str = "COPILOT_EMBEDDING_DIM";
    const ENV_GENERATION_MODEL: &'static str = "COPILOT_GENERATION_MODEL";
    const ENV_GENERATION_TIMEOUT_MS: &'static str = "COPILOT_GENERATION_TIMEOUT_MS";
    const ENV_GENERATION_TEMPERATURE: &'static str = "COPILOT_GENERATION_TEMPERATURE";
    const ENV_LANGUAGE: &'static str = "COPILOT_LANGUAGE";
    const ENV_MOCK_PROVIDER: &'static str = "COPILOT_MOCK_PROVIDER";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Does not validate ranges; call [`Config::validate`] afterwards.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let chunk_max_distance = Self::parse_from_env(
            Self::ENV_CHUNK_MAX_DISTANCE,
            defaults.thresholds.chunk_max_distance,
        )?;
        let question_max_distance = Self::parse_from_env(
            Self::ENV_QUESTION_MAX_DISTANCE,
            defaults.thresholds.question_max_distance,
        )?;
        let notes_window = Self::parse_from_env(Self::ENV_NOTES_WINDOW, defaults.notes_window)?;
        let top_k_questions =
            Self::parse_from_env(Self::ENV_TOP_K_QUESTIONS, defaults.top_k_questions)?;
        let top_k_chunks = Self::parse_from_env(Self::ENV_TOP_K_CHUNKS, defaults.top_k_chunks)?;
        let embedding_model_path =
            Self::parse_optional_path_from_env(Self::ENV_EMBEDDING_MODEL_PATH);
        let embedding_dim = Self::parse_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?;
        let generation_model =
            Self::parse_string_from_env(Self::ENV_GENERATION_MODEL, defaults.generation_model);
        let timeout_ms = Self::parse_from_env(
            Self::ENV_GENERATION_TIMEOUT_MS,
            defaults.generation_timeout.as_millis() as u64,
        )?;
        let generation_temperature = Self::parse_from_env(
            Self::ENV_GENERATION_TEMPERATURE,
            defaults.generation_temperature,
        )?;
        let language = Self::parse_string_from_env(Self::ENV_LANGUAGE, defaults.language);
        let mock_provider =
            Self::parse_bool_from_env(Self::ENV_MOCK_PROVIDER, defaults.mock_provider)?;

        Ok(Self {
            thresholds: ReliabilityThresholds::new(chunk_max_distance, question_max_distance),
            notes_window,
            top_k_questions,
            top_k_chunks,
            embedding_model_path,
            embedding_dim,
            generation_model,
            generation_timeout: Duration::from_millis(timeout_ms),
            generation_temperature,
            language,
            mock_provider,
        })
    }

    /// Checks ranges and paths (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_distance("chunk_max_distance", self.thresholds.chunk_max_distance)?;
        Self::check_distance("question_max_distance", self.thresholds.question_max_distance)?;
        Self::check_count("notes_window", self.notes_window, MAX_NOTES_WINDOW)?;
        Self::check_count("top_k_questions", self.top_k_questions, MAX_TOP_K)?;
        Self::check_count("top_k_chunks", self.top_k_chunks, MAX_TOP_K)?;

        if self.embedding_dim == 0 {
            return Err(ConfigError::OutOfRange {
                name: "embedding_dim",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.generation_timeout.is_zero() {
            return Err(ConfigError::OutOfRange {
                name: "generation_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.generation_temperature) {
            return Err(ConfigError::OutOfRange {
                name: "generation_temperature",
                reason: format!("{} is not in [0, 2]", self.generation_temperature),
            });
        }

        if let Some(ref path) = self.embedding_model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Embedder settings; stub mode when no model path is set.
    pub fn embedding_config(&self) -> MiniLmConfig {
        let config = match &self.embedding_model_path {
            Some(path) => MiniLmConfig::new(path.clone()),
            None => MiniLmConfig::stub(),
        };
        config.with_embedding_dim(self.embedding_dim)
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings::for_language(&self.language)
            .with_timeout(self.generation_timeout)
            .with_temperature(self.generation_temperature)
    }

    /// Request for `session_id` using the configured window and top-k values.
    pub fn next_question_request(&self, session_id: Uuid) -> NextQuestionRequest {
        NextQuestionRequest::new(session_id)
            .with_notes_window(self.notes_window)
            .with_top_k_questions(self.top_k_questions)
            .with_top_k_chunks(self.top_k_chunks)
    }

    fn check_distance(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if (0.0..=2.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                name,
                reason: format!("{value} is not a cosine distance in [0, 2]"),
            })
        }
    }

    fn check_count(name: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
        if (1..=max).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                name,
                reason: format!("{value} is not in 1..={max}"),
            })
        }
    }

    fn parse_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) => {
                let parsed = value.trim().parse::<T>();
                parsed.map_err(|e| ConfigError::InvalidValue {
                    name: var_name,
                    reason: e.to_string(),
                    value,
                })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    name: var_name,
                    value,
                    reason: "expected a boolean".to_string(),
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
