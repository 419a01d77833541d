//! Copilot snapshot runner.
//!
//! Usage:
//! - `copilot <snapshot.json> <session-id> [--recap | --timeline]`
//! - `copilot <snapshot.json> --sessions`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;
use uuid::Uuid;

use copilot::config::Config;
use copilot::embedding::{TextEmbedder, global_embedder};
use copilot::generation::{
    FollowupGenerator, GenaiGenerator, MOCK_RESPONSE, MockGenerator, TextGenerator,
};
use copilot::orchestrator::CopilotEngine;
use copilot::store::InMemoryStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: copilot <snapshot.json> <session-id> [--recap | --timeline]\n       \
                     copilot <snapshot.json> --sessions";

enum Mode {
    NextQuestion(Uuid),
    Recap(Uuid),
    Timeline(Uuid),
    Sessions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (flags, positional): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|arg| arg.starts_with("--"));
    let (snapshot_path, mode) = match (positional.as_slice(), flags.as_slice()) {
        ([path], [flag]) if flag == "--sessions" => (path, Mode::Sessions),
        ([path, session_id], flags) => {
            let session_id = Uuid::parse_str(session_id)
                .with_context(|| format!("invalid session id '{session_id}'"))?;
            let mode = match flags {
                [] => Mode::NextQuestion(session_id),
                [flag] if flag == "--recap" => Mode::Recap(session_id),
                [flag] if flag == "--timeline" => Mode::Timeline(session_id),
                _ => bail!(USAGE),
            };
            (path, mode)
        }
        _ => bail!(USAGE),
    };

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        snapshot = %snapshot_path,
        language = %config.language,
        mock_provider = config.mock_provider,
        "Copilot starting"
    );

    if config.embedding_model_path.is_none() {
        tracing::warn!("No COPILOT_EMBEDDING_MODEL_PATH configured, running embedder in stub mode");
    }
    let embedder: Arc<dyn TextEmbedder> = global_embedder(&config.embedding_config());

    let backend: Arc<dyn TextGenerator> = if config.mock_provider {
        Arc::new(MockGenerator::new(MOCK_RESPONSE))
    } else {
        Arc::new(GenaiGenerator::new(
            config.generation_model.clone(),
            config.generation_temperature,
        ))
    };
    let generator = FollowupGenerator::new(backend, config.generation_settings());

    let store = Arc::new(InMemoryStore::load(&PathBuf::from(snapshot_path))?);
    let engine = CopilotEngine::new(store, embedder, generator, config.thresholds);

    let output = match mode {
        Mode::NextQuestion(session_id) => {
            let decision = engine
                .compute_next_question(config.next_question_request(session_id))
                .await?;
            serde_json::to_string_pretty(&decision)?
        }
        Mode::Recap(session_id) => {
            serde_json::to_string_pretty(&engine.compute_session_recap(session_id).await?)?
        }
        Mode::Timeline(session_id) => {
            serde_json::to_string_pretty(&engine.compute_session_timeline(session_id).await?)?
        }
        Mode::Sessions => serde_json::to_string_pretty(&engine.list_sessions().await?)?,
    };

    println!("{output}");
    Ok(())
}
