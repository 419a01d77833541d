//! Engine runs over JSON snapshots loaded from disk.

mod common;

use std::io::Write;
use std::sync::Arc;

use copilot::context::ContextSource;
use copilot::embedding::FixedEmbedder;
use copilot::generation::{
    FollowupGenerator, GenerationSettings, MOCK_RESPONSE, MockGenerator, TextGenerator,
};
use copilot::orchestrator::{CopilotEngine, NextQuestionRequest, QuestionPoolScope};
use copilot::retrieval::ReliabilityThresholds;
use copilot::scoring::RiskLevel;
use copilot::store::{InMemoryStore, StoreError, StoreSnapshot};

use common::fixtures::{AXIS_JOB, AXIS_SIDE, DIM, InterviewFixture};

const SESSION_ID: &str = "8d1f2a3b-0c4d-4e5f-9a6b-7c8d9e0f1a2b";

const LEGACY_SNAPSHOT: &str = r#"{
  "session_questions_supported": false,
  "sessions": [{
    "id": "8d1f2a3b-0c4d-4e5f-9a6b-7c8d9e0f1a2b",
    "candidate_id": "11111111-1111-4111-8111-111111111111",
    "job_description_id": "22222222-2222-4222-8222-222222222222"
  }],
  "candidates": [{
    "id": "11111111-1111-4111-8111-111111111111",
    "full_name": "Linus Torvalds"
  }],
  "cvs": [{
    "id": "33333333-3333-4333-8333-333333333333",
    "candidate_id": "11111111-1111-4111-8111-111111111111",
    "vector": [1.0, 0.0, 0.0]
  }],
  "cv_chunks": [{
    "id": "44444444-4444-4444-8444-444444444444",
    "cv_id": "33333333-3333-4333-8333-333333333333",
    "content": "Maintains a large C codebase",
    "chunk_index": 0,
    "vector": [1.0, 0.0, 0.0]
  }],
  "job_descriptions": [{
    "id": "22222222-2222-4222-8222-222222222222",
    "title": "Kernel Engineer",
    "description_text": "Low-level systems work",
    "vector": [1.0, 0.0, 0.0]
  }],
  "notes": [{
    "id": "55555555-5555-4555-8555-555555555555",
    "session_id": "8d1f2a3b-0c4d-4e5f-9a6b-7c8d9e0f1a2b",
    "note_text": "Discussed scheduler internals",
    "vector": [1.0, 0.0, 0.0],
    "created_at": "2024-03-01T10:00:00Z"
  }],
  "questions": [{
    "id": "66666666-6666-4666-8666-666666666666",
    "job_description_id": "22222222-2222-4222-8222-222222222222",
    "question_text": "How would you debug a deadlock in a driver?",
    "vector": [1.0, 0.0, 0.0]
  }]
}"#;

fn engine_for(store: Arc<InMemoryStore>) -> CopilotEngine<InMemoryStore> {
    let backend: Arc<dyn TextGenerator> = Arc::new(MockGenerator::new(MOCK_RESPONSE));
    CopilotEngine::new(
        store,
        Arc::new(FixedEmbedder::new(DIM).with_fallback(AXIS_JOB.to_vec())),
        FollowupGenerator::new(backend, GenerationSettings::default()),
        ReliabilityThresholds::default(),
    )
}

#[tokio::test]
async fn test_saved_snapshot_reproduces_decision() {
    let fx = InterviewFixture::new();
    fx.add_note("Rust services", Some(AXIS_JOB), 10);
    fx.add_note("Team leadership", Some(AXIS_SIDE), 20);
    fx.add_chunk("Built Rust services", 0, AXIS_JOB);
    fx.add_question("Explain ownership.", true, AXIS_JOB);

    let expected = engine_for(Arc::clone(&fx.store))
        .compute_next_question(NextQuestionRequest::new(fx.session_id))
        .await
        .unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    let json = serde_json::to_string_pretty(&fx.store.snapshot()).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let loaded = Arc::new(InMemoryStore::load(file.path()).expect("snapshot should load"));
    assert_eq!(loaded.snapshot(), fx.store.snapshot());

    let actual = engine_for(loaded)
        .compute_next_question(NextQuestionRequest::new(fx.session_id))
        .await
        .unwrap();

    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_legacy_snapshot_uses_job_pool() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LEGACY_SNAPSHOT.as_bytes()).unwrap();

    let store = Arc::new(InMemoryStore::load(file.path()).expect("snapshot should load"));
    assert!(!store.snapshot().session_questions_supported);

    let session_id = uuid::Uuid::parse_str(SESSION_ID).unwrap();
    let decision = engine_for(store)
        .compute_next_question(NextQuestionRequest::new(session_id))
        .await
        .expect("legacy snapshot should still produce a decision");

    assert_eq!(decision.question_pool, QuestionPoolScope::JobDescription);
    assert_eq!(decision.context_source, ContextSource::Notes { count: 1 });
    assert_eq!(decision.risk_level, RiskLevel::Low);
    assert_eq!(decision.evidence_chunks.len(), 1);
    assert_eq!(
        decision
            .best_preloaded_question
            .map(|q| q.payload.question_text),
        Some("How would you debug a deadlock in a driver?".to_string())
    );
    assert_eq!(decision.generated_next_question.text, MOCK_RESPONSE);
}

#[test]
fn test_missing_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = InMemoryStore::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::SnapshotRead { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_malformed_snapshot_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ \"sessions\": [ { \"id\": 42 } ] }").unwrap();

    let err = StoreSnapshot::load(file.path()).unwrap_err();
    assert!(matches!(err, StoreError::SnapshotParse { .. }));
}
