use uuid::Uuid;

use super::*;

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn chunk(n: u128, content: &str, vector: Option<Vec<f32>>) -> PoolItem<ChunkPayload> {
    PoolItem::new(
        id(n),
        ChunkPayload {
            content: content.to_string(),
            page_number: Some(1),
            chunk_index: n as i32,
        },
        vector,
    )
}

fn question(n: u128, text: &str, vector: Option<Vec<f32>>) -> PoolItem<QuestionPayload> {
    PoolItem::new(
        id(n),
        QuestionPayload {
            question_text: text.to_string(),
        },
        vector,
    )
}

fn scored(n: u128, distance: f32) -> ScoredItem<QuestionPayload> {
    ScoredItem {
        id: id(n),
        payload: QuestionPayload {
            question_text: format!("q{n}"),
        },
        distance,
    }
}

#[test]
fn test_rank_sorted_ascending_and_limited() {
    let context = vec![1.0, 0.0];
    let pool = vec![
        chunk(1, "far", Some(vec![0.0, 1.0])),
        chunk(2, "near", Some(vec![1.0, 0.0])),
        chunk(3, "mid", Some(vec![0.6, 0.8])),
    ];

    let ranked = rank(&context, pool, 2).unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].payload.content, "near");
    assert_eq!(ranked[1].payload.content, "mid");
    assert!(ranked[0].distance <= ranked[1].distance);
}

#[test]
fn test_rank_never_exceeds_k() {
    let context = vec![1.0, 0.0];
    let pool: Vec<_> = (0..10)
        .map(|n| chunk(n, "c", Some(vec![1.0, 0.0])))
        .collect();

    for k in [1usize, 3, 10, 50] {
        let ranked = rank(&context, pool.clone(), k).unwrap();
        assert_eq!(ranked.len(), k.min(10));
    }
}

#[test]
fn test_rank_zero_k_is_empty() {
    let pool = vec![chunk(1, "a", Some(vec![1.0, 0.0]))];
    assert!(rank(&[1.0, 0.0], pool, 0).unwrap().is_empty());
}

#[test]
fn test_rank_excludes_missing_vectors() {
    let context = vec![1.0, 0.0];
    let pool = vec![
        question(1, "no vector", None),
        question(2, "has vector", Some(vec![0.0, 1.0])),
    ];

    let ranked = rank(&context, pool, 5).unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, id(2));
    assert!((ranked[0].distance - 1.0).abs() < 1e-6);
}

#[test]
fn test_rank_ties_preserve_pool_order() {
    let context = vec![1.0, 0.0];
    let pool = vec![
        question(30, "third-id first", Some(vec![0.0, 1.0])),
        question(10, "first-id second", Some(vec![0.0, 1.0])),
        question(20, "best", Some(vec![1.0, 0.0])),
        question(5, "tie last", Some(vec![0.0, 1.0])),
    ];

    let ranked = rank(&context, pool, 4).unwrap();
    let ids: Vec<Uuid> = ranked.iter().map(|r| r.id).collect();

    assert_eq!(ids, vec![id(20), id(30), id(10), id(5)]);
}

#[test]
fn test_rank_dimension_mismatch_is_error() {
    let pool = vec![chunk(1, "a", Some(vec![1.0, 0.0, 0.0]))];
    assert!(rank(&[1.0, 0.0], pool, 3).is_err());
}

#[test]
fn test_rank_empty_pool() {
    let pool: Vec<PoolItem<ChunkPayload>> = vec![];
    assert!(rank(&[1.0, 0.0], pool, 3).unwrap().is_empty());
}

#[test]
fn test_filter_chunks_subset_preserving_order() {
    let items = vec![scored(1, 0.2), scored(2, 0.7), scored(3, 0.58), scored(4, 0.59)];

    let filtered = filter_chunks(items, 0.58);
    let ids: Vec<Uuid> = filtered.iter().map(|r| r.id).collect();

    assert_eq!(ids, vec![id(1), id(3)]);
    assert!(filtered.iter().all(|i| i.distance <= 0.58));
}

#[test]
fn test_filter_chunks_all_noisy_is_empty() {
    let items = vec![scored(1, 0.9), scored(2, 1.1)];
    assert!(filter_chunks(items, 0.58).is_empty());
}

#[test]
fn test_best_reliable_within_threshold() {
    let items = vec![scored(1, 0.60), scored(2, 0.65)];
    let best = best_reliable(&items, 0.60).unwrap();
    assert_eq!(best.id, id(1));
}

#[test]
fn test_best_reliable_only_considers_head() {
    // Not sorted: a later item would pass, but only the head is inspected.
    let items = vec![scored(1, 0.7), scored(2, 0.1)];
    assert!(best_reliable(&items, 0.60).is_none());
}

#[test]
fn test_best_reliable_empty() {
    let items: Vec<ScoredItem<QuestionPayload>> = vec![];
    assert!(best_reliable(&items, 0.60).is_none());
}

#[test]
fn test_default_thresholds() {
    let thresholds = ReliabilityThresholds::default();
    assert_eq!(thresholds.chunk_max_distance, 0.58);
    assert_eq!(thresholds.question_max_distance, 0.60);
}

#[test]
fn test_scored_chunk_serializes_flat() {
    let item = ScoredChunk {
        id: id(1),
        payload: ChunkPayload {
            content: "Rust services".to_string(),
            page_number: None,
            chunk_index: 4,
        },
        distance: 0.25,
    };

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["content"], "Rust services");
    assert_eq!(json["chunk_index"], 4);
    assert!(json["page_number"].is_null());
    assert_eq!(json["distance"], 0.25);
}
