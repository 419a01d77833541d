use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHUNK_MAX_DISTANCE, DEFAULT_QUESTION_MAX_DISTANCE};

use super::types::ScoredItem;

/// Distance ceilings above which retrieval results are treated as noise.
///
/// The defaults were chosen empirically for MiniLM embeddings; treat them as tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityThresholds {
    pub chunk_max_distance: f32,
    pub question_max_distance: f32,
}

impl Default for ReliabilityThresholds {
    fn default() -> Self {
        Self {
            chunk_max_distance: DEFAULT_CHUNK_MAX_DISTANCE,
            question_max_distance: DEFAULT_QUESTION_MAX_DISTANCE,
        }
    }
}

impl ReliabilityThresholds {
    pub fn new(chunk_max_distance: f32, question_max_distance: f32) -> Self {
        Self {
            chunk_max_distance,
            question_max_distance,
        }
    }
}

/// Keeps items with `distance <= threshold`, in their original order.
///
/// An empty result is a normal outcome meaning "no trustworthy evidence".
pub fn filter_chunks<P>(items: Vec<ScoredItem<P>>, threshold: f32) -> Vec<ScoredItem<P>> {
    items.into_iter().filter(|i| i.within(threshold)).collect()
}

/// Returns the first (best) item if it is within `threshold`.
///
/// Only the head of the list is considered: a later item that would pass does not
/// replace a best item that fails.
pub fn best_reliable<P: Clone>(items: &[ScoredItem<P>], threshold: f32) -> Option<ScoredItem<P>> {
    items.first().filter(|i| i.within(threshold)).cloned()
}
