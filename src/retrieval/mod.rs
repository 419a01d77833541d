//! Evidence retrieval and reliability gating.
//!
//! [`rank`] is the in-memory nearest-neighbour step over a pool snapshot (CV chunks or
//! question bank). [`filter_chunks`] and [`best_reliable`] then drop results whose
//! distance is too large to be shown to an interviewer.
//!
//! The two gates differ: evidence chunks are shown as a set and every item is
//! filtered, while a preloaded question is shown as a single recommendation and only
//! the best one is checked.

pub mod ranker;
pub mod reliability;
pub mod types;

#[cfg(test)]
mod tests;

pub use ranker::rank;
pub use reliability::{ReliabilityThresholds, best_reliable, filter_chunks};
pub use types::{ChunkPayload, PoolItem, QuestionPayload, ScoredChunk, ScoredItem, ScoredQuestion};
