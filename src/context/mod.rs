//! Rolling session context.
//!
//! The context vector is the unweighted mean of the most recent note embeddings. Without
//! usable notes it falls back to the job description: its stored vector first, then an
//! on-demand embedding of its text. The result always carries a vector.

mod error;


use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::TextEmbedder;
use crate::store::{JobDescriptionRecord, NoteRecord};
use crate::vector::average;

pub use error::ContextError;

/// Which input produced the context vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextSource {
    /// Mean of `count` note vectors.
    Notes { count: usize },
    /// The job description's stored vector.
    JobDescriptionVector,
    /// The job description text, embedded for this request.
    JobDescriptionText,
}

/// Context of one request. Recomputed every time, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    /// Window note texts, oldest first.
    pub note_texts: Vec<String>,
    pub vector: Vec<f32>,
    pub source: ContextSource,
}

/// Builds the context from notes given newest first.
///
/// Only the first `window` notes are used. Notes without a vector still contribute
/// their text.
pub fn build_context(
    notes_newest_first: &[NoteRecord],
    window: usize,
    job: &JobDescriptionRecord,
    embedder: &dyn TextEmbedder,
) -> Result<SessionContext, ContextError> {
    let recent = &notes_newest_first[..window.min(notes_newest_first.len())];

    let note_texts: Vec<String> = recent.iter().rev().map(|n| n.note_text.clone()).collect();
    let vectors: Vec<&[f32]> = recent.iter().filter_map(|n| n.vector.as_deref()).collect();

    if let Some(vector) = average(&vectors)? {
        debug!(notes = note_texts.len(), vectors = vectors.len(), "Context from notes");
        return Ok(SessionContext {
            note_texts,
            vector,
            source: ContextSource::Notes {
                count: vectors.len(),
            },
        });
    }

    if let Some(stored) = &job.vector {
        debug!(job_id = %job.id, "No note vectors; context from stored job vector");
        return Ok(SessionContext {
            note_texts,
            vector: stored.clone(),
            source: ContextSource::JobDescriptionVector,
        });
    }

    debug!(job_id = %job.id, "No note or job vectors; embedding job text");
    let vector = embedder.embed(&job.description_text)?;
    Ok(SessionContext {
        note_texts,
        vector,
        source: ContextSource::JobDescriptionText,
    })
}
