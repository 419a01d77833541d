use tracing::debug;

use crate::vector::{VectorResult, cosine_distance};

use super::types::{PoolItem, ScoredItem};

/// Ranks `pool` against `context` and keeps the `k` nearest items.
///
/// Results are in ascending distance. Ties keep the pool's relative order (the sort is
/// stable). Items without a vector are skipped. A vector of the wrong dimension is an
/// error, not a skip: it means two embedding spaces got mixed upstream.
pub fn rank<P, I>(context: &[f32], pool: I, k: usize) -> VectorResult<Vec<ScoredItem<P>>>
where
    I: IntoIterator<Item = PoolItem<P>>,
{
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut skipped = 0usize;
    let mut scored = Vec::new();

    for item in pool {
        let Some(vector) = item.vector.as_deref() else {
            skipped += 1;
            continue;
        };

        let distance = cosine_distance(context, vector)?;
        scored.push(ScoredItem {
            id: item.id,
            payload: item.payload,
            distance,
        });
    }

    if skipped > 0 {
        debug!(skipped, "Pool items without embeddings excluded from ranking");
    }

    scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    scored.truncate(k);

    Ok(scored)
}
