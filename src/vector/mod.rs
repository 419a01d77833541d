//! Fixed-dimension vector operations.
//!
//! Embeddings are L2-normalized by the embedding collaborator, so cosine distance is
//! computed as `1 - dot(a, b)` without renormalizing here.

pub mod error;


pub use error::VectorError;

/// Result alias for vector math.
pub type VectorResult<T> = Result<T, VectorError>;

#[inline]
fn check_dims(a: &[f32], b: &[f32]) -> VectorResult<()> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Dot product of two equally sized vectors.
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> VectorResult<f32> {
    check_dims(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Cosine distance between two unit vectors, typically in `[0, 2]`.
#[inline]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> VectorResult<f32> {
    Ok(1.0 - dot(a, b)?)
}

/// Euclidean norm.
#[inline]
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scales `v` to unit length in place. Zero vectors are left untouched.
pub fn normalize(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Element-wise arithmetic mean.
///
/// Returns `Ok(None)` for an empty input: there is no context to average. The mean is
/// unweighted; every vector counts the same regardless of recency.
pub fn average<V: AsRef<[f32]>>(vectors: &[V]) -> VectorResult<Option<Vec<f32>>> {
    let Some(first) = vectors.first() else {
        return Ok(None);
    };

    let dim = first.as_ref().len();
    let mut acc = vec![0.0f32; dim];

    for v in vectors {
        let v = v.as_ref();
        if v.len() != dim {
            return Err(VectorError::DimensionMismatch {
                expected: dim,
                actual: v.len(),
            });
        }
        for (slot, x) in acc.iter_mut().zip(v) {
            *slot += x;
        }
    }

    let n = vectors.len() as f32;
    for slot in &mut acc {
        *slot /= n;
    }

    Ok(Some(acc))
}
