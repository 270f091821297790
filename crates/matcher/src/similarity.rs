use crate::types::{MatchError, VectorRole};

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 when either vector has zero norm, and fails with
/// [`MatchError::DimensionMismatch`] when the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::DimensionMismatch {
            vector: VectorRole::Operand,
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(cosine_with_norm(a, l2_norm(a), b))
}

#[inline]
pub(crate) fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine against a query whose norm is already known. Lengths must match.
///
/// The result is clamped to [-1.0, 1.0]; rounding can push a self-similarity
/// a hair above 1.0. Non-finite inputs score 0.0 so sorting stays total.
#[inline]
pub(crate) fn cosine_with_norm(query: &[f32], query_norm: f32, candidate: &[f32]) -> f32 {
    debug_assert_eq!(query.len(), candidate.len());
    let candidate_norm = l2_norm(candidate);
    if query_norm == 0.0 || candidate_norm == 0.0 {
        return 0.0;
    }
    let dot: f32 = query.iter().zip(candidate).map(|(x, y)| x * y).sum();
    let score = dot / (query_norm * candidate_norm);
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(-1.0, 1.0)
}
