/// Euclidean (L2) norm, accumulated in f32.
pub(crate) fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// In-place L2 normalization. A zero-norm vector is left untouched so the
/// all-zero embedding stays all zeros instead of turning into NaNs.
pub(crate) fn l2_normalize_in_place(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
