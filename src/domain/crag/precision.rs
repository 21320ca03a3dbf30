//! Average precision over per-passage usefulness verdicts

const EPSILON: f64 = 1e-10;

/// Rank-weighted precision of binary verdicts.
///
/// `Σ_k (precision@k · v_k) / (Σ v_k + ε)` where `precision@k` is the share
/// of useful passages among the first `k`. Returns 0.0 when no passage is
/// useful or the slice is empty.
pub fn average_precision(verdicts: &[bool]) -> f32 {
    let mut useful_so_far = 0u32;
    let mut weighted = 0.0f64;

    for (idx, useful) in verdicts.iter().enumerate() {
        if *useful {
            useful_so_far += 1;
            weighted += f64::from(useful_so_far) / (idx as f64 + 1.0);
        }
    }

    let total = f64::from(useful_so_far);
    (weighted / (total + EPSILON)) as f32
}
