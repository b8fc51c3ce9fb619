//! Numerically stable softmax.

/// Softmax over `scores`, shifting by the maximum before exponentiating.
///
/// An empty input yields an empty output. A degenerate sum (only possible with
/// non-finite inputs) is treated as 1 so the call never divides by zero.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|&v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    let sum = if sum > 0.0 && sum.is_finite() { sum } else { 1.0 };
    exps.into_iter().map(|e| e / sum).collect()
}
