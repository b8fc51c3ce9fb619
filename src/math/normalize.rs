//! Likert normalization primitives.
//!
//! Every aggregator funnels raw responses through [`to01`], so reverse-keying and
//! range handling live in exactly one place.
//!
//! Out-of-range responses are clamped into the scale, never rejected.

use crate::domain::LikertScale;

/// Clamp into `[0, 1]`.
pub fn clamp01(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

/// Clamp into `[0, 100]`.
pub fn clamp100(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > 100.0 {
        100.0
    } else {
        v
    }
}

/// Rescale a response from `[min, max]` to `[0, 1]`.
///
/// Reverse items are reflected about the midpoint first (`max + min - value`).
pub fn to01(value: i32, reverse: bool, scale: LikertScale) -> f64 {
    let clamped = scale.clamp(value);
    let raw = if reverse { scale.reflect(clamped) } else { clamped };
    clamp01((i64::from(raw) - i64::from(scale.min)) as f64 / scale.span() as f64)
}

/// Map a `[0, 1]` value to an integer score in `[0, 100]`.
pub fn to100(v01: f64) -> u8 {
    (clamp01(v01) * 100.0).round() as u8
}

/// Round and clamp an arbitrary `[0, 100]`-scale value to a score.
pub fn score100(v: f64) -> u8 {
    if !v.is_finite() {
        return 50;
    }
    clamp100(v.round()) as u8
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
