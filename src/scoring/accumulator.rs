//! Weighted running mean with an explicit neutral default.

/// Neutral midpoint on the `[0, 1]` scale.
pub const NEUTRAL01: f64 = 0.5;

/// Accumulates `value * weight` and `weight`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedMean {
    sum: f64,
    weight: f64,
}

impl WeightedMean {
    pub fn add(&mut self, value: f64, weight: f64) {
        self.sum += value * weight;
        self.weight += weight;
    }

    /// Weighted mean, or [`NEUTRAL01`] when nothing was accumulated.
    pub fn value_or_neutral(&self) -> f64 {
        if self.weight > 0.0 {
            self.sum / self.weight
        } else {
            NEUTRAL01
        }
    }
}
