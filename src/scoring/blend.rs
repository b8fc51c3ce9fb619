//! Cross-model adjustment of Big5 traits using the typological axes.
//!
//! Each blended trait is pulled toward a fixed prior chosen by which side of its
//! paired axis the respondent leans. Neuroticism has no typological counterpart
//! and passes through unchanged.

use crate::domain::{Axis, Big5Trait, PerAxis, PerTrait};
use crate::math::clamp01;

/// Half-width of the band around the axis midpoint treated as "no lean".
pub const NEUTRAL_AXIS_EPS: f64 = 1e-9;

/// Prior used when the paired axis sits exactly on its midpoint.
pub const NEUTRAL_PRIOR: f64 = 0.5;

/// One row of the blend table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendRule {
    pub target: Big5Trait,
    pub axis: Axis,
    /// Share kept from the native Big5 value.
    pub native_weight: f64,
    /// Prior when the axis leans toward its positive letter.
    pub prior_positive: f64,
    /// Prior when the axis leans toward its negative letter.
    pub prior_negative: f64,
}

impl BlendRule {
    pub fn prior(&self, axis_value: f64) -> f64 {
        if (axis_value - 0.5).abs() <= NEUTRAL_AXIS_EPS {
            NEUTRAL_PRIOR
        } else if axis_value > 0.5 {
            self.prior_positive
        } else {
            self.prior_negative
        }
    }

    pub fn apply(&self, native: f64, axis_value: f64) -> f64 {
        let w = self.native_weight;
        clamp01(native * w + self.prior(axis_value) * (1.0 - w))
    }
}

/// Openness ↔ N, Conscientiousness ↔ J, Extraversion ↔ E, Agreeableness ↔ F.
pub const BLEND_TABLE: [BlendRule; 4] = [
    BlendRule {
        target: Big5Trait::Openness,
        axis: Axis::Sn,
        native_weight: 0.8,
        prior_positive: 0.65,
        prior_negative: 0.35,
    },
    BlendRule {
        target: Big5Trait::Conscientiousness,
        axis: Axis::Jp,
        native_weight: 0.8,
        prior_positive: 0.65,
        prior_negative: 0.35,
    },
    BlendRule {
        target: Big5Trait::Extraversion,
        axis: Axis::Ei,
        native_weight: 0.75,
        prior_positive: 0.7,
        prior_negative: 0.3,
    },
    // Inverted: a T lean lowers agreeableness.
    BlendRule {
        target: Big5Trait::Agreeableness,
        axis: Axis::Tf,
        native_weight: 0.8,
        prior_positive: 0.35,
        prior_negative: 0.65,
    },
];

/// Apply [`BLEND_TABLE`] to native trait values.
pub fn blend_with_typology(native: &PerTrait<f64>, axis01: &PerAxis<f64>) -> PerTrait<f64> {
    let mut out = native.map(|&v| clamp01(v));
    for rule in &BLEND_TABLE {
        *out.get_mut(rule.target) = rule.apply(*native.get(rule.target), *axis01.get(rule.axis));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEUTRAL_AXES: PerAxis<f64> = PerAxis { ei: 0.5, sn: 0.5, tf: 0.5, jp: 0.5 };

    fn flat(v: f64) -> PerTrait<f64> {
        PerTrait::from_fn(|_| v)
    }

    #[test]
    fn neutral_axes_keep_neutral_traits() {
        let out = blend_with_typology(&flat(0.5), &NEUTRAL_AXES);
        assert_eq!(out, flat(0.5));
    }

    #[test]
    fn extraversion_follows_e_lean() {
        let axes = PerAxis { ei: 0.8, ..NEUTRAL_AXES };
        let out = blend_with_typology(&flat(0.5), &axes);
        // 0.5 * 0.75 + 0.7 * 0.25
        assert!((out.extraversion - 0.55).abs() < 1e-12);
        assert_eq!(out.openness, 0.5);
    }

    #[test]
    fn agreeableness_is_inverted_against_t() {
        let axes = PerAxis { tf: 0.9, ..NEUTRAL_AXES };
        let t_lean = blend_with_typology(&flat(0.5), &axes);
        assert!((t_lean.agreeableness - 0.47).abs() < 1e-12);

        let axes = PerAxis { tf: 0.1, ..NEUTRAL_AXES };
        let f_lean = blend_with_typology(&flat(0.5), &axes);
        assert!((f_lean.agreeableness - 0.53).abs() < 1e-12);
    }

    #[test]
    fn neuroticism_passes_through() {
        let axes = PerAxis { ei: 1.0, sn: 0.0, tf: 1.0, jp: 0.0 };
        let native = PerTrait { neuroticism: 0.83, ..flat(0.2) };
        let out = blend_with_typology(&native, &axes);
        assert_eq!(out.neuroticism, 0.83);
    }

    #[test]
    fn blended_values_stay_in_range() {
        let axes = PerAxis { ei: 1.0, sn: 1.0, tf: 0.0, jp: 1.0 };
        for v in [0.0, 1.0] {
            let out = blend_with_typology(&flat(v), &axes);
            for (_, &x) in out.iter() {
                assert!((0.0..=1.0).contains(&x));
            }
        }
    }
}
