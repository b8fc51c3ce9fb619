//! Big5 → Inner9 composite mapping.
//!
//! Composites are combined on the `[0, 100]` score scale and rounded per
//! composite; `growth` is built from the already-rounded composites it depends on.
//! Every output is clamped to `[0, 100]` as the last step.

use serde::{Deserialize, Serialize};

use crate::domain::{Inner9Scores, PerTrait};
use crate::math::score100;

/// Default delta magnitude of the typology modifier.
pub const DEFAULT_TYPOLOGY_ALPHA: f64 = 5.0;
/// Default delta magnitude of the nine-type modifier.
pub const DEFAULT_NINE_TYPE_BETA: f64 = 4.0;

/// Weights of the four composites feeding `growth`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthWeights {
    pub creation: f64,
    pub will: f64,
    pub insight: f64,
    pub resilience: f64,
}

impl GrowthWeights {
    /// Equal quarters (the default).
    pub const EQUAL: GrowthWeights = GrowthWeights {
        creation: 0.25,
        will: 0.25,
        insight: 0.25,
        resilience: 0.25,
    };

    /// Creation/will-leaning table.
    pub const DRIVE_WEIGHTED: GrowthWeights = GrowthWeights {
        creation: 0.3,
        will: 0.3,
        insight: 0.2,
        resilience: 0.2,
    };
}

impl Default for GrowthWeights {
    fn default() -> Self {
        Self::EQUAL
    }
}

/// Mapper configuration. The default reproduces the plain formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inner9Config {
    /// Add the `A·E` interaction term to harmony.
    pub nonlinear: bool,
    /// Per-trait multipliers for the five pass-through composites.
    pub weights: PerTrait<f64>,
    pub growth: GrowthWeights,
    /// Typology modifier magnitude; `None` disables it.
    pub typology_modifier: Option<f64>,
    /// Nine-type modifier magnitude; `None` disables it.
    pub nine_type_modifier: Option<f64>,
}

impl Default for Inner9Config {
    fn default() -> Self {
        Self {
            nonlinear: false,
            weights: PerTrait::from_fn(|_| 1.0),
            growth: GrowthWeights::default(),
            typology_modifier: None,
            nine_type_modifier: None,
        }
    }
}

/// Map Big5 scores to the nine composites.
pub fn map_inner9(big5: &PerTrait<u8>, config: &Inner9Config) -> Inner9Scores {
    let o = f64::from(big5.openness.min(100));
    let c = f64::from(big5.conscientiousness.min(100));
    let e = f64::from(big5.extraversion.min(100));
    let a = f64::from(big5.agreeableness.min(100));
    let n = f64::from(big5.neuroticism.min(100));
    let w = &config.weights;

    let creation = (o * w.openness).round();
    let will = (c * w.conscientiousness).round();
    let expression = (e * w.extraversion).round();
    let mut harmony = (a * w.agreeableness).round();
    let sensitivity = (n * w.neuroticism).round();
    let insight = (0.6 * o + 0.4 * c).round();
    let resilience = (100.0 - n).round();
    let balance = (100.0 - ((o + e) - (c + a)).abs() / 2.0).round();

    let g = &config.growth;
    let growth = (g.creation * creation + g.will * will + g.insight * insight + g.resilience * resilience).round();

    if config.nonlinear {
        harmony += 0.3 * (a * e / 100.0);
    }

    Inner9Scores {
        creation: score100(creation),
        will: score100(will),
        expression: score100(expression),
        harmony: score100(harmony),
        sensitivity: score100(sensitivity),
        insight: score100(insight),
        resilience: score100(resilience),
        balance: score100(balance),
        growth: score100(growth),
    }
}
