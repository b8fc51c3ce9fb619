//! Big5 aggregator.
//!
//! Native trait values are weighted means of normalized responses. A negative
//! loading means agreement with the item lowers the trait. The native values are
//! then blended with the typological axes (see [`crate::scoring::blend`]) and
//! rounded once on the way to the `[0, 100]` scale.

use crate::catalog::ItemCatalog;
use crate::domain::{Big5Confidence, Big5Result, Big5Trait, LikertScale, PerAxis, PerTrait, ResponseSet};
use crate::math::{confidence, mean, to01, to100};
use crate::scoring::accumulator::WeightedMean;
use crate::scoring::blend::blend_with_typology;

/// Per-trait `[0, 1]` values before any cross-model adjustment.
pub fn aggregate_big5(responses: &ResponseSet, catalog: &ItemCatalog, scale: LikertScale) -> PerTrait<f64> {
    let mut acc = PerTrait::<WeightedMean>::default();

    for item in catalog.items() {
        if !item.has_big5() {
            continue;
        }
        let Some(response) = responses.get(item.id) else { continue };
        let base = to01(response, item.reverse, scale);

        for (t, loading) in item.big5.iter() {
            let Some(w_raw) = *loading else { continue };
            let w = w_raw.abs() * item.weight;
            if w <= 0.0 {
                continue;
            }
            let value = if w_raw >= 0.0 { base } else { 1.0 - base };
            acc.get_mut(t).add(value, w);
        }
    }

    acc.map(WeightedMean::value_or_neutral)
}

/// Scores and confidence from final `[0, 1]` trait values.
pub fn big5_from_values(values: PerTrait<f64>) -> Big5Result {
    let scores = values.map(|&v| to100(v));
    let traits = scores.map(|&s| confidence(s));
    let overall = mean(&Big5Trait::ALL.map(|t| *traits.get(t))).clamp(0.0, 1.0);

    Big5Result {
        scores,
        values,
        confidence: Big5Confidence { overall, traits },
    }
}

pub fn score_big5(
    responses: &ResponseSet,
    catalog: &ItemCatalog,
    scale: LikertScale,
    axis01: &PerAxis<f64>,
) -> Big5Result {
    let native = aggregate_big5(responses, catalog, scale);
    big5_from_values(blend_with_typology(&native, axis01))
}
