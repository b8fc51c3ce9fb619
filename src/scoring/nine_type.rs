//! Nine-type aggregator.
//!
//! Pipeline:
//!
//! - raw affinity per type from item loadings
//! - temperament prior keyed by the typology code
//! - softmax over `raw + prior`
//! - stable descending sort; the first entry is the primary type

use std::fmt;

use serde::Serialize;

use crate::catalog::ItemCatalog;
use crate::domain::{LikertScale, NineType, NineTypeProbability, NineTypeResult, PerType, ResponseSet, TypeCode};
use crate::math::{clamp01, softmax, to01};
use crate::scoring::prior::temperament_prior;

/// `Σ to01(response) * loading * item.weight` per type.
pub fn raw_affinity(responses: &ResponseSet, catalog: &ItemCatalog, scale: LikertScale) -> PerType<f64> {
    let mut raw = PerType::<f64>::default();

    for item in catalog.items() {
        if !item.has_nine_type() {
            continue;
        }
        let Some(response) = responses.get(item.id) else { continue };
        let v = to01(response, item.reverse, scale);

        for (t, loading) in item.nine_type.iter() {
            if let Some(w) = *loading {
                *raw.get_mut(t) += v * w * item.weight;
            }
        }
    }

    raw
}

/// Softmax over per-type logits, sorted by descending probability.
///
/// Ties keep ascending type order.
pub fn distribution_from_logits(logits: &PerType<f64>) -> NineTypeResult {
    let probs = softmax(&logits.0);
    let mut distribution: Vec<NineTypeProbability> = NineType::ALL
        .iter()
        .zip(probs)
        .map(|(&nine_type, p)| NineTypeProbability { nine_type, p: clamp01(p) })
        .collect();
    distribution.sort_by(|a, b| b.p.total_cmp(&a.p));

    let (primary, prob_top) = distribution
        .first()
        .map(|top| (top.nine_type, top.p))
        .unwrap_or((NineType::Five, 0.0));

    NineTypeResult {
        primary,
        prob_top,
        distribution,
    }
}

pub fn score_nine_type(
    responses: &ResponseSet,
    catalog: &ItemCatalog,
    scale: LikertScale,
    code: &TypeCode,
) -> NineTypeResult {
    let raw = raw_affinity(responses, catalog, scale);
    let prior = temperament_prior(code);
    let logits = PerType::from_fn(|t| raw.get(t) + prior.get(t));
    distribution_from_logits(&logits)
}

/// Rank tier of a candidate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateTier {
    High,
    Medium,
    Low,
}

impl CandidateTier {
    fn for_rank(rank: usize) -> Self {
        match rank {
            0 => CandidateTier::High,
            1 => CandidateTier::Medium,
            _ => CandidateTier::Low,
        }
    }
}

impl fmt::Display for CandidateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CandidateTier::High => "high",
            CandidateTier::Medium => "medium",
            CandidateTier::Low => "low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NineTypeCandidate {
    #[serde(rename = "type")]
    pub nine_type: NineType,
    pub p: f64,
    pub tier: CandidateTier,
}

impl NineTypeResult {
    /// The `n` most probable types with rank tiers.
    pub fn top_candidates(&self, n: usize) -> Vec<NineTypeCandidate> {
        self.distribution
            .iter()
            .take(n)
            .enumerate()
            .map(|(rank, entry)| NineTypeCandidate {
                nine_type: entry.nine_type,
                p: entry.p,
                tier: CandidateTier::for_rank(rank),
            })
            .collect()
    }

    /// Runner-up type when it neighbours the primary on the circle.
    pub fn wing(&self) -> Option<NineType> {
        let runner_up = self.distribution.get(1)?.nine_type;
        self.primary.neighbours().contains(&runner_up).then_some(runner_up)
    }

    /// `5w4` style label, or just the primary number without a wing.
    pub fn wing_label(&self) -> String {
        match self.wing() {
            Some(w) => format!("{}w{}", self.primary, w),
            None => self.primary.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemMeta, PerAxis};

    fn logits(values: [f64; 9]) -> PerType<f64> {
        PerType(values)
    }

    #[test]
    fn raw_affinity_sums_weighted_loadings() {
        let catalog = ItemCatalog::new(vec![
            ItemMeta::new(1).nine_type(NineType::Five, 1.0),
            ItemMeta::new(2).nine_type(NineType::Five, 0.5).weight(2.0),
            ItemMeta::new(3).nine_type(NineType::Two, 1.0).nine_type(NineType::Nine, -0.5),
        ])
        .unwrap();
        let responses = ResponseSet::from_positional(&[7, 4, 7]);
        let raw = raw_affinity(&responses, &catalog, LikertScale::SEVEN_POINT);
        assert!((raw.get(NineType::Five) - 1.5).abs() < 1e-12);
        assert!((raw.get(NineType::Two) - 1.0).abs() < 1e-12);
        assert!((raw.get(NineType::Nine) + 0.5).abs() < 1e-12);
        assert_eq!(*raw.get(NineType::One), 0.0);
    }

    #[test]
    fn distribution_is_sorted_and_normalized() {
        let result = distribution_from_logits(&logits([0.1, 0.9, 0.3, 0.0, 2.0, 0.2, 0.0, 0.0, 0.5]));
        assert_eq!(result.distribution.len(), 9);
        let total: f64 = result.distribution.iter().map(|e| e.p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(result.distribution.windows(2).all(|w| w[0].p >= w[1].p));
        assert_eq!(result.primary, NineType::Five);
        assert_eq!(result.prob_top, result.distribution[0].p);
    }

    #[test]
    fn ties_keep_ascending_type_order() {
        let result = distribution_from_logits(&logits([0.0; 9]));
        let order: Vec<u8> = result.distribution.iter().map(|e| e.nine_type.number()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(result.primary, NineType::One);
    }

    #[test]
    fn prior_breaks_ties_by_temperament() {
        let catalog = ItemCatalog::new(vec![ItemMeta::new(1).nine_type(NineType::Three, 1.0)]).unwrap();
        let responses = ResponseSet::from_positional(&[1]);
        let nt = TypeCode::from_axes(&PerAxis { ei: 0.1, sn: 0.9, tf: 0.9, jp: 0.1 });
        let result = score_nine_type(&responses, &catalog, LikertScale::SEVEN_POINT, &nt);
        assert_eq!(result.primary, NineType::Five);
        assert_eq!(result.distribution[1].nine_type, NineType::One);
    }

    #[test]
    fn candidates_and_wing() {
        let result = distribution_from_logits(&logits([0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.0]));
        let top = result.top_candidates(3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].tier, CandidateTier::High);
        assert_eq!(top[1].tier, CandidateTier::Medium);
        assert_eq!(top[2].tier, CandidateTier::Low);
        assert_eq!(result.wing(), Some(NineType::Four));
        assert_eq!(result.wing_label(), "5w4");
    }

    #[test]
    fn wing_wraps_and_requires_adjacency() {
        let wrap = distribution_from_logits(&logits([1.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]));
        assert_eq!(wrap.wing_label(), "9w1");

        let far = distribution_from_logits(&logits([0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 1.5, 0.0]));
        assert_eq!(far.wing(), None);
        assert_eq!(far.wing_label(), "5");
    }
}
