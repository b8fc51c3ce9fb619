//! Synthetic respondent generation from latent profiles.
//!
//! Each respondent gets one standard-normal latent per Big5 trait, typological
//! axis and nine-type. An item's expected response is the sum of its signed
//! loadings on those latents (negated for reverse-keyed items), perturbed by
//! Gaussian noise, rounded and clamped to the scale.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde::Serialize;

use crate::catalog::ItemCatalog;
use crate::domain::{AxisSign, ItemMeta, LikertScale, PerAxis, PerTrait, PerType, ResponseSet};
use crate::error::AppError;

/// Spread of the expected response around the midpoint, as a share of the half range.
const LATENT_SCALE: f64 = 0.5;
/// Noise amplitude relative to the latent signal.
const NOISE_SCALE: f64 = 0.5;

/// Latent position of one synthetic respondent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatentProfile {
    pub traits: PerTrait<f64>,
    pub axes: PerAxis<f64>,
    pub types: PerType<f64>,
}

impl LatentProfile {
    fn draw(rng: &mut StdRng, normal: &Normal<f64>) -> Self {
        Self {
            traits: PerTrait::from_fn(|_| normal.sample(&mut *rng)),
            axes: PerAxis::from_fn(|_| normal.sample(&mut *rng)),
            types: PerType::from_fn(|_| normal.sample(&mut *rng)),
        }
    }

    /// Signed latent signal an item carries for this profile.
    fn item_signal(&self, item: &ItemMeta) -> f64 {
        let mut signal = 0.0;
        if let Some(loading) = item.axis {
            let pole = match loading.sign {
                AxisSign::Positive => 1.0,
                AxisSign::Negative => -1.0,
            };
            signal += pole * self.axes.get(loading.axis);
        }
        for (t, w) in item.big5.iter() {
            if let Some(w) = w {
                signal += w * self.traits.get(t);
            }
        }
        for (t, w) in item.nine_type.iter() {
            if let Some(w) = w {
                signal += w * self.types.get(t);
            }
        }
        if item.reverse { -signal } else { signal }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleRespondent {
    pub id: String,
    pub profile: LatentProfile,
    pub responses: ResponseSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleStats {
    pub respondents: usize,
    pub items: usize,
    pub mean_response: f64,
    /// Share of responses at either end of the scale.
    pub extreme_share: f64,
}

#[derive(Debug, Clone)]
pub struct SampleData {
    pub respondents: Vec<SampleRespondent>,
    pub stats: SampleStats,
}

/// Generate `count` respondents answering every item of `catalog`.
///
/// Deterministic for a given `(catalog, scale, count, seed)`.
pub fn generate_respondents(
    catalog: &ItemCatalog,
    scale: LikertScale,
    count: usize,
    seed: u64,
) -> Result<SampleData, AppError> {
    if count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    let scale = scale.check()?;

    let mut rng = StdRng::seed_from_u64(sample_seed(catalog, scale, count, seed));
    let normal = Normal::new(0.0, 1.0).map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let midpoint = scale.midpoint();
    let half_range = scale.span() as f64 / 2.0;

    let mut respondents = Vec::with_capacity(count);
    for i in 0..count {
        let profile = LatentProfile::draw(&mut rng, &normal);
        let responses: ResponseSet = catalog
            .items()
            .iter()
            .map(|item| {
                let noise = normal.sample(&mut rng);
                let latent = profile.item_signal(item) + NOISE_SCALE * noise;
                let value = (midpoint + half_range * LATENT_SCALE * latent).round() as i32;
                (item.id, scale.clamp(value))
            })
            .collect();

        respondents.push(SampleRespondent {
            id: format!("R-{:04}", i + 1),
            profile,
            responses,
        });
    }

    let stats = compute_stats(&respondents, catalog.len(), scale);
    Ok(SampleData { respondents, stats })
}

fn sample_seed(catalog: &ItemCatalog, scale: LikertScale, count: usize, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    count.hash(&mut hasher);
    scale.min.hash(&mut hasher);
    scale.max.hash(&mut hasher);
    catalog.len().hash(&mut hasher);
    hasher.finish()
}

fn compute_stats(respondents: &[SampleRespondent], items: usize, scale: LikertScale) -> SampleStats {
    let mut total = 0i64;
    let mut n = 0usize;
    let mut extremes = 0usize;
    for r in respondents {
        for (_, v) in r.responses.iter() {
            total += i64::from(v);
            n += 1;
            if v == scale.min || v == scale.max {
                extremes += 1;
            }
        }
    }
    let denom = n.max(1) as f64;

    SampleStats {
        respondents: respondents.len(),
        items,
        mean_response: total as f64 / denom,
        extreme_share: extremes as f64 / denom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Axis, Big5Trait};

    #[test]
    fn same_seed_same_sample() {
        let catalog = ItemCatalog::default_catalog();
        let a = generate_respondents(catalog, LikertScale::SEVEN_POINT, 5, 42).unwrap();
        let b = generate_respondents(catalog, LikertScale::SEVEN_POINT, 5, 42).unwrap();
        let c = generate_respondents(catalog, LikertScale::SEVEN_POINT, 5, 43).unwrap();
        let responses = |s: &SampleData| s.respondents.iter().map(|r| r.responses.clone()).collect::<Vec<_>>();
        assert_eq!(responses(&a), responses(&b));
        assert_ne!(responses(&a), responses(&c));
    }

    #[test]
    fn responses_cover_catalog_and_stay_on_scale() {
        let catalog = ItemCatalog::default_catalog();
        let sample = generate_respondents(catalog, LikertScale::FIVE_POINT, 20, 7).unwrap();
        assert_eq!(sample.stats.respondents, 20);
        for r in &sample.respondents {
            assert!(catalog.check_responses(&r.responses).is_ok());
            assert!(r.responses.iter().all(|(_, v)| (1..=5).contains(&v)));
        }
        assert!(sample.stats.mean_response > 1.0 && sample.stats.mean_response < 5.0);
    }

    #[test]
    fn reverse_items_invert_the_signal() {
        let profile = LatentProfile {
            traits: PerTrait { openness: 1.5, ..PerTrait::default() },
            axes: PerAxis { ei: -1.0, ..PerAxis::default() },
            types: PerType::default(),
        };
        let forward = ItemMeta::new(1).big5(Big5Trait::Openness, 1.0);
        let reverse = forward.clone().reversed();
        assert_eq!(profile.item_signal(&forward), 1.5);
        assert_eq!(profile.item_signal(&reverse), -1.5);

        let i_item = ItemMeta::new(2).axis(Axis::Ei, AxisSign::Negative);
        assert_eq!(profile.item_signal(&i_item), 1.0);
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = generate_respondents(ItemCatalog::default_catalog(), LikertScale::SEVEN_POINT, 0, 1).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
