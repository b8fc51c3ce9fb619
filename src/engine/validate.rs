//! Post-hoc invariant checks and the neutral fallback result.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    Axis, Big5Trait, EngineResult, NineType, NineTypeProbability, NineTypeResult, PerAxis, PerTrait, TypeCode,
};
use crate::engine::ENGINE_VERSION;
use crate::inner9::{Inner9Config, map_inner9};
use crate::math::{boundary, to100};
use crate::scoring::{big5_from_values, typology_from_axes};

/// Allowed deviation of the distribution sum from 1.
pub const DISTRIBUTION_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

fn unit(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

/// Re-check every structural invariant of a finished result.
pub fn validate(result: &EngineResult) -> ValidationReport {
    let mut errors = Vec::new();

    if result.engine_version.trim().is_empty() {
        errors.push("engine version is empty".to_string());
    }

    check_big5(result, &mut errors);
    check_typology(result, &mut errors);
    check_nine_type(&result.nine_type, &mut errors);

    for (dim, score) in result.inner9.iter() {
        if score > 100 {
            errors.push(format!("inner9 {} out of range: {score}", dim.display_name()));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn check_big5(result: &EngineResult, errors: &mut Vec<String>) {
    let big5 = &result.big5;
    for t in Big5Trait::ALL {
        let name = t.display_name();
        let score = *big5.scores.get(t);
        let value = *big5.values.get(t);
        if score > 100 {
            errors.push(format!("big5 {name} score out of range: {score}"));
        }
        if !unit(value) {
            errors.push(format!("big5 {name} value out of range: {value}"));
        }
        if !unit(*big5.confidence.traits.get(t)) {
            errors.push(format!("big5 {name} confidence out of range"));
        }
    }
    if !unit(big5.confidence.overall) {
        errors.push("big5 overall confidence out of range".to_string());
    }
}

fn check_typology(result: &EngineResult, errors: &mut Vec<String>) {
    let typology = &result.typology;

    for axis in Axis::ALL {
        let name = axis.display_name();
        let v01 = *typology.axis01.get(axis);
        let v100 = *typology.axis100.get(axis);
        if !unit(v01) {
            errors.push(format!("axis {name} value out of range: {v01}"));
            continue;
        }
        if v100 > 100 || v100 != to100(v01) {
            errors.push(format!("axis {name} scaled value {v100} does not match {v01}"));
        }
        if *typology.confidence.boundary.get(axis) != boundary(v100) {
            errors.push(format!("axis {name} boundary flag disagrees with {v100}"));
        }
        if !unit(*typology.confidence.axes.get(axis)) {
            errors.push(format!("axis {name} confidence out of range"));
        }
    }
    if !unit(typology.confidence.overall) {
        errors.push("typology overall confidence out of range".to_string());
    }

    if !typology.code.is_well_formed() {
        errors.push(format!("type code {:?} is malformed", typology.code.as_str()));
    } else if typology.axis01.iter().all(|(_, v)| unit(*v)) && TypeCode::from_axes(&typology.axis01) != typology.code {
        errors.push(format!("type code {} disagrees with axis values", typology.code));
    }
}

fn check_nine_type(nine: &NineTypeResult, errors: &mut Vec<String>) {
    let dist = &nine.distribution;
    if dist.len() != NineType::ALL.len() {
        errors.push(format!("distribution has {} entries, expected 9", dist.len()));
    }

    let mut seen = [0usize; 9];
    for entry in dist {
        seen[entry.nine_type.index()] += 1;
        if !unit(entry.p) {
            errors.push(format!("type {} probability out of range: {}", entry.nine_type, entry.p));
        }
    }
    for t in NineType::ALL {
        if seen[t.index()] != 1 {
            errors.push(format!("type {t} appears {} times in distribution", seen[t.index()]));
        }
    }

    let total: f64 = dist.iter().map(|e| e.p).sum();
    if !((total - 1.0).abs() <= DISTRIBUTION_SUM_TOLERANCE) {
        errors.push(format!("distribution sums to {total}"));
    }
    if dist.windows(2).any(|w| w[0].p < w[1].p) {
        errors.push("distribution is not sorted by descending probability".to_string());
    }

    match dist.first() {
        Some(top) => {
            if top.nine_type != nine.primary {
                errors.push(format!("primary {} is not the top entry {}", nine.primary, top.nine_type));
            }
            if top.p != nine.prob_top {
                errors.push(format!("prob_top {} does not match top entry {}", nine.prob_top, top.p));
            }
        }
        None => errors.push("distribution is empty".to_string()),
    }
}

/// A maximally-uncertain result that always satisfies [`validate`].
///
/// The fingerprint is left empty; the orchestrator fills in the input's.
pub fn neutral_fallback(generated_at: DateTime<Utc>) -> EngineResult {
    let big5 = big5_from_values(PerTrait::from_fn(|_| 0.5));
    let typology = typology_from_axes(PerAxis::from_fn(|_| 0.5));

    let uniform = 1.0 / NineType::ALL.len() as f64;
    let distribution: Vec<NineTypeProbability> = std::iter::once(NineType::Five)
        .chain(NineType::ALL.into_iter().filter(|&t| t != NineType::Five))
        .map(|nine_type| NineTypeProbability { nine_type, p: uniform })
        .collect();

    let inner9 = map_inner9(&big5.scores, &Inner9Config::default());

    EngineResult {
        engine_version: ENGINE_VERSION.to_string(),
        generated_at,
        fingerprint: String::new(),
        big5,
        typology,
        nine_type: NineTypeResult {
            primary: NineType::Five,
            prob_top: uniform,
            distribution,
        },
        inner9,
        fallback: true,
    }
}
