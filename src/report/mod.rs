//! Reporting utilities: batch summaries and formatted terminal output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Big5Trait, EngineResult, Inner9Scores, NineType, PerTrait, PerType};
use crate::engine::BatchSummary;
use crate::error::ScoringError;
use crate::math::mean;

pub mod format;

pub use format::*;

/// Aggregate view of a scored batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    /// Mean Big5 score over scored results (fallbacks excluded).
    pub big5_means: PerTrait<f64>,
    /// Mean Inner9 profile, if anything was scored.
    pub inner9_means: Option<Inner9Scores>,
    /// Type codes with their counts, most frequent first.
    pub code_counts: Vec<(String, usize)>,
    pub primary_counts: PerType<usize>,
    /// Share of scored results with at least one boundary axis.
    pub boundary_share: f64,
}

/// Summarize a batch. Rejected inputs and fallbacks only count toward `summary`.
pub fn summarize_batch(results: &[Result<EngineResult, ScoringError>]) -> BatchReport {
    let scored: Vec<&EngineResult> = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .filter(|r| !r.fallback)
        .collect();

    let big5_means = PerTrait::from_fn(|t: Big5Trait| {
        let values: Vec<f64> = scored.iter().map(|r| f64::from(*r.big5.scores.get(t))).collect();
        mean(&values)
    });

    let mut codes: BTreeMap<String, usize> = BTreeMap::new();
    let mut primary_counts = PerType::<usize>::default();
    let mut with_boundary = 0usize;
    for r in &scored {
        *codes.entry(r.typology.code.to_string()).or_default() += 1;
        *primary_counts.get_mut(r.nine_type.primary) += 1;
        if !r.typology.boundary_axes().is_empty() {
            with_boundary += 1;
        }
    }

    // Stable sort over the BTreeMap order keeps ties alphabetical.
    let mut code_counts: Vec<(String, usize)> = codes.into_iter().collect();
    code_counts.sort_by(|a, b| b.1.cmp(&a.1));

    BatchReport {
        summary: BatchSummary::from_results(results),
        big5_means,
        inner9_means: mean_inner9(results),
        code_counts,
        primary_counts,
        boundary_share: if scored.is_empty() {
            0.0
        } else {
            with_boundary as f64 / scored.len() as f64
        },
    }
}

/// Mean Inner9 profile over scored results.
pub fn mean_inner9(results: &[Result<EngineResult, ScoringError>]) -> Option<Inner9Scores> {
    let scored: Vec<&Inner9Scores> = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .filter(|r| !r.fallback)
        .map(|r| &r.inner9)
        .collect();
    if scored.is_empty() {
        return None;
    }

    let mut out = Inner9Scores::default();
    for dim in crate::domain::Inner9Dimension::ALL {
        let values: Vec<f64> = scored.iter().map(|s| f64::from(s.get(dim))).collect();
        *out.get_mut(dim) = crate::math::score100(mean(&values));
    }
    Some(out)
}

impl BatchReport {
    /// `(type, count)` pairs in type order, for charts.
    pub fn primary_count_rows(&self) -> Vec<(String, usize)> {
        NineType::ALL
            .iter()
            .map(|&t| (t.to_string(), *self.primary_counts.get(t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResponseSet;
    use crate::engine::run_default;

    #[test]
    fn summarize_counts_and_means() {
        let results = vec![
            run_default(&ResponseSet::from_positional(&[4; 62])),
            run_default(&ResponseSet::from_positional(&[4; 62])),
            run_default(&ResponseSet::from_positional(&[4; 5])),
        ];
        let report = summarize_batch(&results);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.scored, 2);
        assert_eq!(report.summary.rejected, 1);
        assert_eq!(report.big5_means.openness, 50.0);
        assert_eq!(report.code_counts, vec![("ENTJ".to_string(), 2)]);
        assert_eq!(report.boundary_share, 1.0);
        assert_eq!(report.primary_count_rows().iter().map(|(_, c)| c).sum::<usize>(), 2);

        let inner9 = mean_inner9(&results).unwrap();
        assert_eq!(inner9.resilience, 50);
    }

    #[test]
    fn empty_batch_is_safe() {
        let report = summarize_batch(&[]);
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.boundary_share, 0.0);
        assert!(report.code_counts.is_empty());
        assert!(mean_inner9(&[]).is_none());
    }
}
