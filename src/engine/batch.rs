//! Parallel batch scoring.

use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::catalog::ItemCatalog;
use crate::config::EngineOptions;
use crate::domain::{EngineResult, ResponseSet};
use crate::engine::run_at;
use crate::error::ScoringError;

/// Outcome counts for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub scored: usize,
    pub fallbacks: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[Result<EngineResult, ScoringError>]) -> Self {
        let mut summary = BatchSummary {
            total: results.len(),
            ..BatchSummary::default()
        };
        for r in results {
            match r {
                Ok(result) if result.fallback => summary.fallbacks += 1,
                Ok(_) => summary.scored += 1,
                Err(_) => summary.rejected += 1,
            }
        }
        summary
    }
}

/// Score independent response sets in parallel; results keep input order.
///
/// All results in one batch share a single timestamp.
pub fn score_batch(
    sets: &[ResponseSet],
    catalog: &ItemCatalog,
    options: &EngineOptions,
) -> Vec<Result<EngineResult, ScoringError>> {
    let generated_at = Utc::now();
    let results: Vec<_> = sets
        .par_iter()
        .map(|responses| run_at(responses, catalog, options, generated_at))
        .collect();

    let summary = BatchSummary::from_results(&results);
    info!(
        total = summary.total,
        scored = summary.scored,
        fallbacks = summary.fallbacks,
        rejected = summary.rejected,
        "batch scored"
    );
    results
}
