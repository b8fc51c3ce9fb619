//! Shared scoring pipeline used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! catalog load -> response read -> scoring -> summary
//!
//! The command handlers can then focus on presentation (printing vs exports).

use std::borrow::Cow;
use std::path::Path;

use tracing::info;

use crate::catalog::ItemCatalog;
use crate::config::EngineOptions;
use crate::domain::{EngineResult, ResponseSet};
use crate::engine;
use crate::error::AppError;
use crate::io::export::BatchRow;
use crate::report::{BatchReport, summarize_batch};

/// Output of a single `im score` run.
#[derive(Debug, Clone)]
pub struct ScoreRun {
    pub responses: ResponseSet,
    pub result: EngineResult,
}

/// Output of an `im batch` run.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub rows: Vec<BatchRow>,
    pub report: BatchReport,
}

/// The compiled-in catalog, or one loaded from `path`.
pub fn load_catalog(path: Option<&Path>) -> Result<Cow<'static, ItemCatalog>, AppError> {
    match path {
        Some(path) => {
            let catalog = crate::io::catalog::read_catalog_json(path)?;
            info!(path = %path.display(), items = catalog.len(), "loaded catalog");
            Ok(Cow::Owned(catalog))
        }
        None => Ok(Cow::Borrowed(ItemCatalog::default_catalog())),
    }
}

/// Read and score one response set.
pub fn run_score(responses_path: &Path, catalog_path: Option<&Path>, options: &EngineOptions) -> Result<ScoreRun, AppError> {
    let catalog = load_catalog(catalog_path)?;
    let responses = crate::io::responses::read_responses_json(responses_path)?;
    let result = engine::run(&responses, &catalog, options)?;
    Ok(ScoreRun { responses, result })
}

/// Read and score every response set of a JSONL file.
///
/// Shape errors are kept per row; only I/O and parse failures abort the batch.
pub fn run_batch(input: &Path, catalog_path: Option<&Path>, options: &EngineOptions) -> Result<BatchRun, AppError> {
    let catalog = load_catalog(catalog_path)?;
    let records = crate::io::responses::read_responses_jsonl(input)?;

    let sets: Vec<ResponseSet> = records.iter().map(|r| r.responses.clone()).collect();
    let outcomes = engine::score_batch(&sets, &catalog, options);
    let report = summarize_batch(&outcomes);

    let rows = records
        .into_iter()
        .zip(outcomes)
        .map(|(record, outcome)| BatchRow { id: record.id, outcome })
        .collect();

    Ok(BatchRun { rows, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_respondents;
    use crate::domain::LikertScale;
    use crate::io::responses::write_respondents_jsonl;

    #[test]
    fn batch_pipeline_scores_generated_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.jsonl");
        let sample = generate_respondents(ItemCatalog::default_catalog(), LikertScale::SEVEN_POINT, 12, 3).unwrap();
        write_respondents_jsonl(&path, &sample.respondents).unwrap();

        let run = run_batch(&path, None, &EngineOptions::default()).unwrap();
        assert_eq!(run.rows.len(), 12);
        assert_eq!(run.report.summary.scored, 12);
        assert_eq!(run.rows[0].id, "R-0001");
    }

    #[test]
    fn score_pipeline_rejects_short_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(&path, "[4, 4, 4]").unwrap();
        let err = run_score(&path, None, &EngineOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
