//! Scoring orchestrator.
//!
//! One call runs, in order:
//!
//! - input shape checks (scale, item set) which fail fast
//! - typology → Big5 (blended with the axes) → nine-type (prior keyed by the code)
//! - Inner9 mapping plus any enabled modifiers
//! - validation, substituting the neutral fallback on failure
//!
//! Everything here is synchronous and side-effect free apart from logging.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::catalog::ItemCatalog;
use crate::domain::{EngineResult, ResponseSet};
use crate::error::ScoringError;
use crate::inner9::{apply_modifiers, map_inner9};
use crate::scoring::{score_big5, score_nine_type, score_typology};

pub mod batch;
pub mod validate;

pub use crate::config::EngineOptions;
pub use batch::*;
pub use validate::*;

/// Stamped into every result. Bump on any formula change.
pub const ENGINE_VERSION: &str = "im-core@2.3.0";

/// Score one response set, timestamped now.
pub fn run(responses: &ResponseSet, catalog: &ItemCatalog, options: &EngineOptions) -> Result<EngineResult, ScoringError> {
    run_at(responses, catalog, options, Utc::now())
}

/// Score with the default catalog and default options.
pub fn run_default(responses: &ResponseSet) -> Result<EngineResult, ScoringError> {
    run(responses, ItemCatalog::default_catalog(), &EngineOptions::default())
}

/// Score one response set with an explicit timestamp.
///
/// For a fixed input, catalog and options the result is fully determined by
/// `generated_at`.
pub fn run_at(
    responses: &ResponseSet,
    catalog: &ItemCatalog,
    options: &EngineOptions,
    generated_at: DateTime<Utc>,
) -> Result<EngineResult, ScoringError> {
    let scale = options.scale.check()?;
    catalog.check_responses(responses)?;

    let fingerprint = responses.fingerprint();
    debug!(fingerprint = %fingerprint, items = responses.len(), "scoring response set");

    let typology = score_typology(responses, catalog, scale);
    let big5 = score_big5(responses, catalog, scale, &typology.axis01);
    let nine_type = score_nine_type(responses, catalog, scale, &typology.code);

    let inner9 = map_inner9(&big5.scores, &options.inner9);
    let inner9 = apply_modifiers(inner9, &options.inner9, &typology.code, nine_type.primary);

    debug!(
        code = %typology.code,
        primary = %nine_type.primary,
        prob_top = nine_type.prob_top,
        "aggregators finished"
    );

    let result = EngineResult {
        engine_version: ENGINE_VERSION.to_string(),
        generated_at,
        fingerprint,
        big5,
        typology,
        nine_type,
        inner9,
        fallback: false,
    };

    let report = validate(&result);
    if report.valid {
        return Ok(result);
    }

    warn!(
        fingerprint = %result.fingerprint,
        errors = ?report.errors,
        "result failed validation; substituting neutral fallback"
    );
    Ok(EngineResult {
        fingerprint: result.fingerprint,
        ..neutral_fallback(generated_at)
    })
}
