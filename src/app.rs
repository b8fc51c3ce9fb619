//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs the log subscriber
//! - parses CLI arguments
//! - resolves engine options (env, then flags)
//! - runs the scoring pipeline
//! - prints reports/plots and writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{BatchArgs, CatalogArgs, Command, EngineArgs, SampleArgs, ScoreArgs};
use crate::config::EngineOptions;
use crate::domain::LikertScale;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `im` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Score(args) => handle_score(args),
        Command::Batch(args) => handle_batch(args),
        Command::Sample(args) => handle_sample(args),
        Command::Catalog(args) => handle_catalog(args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second install (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let options = engine_options_from_args(&args.engine)?;
    let run = pipeline::run_score(&args.responses, args.engine.catalog.as_deref(), &options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&run.result)
            .map_err(|e| AppError::new(4, format!("Failed to serialize result: {e}")))?;
        println!("{json}");
    } else {
        let width = (!args.no_plot).then_some(args.width);
        println!("{}", crate::report::format_result_summary(&run.result, width));
    }

    if let Some(path) = &args.output {
        crate::io::export::write_result_json(path, &run.result)?;
    }
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let options = engine_options_from_args(&args.engine)?;
    let run = pipeline::run_batch(&args.input, args.engine.catalog.as_deref(), &options)?;

    let height = (!args.no_plot).then_some(args.height);
    println!("{}", crate::report::format_batch_report(&run.report, height));

    if let Some(path) = &args.export {
        crate::io::export::write_batch_csv(path, &run.rows)?;
    }
    if let Some(path) = &args.json_out {
        crate::io::export::write_batch_jsonl(path, &run.rows)?;
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let scale = if args.legacy_scale {
        LikertScale::FIVE_POINT
    } else {
        LikertScale::SEVEN_POINT
    };
    let catalog = pipeline::load_catalog(args.catalog.as_deref())?;
    let sample = crate::data::generate_respondents(&catalog, scale, args.count, args.seed)?;
    crate::io::responses::write_respondents_jsonl(&args.output, &sample.respondents)?;

    println!(
        "Wrote {} respondents x {} items to {} (mean response {:.2}, extremes {:.1}%)",
        sample.stats.respondents,
        sample.stats.items,
        args.output.display(),
        sample.stats.mean_response,
        sample.stats.extreme_share * 100.0
    );
    Ok(())
}

fn handle_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = pipeline::load_catalog(args.catalog.as_deref())?;
    let audit = catalog.audit();

    if args.json {
        let json = serde_json::to_string_pretty(&audit)
            .map_err(|e| AppError::new(4, format!("Failed to serialize audit: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_catalog_audit(&audit));
    }

    if let Some(path) = &args.dump {
        crate::io::catalog::write_catalog_json(path, &catalog)?;
    }
    Ok(())
}

/// Environment defaults, then CLI flags on top.
pub fn engine_options_from_args(args: &EngineArgs) -> Result<EngineOptions, AppError> {
    let base = EngineOptions::from_env()?;
    Ok(apply_engine_args(base, args))
}

/// Overlay CLI flags on already-resolved options.
pub fn apply_engine_args(mut options: EngineOptions, args: &EngineArgs) -> EngineOptions {
    if args.legacy_scale {
        options.scale = LikertScale::FIVE_POINT;
    }
    if args.nonlinear {
        options.inner9.nonlinear = true;
    }
    if args.typology_modifier.is_some() {
        options.inner9.typology_modifier = args.typology_modifier;
    }
    if args.nine_type_modifier.is_some() {
        options.inner9.nine_type_modifier = args.nine_type_modifier;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_options() {
        let args = EngineArgs {
            legacy_scale: true,
            nonlinear: true,
            typology_modifier: Some(3.0),
            ..EngineArgs::default()
        };
        let options = apply_engine_args(EngineOptions::default(), &args);
        assert_eq!(options.scale, LikertScale::FIVE_POINT);
        assert!(options.inner9.nonlinear);
        assert_eq!(options.inner9.typology_modifier, Some(3.0));
        assert_eq!(options.inner9.nine_type_modifier, None);
    }

    #[test]
    fn absent_flags_keep_resolved_options() {
        let mut base = EngineOptions::default();
        base.inner9.nine_type_modifier = Some(4.0);
        let options = apply_engine_args(base, &EngineArgs::default());
        assert_eq!(options, base);
    }
}
