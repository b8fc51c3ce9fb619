//! Command-line parsing for the `im` scoring tool.
//!
//! The goal of this module is to keep **argument parsing** separate from command
//! dispatch (`app`) and from the scoring code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "im", version, about = "Deterministic psychometric scoring engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one response set and print a summary (or JSON).
    Score(ScoreArgs),
    /// Score one response set per JSONL line in parallel.
    Batch(BatchArgs),
    /// Generate synthetic respondents as JSONL.
    Sample(SampleArgs),
    /// Print the coverage audit of the item catalog.
    Catalog(CatalogArgs),
}

/// Engine options shared by the scoring commands.
///
/// Flags override values from the environment (`IM_*`, `.env`).
#[derive(Debug, Args, Clone, Default)]
pub struct EngineArgs {
    /// Use the legacy 5-point scale instead of the 7-point default.
    #[arg(long)]
    pub legacy_scale: bool,

    /// Enable the nonlinear harmony term in Inner9.
    #[arg(long)]
    pub nonlinear: bool,

    /// Apply the typology modifier to Inner9 (optionally with a custom magnitude).
    #[arg(long, value_name = "ALPHA", num_args = 0..=1, default_missing_value = "5")]
    pub typology_modifier: Option<f64>,

    /// Apply the nine-type modifier to Inner9 (optionally with a custom magnitude).
    #[arg(long, value_name = "BETA", num_args = 0..=1, default_missing_value = "4")]
    pub nine_type_modifier: Option<f64>,

    /// Item catalog JSON to use instead of the compiled-in one.
    #[arg(long, value_name = "JSON")]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    /// Responses JSON: `{"1": 4, ...}`, `[4, ...]` or `{"id": ..., "responses": ...}`.
    #[arg(long, short = 'r', value_name = "JSON")]
    pub responses: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Print the full result as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Also write the result JSON to this file.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Disable the terminal bar charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// JSONL file with one response set per line.
    #[arg(long, short = 'i', value_name = "JSONL")]
    pub input: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Export one CSV row per input.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Write full results as JSONL.
    #[arg(long = "json-out", value_name = "JSONL")]
    pub json_out: Option<PathBuf>,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart height (rows).
    #[arg(long, default_value_t = 10)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Number of respondents to generate.
    #[arg(long, short = 'n', default_value_t = 100)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output JSONL path.
    #[arg(long, short = 'o', value_name = "JSONL")]
    pub output: PathBuf,

    /// Generate on the legacy 5-point scale.
    #[arg(long)]
    pub legacy_scale: bool,

    /// Item catalog JSON to use instead of the compiled-in one.
    #[arg(long, value_name = "JSON")]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CatalogArgs {
    /// Catalog JSON to audit instead of the compiled-in one.
    #[arg(long, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// Write the audited catalog as JSON (a template for custom catalogs).
    #[arg(long, value_name = "JSON")]
    pub dump: Option<PathBuf>,

    /// Print the audit as JSON.
    #[arg(long)]
    pub json: bool,
}
