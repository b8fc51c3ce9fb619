//! `im-core` library crate: deterministic psychometric scoring.
//!
//! The binary (`im`) is a thin wrapper around this library so that:
//!
//! - the scoring engine is testable without spawning processes
//! - modules are reusable from services that embed the engine
//! - code stays easy to navigate as the project grows
//!
//! Library entry points live in [`engine`]: `run`, `run_at`, `run_default` and
//! `score_batch`.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod inner9;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod scoring;
