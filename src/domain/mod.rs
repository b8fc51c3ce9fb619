//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - scale and identity types (`LikertScale`, `ItemId`, `ResponseSet`)
//! - the closed model vocabularies (`Big5Trait`, `Axis`, `NineType`, `Inner9Dimension`)
//! - item metadata (`ItemMeta` with fixed-shape loading records)
//! - result records (`Big5Result`, `TypologyResult`, `NineTypeResult`, `EngineResult`)

pub mod types;

pub use types::*;
