//! Input/output helpers.
//!
//! - response set reading and synthetic respondent writing (`responses`)
//! - alternative catalogs (`catalog`)
//! - result exports (CSV/JSON/JSONL) (`export`)

pub mod catalog;
pub mod export;
pub mod responses;

pub use catalog::*;
pub use export::*;
pub use responses::*;
