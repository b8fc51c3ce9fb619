//! Item metadata registry.
//!
//! - the compiled-in questionnaire (`items`)
//! - validated, indexed catalogs and coverage audits (`registry`)

pub mod items;
pub mod registry;

pub use items::default_items;
pub use registry::*;
