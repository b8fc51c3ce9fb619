//! Inner9 composites.
//!
//! - `mapper`: pure Big5 → Inner9 formulas and their configuration
//! - `modifiers`: opt-in typology / nine-type adjustments

pub mod mapper;
pub mod modifiers;

pub use mapper::*;
pub use modifiers::apply_modifiers;
