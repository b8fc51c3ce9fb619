//! Model aggregators.
//!
//! Dependency order within one run:
//!
//! - `typology` first (axes and code)
//! - `big5` (native values blended with the axes via `blend`)
//! - `nine_type` (item affinity plus the `prior` keyed by the code)

pub mod accumulator;
pub mod big5;
pub mod blend;
pub mod nine_type;
pub mod prior;
pub mod typology;

pub use big5::*;
pub use blend::{BLEND_TABLE, BlendRule, blend_with_typology};
pub use nine_type::*;
pub use prior::{Temperament, temperament_prior};
pub use typology::*;
