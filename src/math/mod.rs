//! Numeric primitives: Likert normalization, confidence/boundary rules, softmax.

pub mod confidence;
pub mod normalize;
pub mod softmax;

pub use confidence::*;
pub use normalize::*;
pub use softmax::*;
