//! Numeric helpers: the target transform pair.

pub mod transform;

pub use transform::*;
