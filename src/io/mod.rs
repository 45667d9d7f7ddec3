//! Input/output helpers.
//!
//! - raw form submissions (`form`)
//! - form → encoded request normalization (`normalize`)
//! - model artifact JSON read/write (`model_file`)

pub mod form;
pub mod model_file;
pub mod normalize;

pub use form::*;
pub use model_file::*;
pub use normalize::*;
