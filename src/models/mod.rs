//! Price models.
//!
//! The prediction service depends only on the [`Estimator`] trait; the linear
//! one-hot model is the artifact format this crate can load from disk.

pub mod artifact;
pub mod estimator;
pub mod linear;

pub use artifact::{HandleUnknown, ModelFile};
pub use estimator::{Estimator, FnEstimator};
pub use linear::{LinearModel, ModelSummary};
