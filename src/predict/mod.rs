//! Prediction serving.
//!
//! Score encoded requests with the loaded model and turn the output into a
//! displayable estimate.

pub mod global;
pub mod month;
pub mod service;

pub use month::month_name;
pub use service::{PredictionService, Pricing};
