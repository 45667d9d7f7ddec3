//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the closed form vocabularies (`PropertyType`, `NewBuild`, `Tenure`)
//! - the encoded request and single-row model input (`PredictionRequest`, `FeatureRecord`)
//! - request outcomes (`PredictionResult`, `Estimate`, `Failure`)

pub mod types;

pub use types::*;
