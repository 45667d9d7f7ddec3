//! `house-price-estimator` library crate.
//!
//! Turns a human-facing property description (type, new build, tenure,
//! county, year, month) into a price estimate from a pre-trained model:
//!
//! raw form → `io::normalize` → `PredictionRequest` → `predict::PredictionService` → `PredictionResult`
//!
//! The binary (`hpe`) is a thin wrapper around this library so that the
//! pipeline is testable without spawning processes and reusable from any
//! other front end.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod predict;
pub mod report;

pub use domain::{PredictionRequest, PredictionResult};
pub use error::{AppError, ErrorKind, PredictError};
pub use io::{RawForm, normalize};
pub use predict::PredictionService;
