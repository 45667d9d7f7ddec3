//! Read/write model artifact JSON files.
//!
//! The schema is defined by `models::artifact::ModelFile`. Loading goes through
//! `LinearModel::try_from`, so a file that parses but is not a usable model is
//! rejected here rather than on the first request.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Estimator, LinearModel, ModelFile};

/// Read a model artifact file.
pub fn read_model_file(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open model artifact '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::usage(format!("Invalid model artifact '{}': {e}", path.display()))
    })
}

/// Write a model artifact file.
pub fn write_model_file(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::usage(format!("Failed to create '{}': {e}", parent.display()))
        })?;
    }
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create model artifact '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::usage(format!("Failed to write model artifact: {e}")))?;
    Ok(())
}

/// Read and validate a linear model artifact.
pub fn load_linear_model(path: &Path) -> Result<LinearModel, AppError> {
    let file = read_model_file(path)?;
    let model = LinearModel::try_from(file)?;
    log::info!(
        "loaded model '{}' from {} ({} columns, target {})",
        model.name(),
        path.display(),
        model.n_columns(),
        model.target_transform().name()
    );
    Ok(model)
}

/// Load the artifact once and hand it out as a shared, read-only estimator.
pub fn load_estimator(path: &Path) -> Result<Arc<dyn Estimator>, AppError> {
    Ok(Arc::new(load_linear_model(path)?))
}
