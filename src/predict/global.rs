//! Process-wide prediction service.
//!
//! The model is loaded once at startup and then only read. Hosts that cannot
//! thread a `PredictionService` through to their request handlers install it
//! here and fetch it with [`get`].

use std::sync::OnceLock;

use crate::error::AppError;
use crate::predict::service::PredictionService;

static SERVICE: OnceLock<PredictionService> = OnceLock::new();

/// Install the process-wide service. Fails if one is already installed.
pub fn install(service: PredictionService) -> Result<&'static PredictionService, AppError> {
    SERVICE
        .set(service)
        .map_err(|_| AppError::usage("Prediction service is already installed."))?;
    SERVICE
        .get()
        .ok_or_else(|| AppError::usage("Prediction service failed to install."))
}

pub fn get() -> Option<&'static PredictionService> {
    SERVICE.get()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::FeatureRecord;
    use crate::models::FnEstimator;

    #[test]
    fn installs_exactly_once() {
        let make = || PredictionService::new(Arc::new(FnEstimator::new(|_: &FeatureRecord| Ok(1.0))));

        let installed = install(make()).unwrap();
        assert!(std::ptr::eq(installed, get().unwrap()));
        assert!(install(make()).is_err());
    }
}
