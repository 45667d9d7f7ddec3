//! The seam between the prediction service and whatever model produced the
//! artifact.
//!
//! The service only needs one operation: score a single encoded row. Anything
//! else an estimator can tell us (target transform, training vocabulary) is
//! optional metadata with a conservative default.

use crate::domain::{Feature, FeatureRecord};
use crate::error::ModelError;
use crate::math::TargetTransform;

/// A trained, read-only price model.
///
/// `Send + Sync` is required: one instance is loaded at startup and shared by
/// every request, so `predict_one` must be safe to call concurrently.
pub trait Estimator: Send + Sync {
    /// Score one row. The output is on the model's target scale.
    fn predict_one(&self, record: &FeatureRecord) -> Result<f64, ModelError>;

    /// Transform the target was fit on.
    fn target_transform(&self) -> TargetTransform {
        TargetTransform::Log1p
    }

    /// Whether `value` was a training level of the categorical `feature`.
    ///
    /// `None` means the estimator does not expose its vocabulary.
    fn knows_category(&self, _feature: Feature, _value: &str) -> Option<bool> {
        None
    }

    fn name(&self) -> &str {
        "estimator"
    }
}

/// Adapts a plain function or closure into an [`Estimator`].
pub struct FnEstimator<F> {
    func: F,
    transform: TargetTransform,
}

impl<F> FnEstimator<F>
where
    F: Fn(&FeatureRecord) -> Result<f64, ModelError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            transform: TargetTransform::Log1p,
        }
    }

    pub fn with_transform(mut self, transform: TargetTransform) -> Self {
        self.transform = transform;
        self
    }
}

impl<F> Estimator for FnEstimator<F>
where
    F: Fn(&FeatureRecord) -> Result<f64, ModelError> + Send + Sync,
{
    fn predict_one(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        (self.func)(record)
    }

    fn target_transform(&self) -> TargetTransform {
        self.transform
    }

    fn name(&self) -> &str {
        "fn"
    }
}
