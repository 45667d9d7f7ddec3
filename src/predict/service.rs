//! The prediction service: encoded request in, priced estimate out.
//!
//! Per request:
//! 1. resolve the month name (display only)
//! 2. assemble the single-row feature record
//! 3. score it with the shared estimator
//! 4. invert the target transform
//! 5. round and format
//!
//! [`PredictionService::handle`] is the error boundary. Every failure,
//! including a panicking estimator, comes back as a
//! [`PredictionResult::Failure`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::domain::{
    DisplayInputs, Estimate, Failure, Feature, FeatureRecord, PredictionRequest, PredictionResult,
};
use crate::error::{ModelError, PredictError};
use crate::io::{RawForm, normalize};
use crate::models::Estimator;
use crate::predict::month::month_name;
use crate::report::format_price;

/// A priced request.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    pub month_name: &'static str,
    pub model_output: f64,
    pub price: f64,
    pub formatted_price: String,
}

#[derive(Clone)]
pub struct PredictionService {
    estimator: Arc<dyn Estimator>,
    strict_county: bool,
}

impl PredictionService {
    pub fn new(estimator: Arc<dyn Estimator>) -> Self {
        Self {
            estimator,
            strict_county: false,
        }
    }

    /// Reject counties the estimator reports as unseen in training.
    ///
    /// Has no effect for estimators that do not expose a county vocabulary.
    pub fn with_strict_county(mut self, strict: bool) -> Self {
        self.strict_county = strict;
        self
    }

    pub fn estimator(&self) -> &dyn Estimator {
        self.estimator.as_ref()
    }

    pub fn strict_county(&self) -> bool {
        self.strict_county
    }

    /// Price an already-normalized request.
    pub fn predict(&self, request: &PredictionRequest) -> Result<Pricing, PredictError> {
        let month_name = month_name(request.month)?;

        if self.strict_county
            && self
                .estimator
                .knows_category(Feature::County, &request.county)
                == Some(false)
        {
            return Err(PredictError::UnknownCategory {
                field: Feature::County.name(),
                value: request.county.clone(),
            });
        }

        let record = FeatureRecord::from_request(request);
        let model_output = self.invoke(&record)?;

        let transform = self.estimator.target_transform();
        let price = transform.inverse(model_output);
        if !price.is_finite() {
            return Err(PredictError::ModelInvocation(format!(
                "output {model_output} does not map to a finite price under {}",
                transform.name()
            )));
        }
        log::debug!(
            "model '{}' output {model_output:.6} ({}) -> {price:.2}",
            self.estimator.name(),
            transform.name()
        );

        Ok(Pricing {
            month_name,
            model_output,
            price,
            formatted_price: format_price(price),
        })
    }

    /// Normalize, price and echo one form submission.
    ///
    /// Never fails: errors become a [`PredictionResult::Failure`] carrying the
    /// error kind and a readable message.
    pub fn handle(&self, form: &RawForm) -> PredictionResult {
        match self.try_handle(form) {
            Ok(estimate) => {
                log::info!(
                    "estimate {} for {} {}",
                    estimate.formatted_price,
                    estimate.inputs.property_type,
                    estimate.inputs.county.trim()
                );
                PredictionResult::Estimate(estimate)
            }
            Err(err) => {
                log::warn!("prediction failed ({:?}): {err}", err.kind());
                PredictionResult::Failure(Failure {
                    kind: err.kind(),
                    error_message: err.to_string(),
                })
            }
        }
    }

    fn try_handle(&self, form: &RawForm) -> Result<Estimate, PredictError> {
        let request = normalize(form)?;
        let pricing = self.predict(&request)?;

        let echo = |feature: Feature| form.get(feature.name()).unwrap_or_default().to_string();
        let inputs = DisplayInputs {
            property_type: echo(Feature::PropertyType),
            new_build: echo(Feature::NewBuild),
            tenure: echo(Feature::Tenure),
            county: echo(Feature::County),
            year: echo(Feature::Year),
            month: pricing.month_name.to_string(),
        };

        Ok(Estimate {
            formatted_price: pricing.formatted_price,
            price: pricing.price,
            model_output: pricing.model_output,
            inputs,
        })
    }

    fn invoke(&self, record: &FeatureRecord) -> Result<f64, PredictError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.estimator.predict_one(record)));
        match outcome {
            Ok(Ok(y)) if y.is_finite() => Ok(y),
            Ok(Ok(y)) => Err(ModelError::NonFinite(y).into()),
            Ok(Err(err)) => Err(err.into()),
            Err(payload) => Err(PredictError::ModelInvocation(format!(
                "estimator panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewBuild, PropertyType, Tenure};
    use crate::error::ErrorKind;
    use crate::math::TargetTransform;
    use crate::models::{FnEstimator, LinearModel, ModelFile};

    fn constant(y: f64) -> PredictionService {
        PredictionService::new(Arc::new(FnEstimator::new(move |_: &FeatureRecord| Ok(y))))
    }

    fn surrey_form() -> RawForm {
        RawForm::from_pairs([
            ("property_type", "Detached"),
            ("new_build", "No"),
            ("tenure", "Freehold"),
            ("county", " Surrey "),
            ("year", "2020"),
            ("month", "6"),
        ])
    }

    fn request(month: i64) -> PredictionRequest {
        PredictionRequest {
            property_type: PropertyType::Detached,
            new_build: NewBuild::No,
            tenure: Tenure::Freehold,
            county: "Surrey".to_string(),
            year: 2020,
            month,
        }
    }

    #[test]
    fn inverts_log_price_and_formats() {
        let pricing = constant(12.5).predict(&request(6)).unwrap();
        assert_eq!(pricing.month_name, "June");
        assert_eq!(pricing.formatted_price, "£268,336");
        assert!((pricing.price - 268_336.286_52).abs() < 1e-4);
    }

    #[test]
    fn record_reaches_model_unchanged() {
        let service = PredictionService::new(Arc::new(FnEstimator::new(|r: &FeatureRecord| {
            assert_eq!(
                (r.property_type, r.new_build, r.tenure, r.county.as_str(), r.year, r.month),
                ("D", "N", "F", "Surrey", 2020, 6)
            );
            Ok(10.0)
        })));
        assert!(service.handle(&surrey_form()).is_estimate());
    }

    #[test]
    fn identity_models_are_not_inverted() {
        let service = PredictionService::new(Arc::new(
            FnEstimator::new(|_: &FeatureRecord| Ok(250_000.4))
                .with_transform(TargetTransform::Identity),
        ));
        let pricing = service.predict(&request(1)).unwrap();
        assert_eq!(pricing.formatted_price, "£250,000");
    }

    #[test]
    fn huge_finite_outputs_format_every_digit() {
        let pricing = constant(50.0).predict(&request(6)).unwrap();
        let digits: String = pricing
            .formatted_price
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        assert_eq!(digits, format!("{:.0}", pricing.price));
        assert!(digits.len() > 20);
    }

    #[test]
    fn hand_built_request_with_bad_month_is_rejected() {
        let err = constant(12.0).predict(&request(13)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
    }

    #[test]
    fn model_failures_become_invocation_errors() {
        let failing = PredictionService::new(Arc::new(FnEstimator::new(|_: &FeatureRecord| {
            Err(ModelError::Internal("feature schema mismatch".to_string()))
        })));
        let err = failing.predict(&request(6)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ModelInvocation);
        assert!(err.to_string().contains("schema mismatch"));

        let nan = constant(f64::NAN).predict(&request(6)).unwrap_err();
        assert_eq!(nan.kind(), ErrorKind::ModelInvocation);

        let overflow = constant(1.0e4).predict(&request(6)).unwrap_err();
        assert_eq!(overflow.kind(), ErrorKind::ModelInvocation);
    }

    #[test]
    fn panicking_model_is_contained() {
        let service = PredictionService::new(Arc::new(FnEstimator::new(
            |_: &FeatureRecord| -> Result<f64, ModelError> { panic!("index out of bounds") },
        )));
        let result = service.handle(&surrey_form());
        let PredictionResult::Failure(failure) = result else {
            panic!("expected failure");
        };
        assert_eq!(failure.kind, ErrorKind::ModelInvocation);
        assert!(failure.error_message.contains("index out of bounds"));
    }

    #[test]
    fn handle_echoes_display_inputs() {
        let PredictionResult::Estimate(estimate) = constant(12.5).handle(&surrey_form()) else {
            panic!("expected estimate");
        };
        assert_eq!(estimate.inputs.property_type, "Detached");
        assert_eq!(estimate.inputs.county, " Surrey ");
        assert_eq!(estimate.inputs.year, "2020");
        assert_eq!(estimate.inputs.month, "June");
        assert_eq!(estimate.model_output, 12.5);
    }

    #[test]
    fn handle_reports_validation_failures() {
        let mut form = surrey_form();
        form.insert("property_type", "Castle");
        let result = constant(12.5).handle(&form);
        assert!(result.formatted_price().is_none());
        assert!(!result.error_message().unwrap_or_default().is_empty());
        let PredictionResult::Failure(failure) = result else {
            panic!("expected failure");
        };
        assert_eq!(failure.kind, ErrorKind::UnknownCategory);
    }

    #[test]
    fn strict_county_uses_model_vocabulary() {
        let model = Arc::new(LinearModel::try_from(ModelFile::demo()).unwrap());
        let lenient = PredictionService::new(model.clone());
        let strict = PredictionService::new(model).with_strict_county(true);

        let mut form = surrey_form();
        assert!(strict.handle(&form).is_estimate());

        form.insert("county", "Atlantis");
        assert!(lenient.handle(&form).is_estimate());
        let PredictionResult::Failure(failure) = strict.handle(&form) else {
            panic!("expected failure");
        };
        assert_eq!(failure.kind, ErrorKind::UnknownCategory);
        assert!(failure.error_message.contains("Atlantis"));
    }

    #[test]
    fn strict_county_is_a_no_op_without_vocabulary() {
        let service = constant(12.0).with_strict_county(true);
        let mut form = surrey_form();
        form.insert("county", "Atlantis");
        assert!(service.handle(&form).is_estimate());
    }
}
