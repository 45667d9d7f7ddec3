//! Input normalization.
//!
//! Turns a [`RawForm`] into a [`PredictionRequest`]: closed-vocabulary lookups
//! for the categorical fields, whitespace trimming for the county, integer
//! parsing for the period. This is the only place user input becomes typed
//! data, so every field is checked here and the first problem is returned.

use crate::domain::{Feature, NewBuild, PredictionRequest, PropertyType, Tenure};
use crate::error::PredictError;
use crate::io::form::RawForm;

/// Normalize a raw form into an encoded request.
pub fn normalize(form: &RawForm) -> Result<PredictionRequest, PredictError> {
    let property_type = lookup(form, Feature::PropertyType, PropertyType::from_label)?;
    let new_build = lookup(form, Feature::NewBuild, NewBuild::from_label)?;
    let tenure = lookup(form, Feature::Tenure, Tenure::from_label)?;
    let county = required(form, Feature::County)?.trim().to_string();
    let year = parse_int(form, Feature::Year)?;
    let month = parse_month(form)?;

    let request = PredictionRequest {
        property_type,
        new_build,
        tenure,
        county,
        year,
        month,
    };
    log::debug!(
        "normalized request: {} {} {} county={:?} {}-{:02}",
        request.property_type.code(),
        request.new_build.code(),
        request.tenure.code(),
        request.county,
        request.year,
        request.month
    );
    Ok(request)
}

fn required(form: &RawForm, feature: Feature) -> Result<&str, PredictError> {
    form.get(feature.name())
        .ok_or(PredictError::MissingField {
            field: feature.name(),
        })
}

fn lookup<T>(
    form: &RawForm,
    feature: Feature,
    from_label: impl Fn(&str) -> Option<T>,
) -> Result<T, PredictError> {
    let raw = required(form, feature)?;
    from_label(raw).ok_or_else(|| PredictError::UnknownCategory {
        field: feature.name(),
        value: raw.to_string(),
    })
}

fn parse_int(form: &RawForm, feature: Feature) -> Result<i64, PredictError> {
    let raw = required(form, feature)?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| PredictError::InvalidNumber {
            field: feature.name(),
            value: raw.to_string(),
        })
}

/// Months are range-checked here rather than left to display formatting.
fn parse_month(form: &RawForm) -> Result<i64, PredictError> {
    let month = parse_int(form, Feature::Month)?;
    if !(1..=12).contains(&month) {
        return Err(PredictError::InvalidNumber {
            field: Feature::Month.name(),
            value: month.to_string(),
        });
    }
    Ok(month)
}
