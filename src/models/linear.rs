//! Linear model over one-hot categoricals and centred numeric terms.
//!
//! Scoring relies on two primitive operations:
//! - build a design row for a given record (intercept, one-hot blocks, numerics)
//! - dot the row with the coefficient vector
//!
//! The column layout is fixed when the artifact is loaded, so scoring a
//! request is one allocation and one dot product.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use nalgebra::DVector;

use crate::domain::{Feature, FeatureRecord, FeatureValue, NewBuild, PropertyType, Tenure};
use crate::error::{AppError, ModelError};
use crate::math::TargetTransform;
use crate::models::artifact::{FORMAT_VERSION, HandleUnknown, ModelFile, TOOL_NAME};
use crate::models::estimator::Estimator;

/// One-hot block for a categorical feature. Levels map to design-row indices.
#[derive(Debug, Clone)]
struct CategoricalBlock {
    feature: Feature,
    levels: BTreeMap<String, usize>,
}

#[derive(Debug, Clone)]
struct NumericColumn {
    feature: Feature,
    index: usize,
    center: f64,
}

/// A loaded, validated linear artifact.
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: String,
    trained_on: Option<NaiveDate>,
    transform: TargetTransform,
    handle_unknown: HandleUnknown,
    blocks: Vec<CategoricalBlock>,
    numerics: Vec<NumericColumn>,
    coefficients: DVector<f64>,
}

/// Headline facts about a loaded model, for `hpe info`.
#[derive(Debug, Clone)]
pub struct ModelSummary {
    pub name: String,
    pub trained_on: Option<NaiveDate>,
    pub transform: TargetTransform,
    pub handle_unknown: HandleUnknown,
    pub n_columns: usize,
    /// Training levels per categorical feature, in column order.
    pub levels: Vec<(Feature, Vec<String>)>,
}

impl TryFrom<ModelFile> for LinearModel {
    type Error = AppError;

    fn try_from(file: ModelFile) -> Result<Self, Self::Error> {
        if file.tool != TOOL_NAME {
            return Err(AppError::usage(format!(
                "Model artifact was written by '{}', expected '{TOOL_NAME}'.",
                file.tool
            )));
        }
        if file.format_version != FORMAT_VERSION {
            return Err(AppError::usage(format!(
                "Unsupported model format_version {} (this build reads {FORMAT_VERSION}).",
                file.format_version
            )));
        }

        validate_closed_table(Feature::PropertyType, &file.categorical.property_type, |c| {
            PropertyType::from_code(c).is_some()
        })?;
        validate_closed_table(Feature::NewBuild, &file.categorical.new_build, |c| {
            NewBuild::from_code(c).is_some()
        })?;
        validate_closed_table(Feature::Tenure, &file.categorical.tenure, |c| {
            Tenure::from_code(c).is_some()
        })?;
        ensure_finite("intercept", file.intercept)?;

        let mut coefs = vec![file.intercept];
        let mut blocks = Vec::with_capacity(4);
        let tables = [
            (Feature::PropertyType, &file.categorical.property_type),
            (Feature::NewBuild, &file.categorical.new_build),
            (Feature::Tenure, &file.categorical.tenure),
            (Feature::County, &file.categorical.county),
        ];
        for (feature, table) in tables {
            let mut levels = BTreeMap::new();
            for (level, &coef) in table {
                ensure_finite(&format!("{}[{level}]", feature.name()), coef)?;
                levels.insert(level.clone(), coefs.len());
                coefs.push(coef);
            }
            blocks.push(CategoricalBlock { feature, levels });
        }

        let mut numerics = Vec::with_capacity(2);
        for (feature, term) in [
            (Feature::Year, file.numeric.year),
            (Feature::Month, file.numeric.month),
        ] {
            ensure_finite(&format!("{}.coefficient", feature.name()), term.coefficient)?;
            ensure_finite(&format!("{}.center", feature.name()), term.center)?;
            numerics.push(NumericColumn {
                feature,
                index: coefs.len(),
                center: term.center,
            });
            coefs.push(term.coefficient);
        }

        Ok(LinearModel {
            name: file.name,
            trained_on: file.trained_on,
            transform: file.target_transform,
            handle_unknown: file.handle_unknown,
            blocks,
            numerics,
            coefficients: DVector::from_vec(coefs),
        })
    }
}

fn validate_closed_table(
    feature: Feature,
    table: &BTreeMap<String, f64>,
    is_known_code: impl Fn(&str) -> bool,
) -> Result<(), AppError> {
    if table.is_empty() {
        return Err(AppError::usage(format!(
            "Model artifact has no levels for {}.",
            feature.name()
        )));
    }
    if let Some(bad) = table.keys().find(|code| !is_known_code(code.as_str())) {
        return Err(AppError::usage(format!(
            "Model artifact has unknown {} level '{bad}'.",
            feature.name()
        )));
    }
    Ok(())
}

fn ensure_finite(what: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::usage(format!(
            "Model artifact coefficient {what} is not finite."
        )))
    }
}

impl LinearModel {
    /// Width of the design row (intercept included).
    pub fn n_columns(&self) -> usize {
        self.coefficients.len()
    }

    /// Fill a design row for `record`. `out` must have length `self.n_columns()`.
    pub fn fill_design_row(
        &self,
        record: &FeatureRecord,
        out: &mut DVector<f64>,
    ) -> Result<(), ModelError> {
        if out.len() != self.n_columns() {
            return Err(ModelError::Internal(format!(
                "design row has {} columns, model expects {}",
                out.len(),
                self.n_columns()
            )));
        }
        out.fill(0.0);
        out[0] = 1.0;

        for block in &self.blocks {
            let FeatureValue::Category(level) = record.value(block.feature) else {
                return Err(ModelError::Internal(format!(
                    "expected a category for {}",
                    block.feature.name()
                )));
            };
            match block.levels.get(level) {
                Some(&idx) => out[idx] = 1.0,
                None => match self.handle_unknown {
                    HandleUnknown::Ignore => {}
                    HandleUnknown::Error => {
                        return Err(ModelError::UnseenCategory {
                            feature: block.feature.name(),
                            value: level.to_string(),
                        });
                    }
                },
            }
        }

        for col in &self.numerics {
            let FeatureValue::Number(v) = record.value(col.feature) else {
                return Err(ModelError::Internal(format!(
                    "expected a number for {}",
                    col.feature.name()
                )));
            };
            out[col.index] = v as f64 - col.center;
        }

        Ok(())
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            name: self.name.clone(),
            trained_on: self.trained_on,
            transform: self.transform,
            handle_unknown: self.handle_unknown,
            n_columns: self.n_columns(),
            levels: self
                .blocks
                .iter()
                .map(|b| (b.feature, b.levels.keys().cloned().collect()))
                .collect(),
        }
    }
}

impl Estimator for LinearModel {
    fn predict_one(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let mut row = DVector::zeros(self.n_columns());
        self.fill_design_row(record, &mut row)?;
        let y = row.dot(&self.coefficients);
        if !y.is_finite() {
            return Err(ModelError::NonFinite(y));
        }
        Ok(y)
    }

    fn target_transform(&self) -> TargetTransform {
        self.transform
    }

    fn knows_category(&self, feature: Feature, value: &str) -> Option<bool> {
        self.blocks
            .iter()
            .find(|b| b.feature == feature)
            .map(|b| b.levels.contains_key(value))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
