//! On-disk model artifact schema.
//!
//! The artifact is the portable representation of a trained linear model over
//! one-hot encoded categoricals plus centred numeric terms:
//!
//! ```text
//! y = intercept
//!   + coef[property_type][code] + coef[new_build][code] + coef[tenure][code]
//!   + coef[county][name]
//!   + year.coefficient  * (year  - year.center)
//!   + month.coefficient * (month - month.center)
//! ```
//!
//! `y` is on the `target_transform` scale. Reading/writing lives in
//! `io::model_file`; evaluation lives in `models::linear`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::math::TargetTransform;

/// Value of the `tool` field written by and expected from this crate.
pub const TOOL_NAME: &str = "hpe";

/// Artifact schema version this crate reads and writes.
pub const FORMAT_VERSION: u32 = 1;

/// What the model does with a categorical level it never saw in training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Zero contribution, like a one-hot encoder with `handle_unknown="ignore"`.
    #[default]
    Ignore,
    /// Fail the prediction.
    Error,
}

impl HandleUnknown {
    pub fn name(self) -> &'static str {
        match self {
            HandleUnknown::Ignore => "ignore",
            HandleUnknown::Error => "error",
        }
    }
}

/// Slope and centring point of a numeric feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    pub coefficient: f64,
    #[serde(default)]
    pub center: f64,
}

/// One-hot coefficient per training level, keyed by encoded token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalTables {
    pub property_type: BTreeMap<String, f64>,
    pub new_build: BTreeMap<String, f64>,
    pub tenure: BTreeMap<String, f64>,
    pub county: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericTerms {
    pub year: NumericTerm,
    pub month: NumericTerm,
}

/// A saved model file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub format_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_on: Option<NaiveDate>,
    #[serde(default)]
    pub target_transform: TargetTransform,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
    pub intercept: f64,
    pub categorical: CategoricalTables,
    pub numeric: NumericTerms,
}

impl ModelFile {
    /// Small built-in artifact with plausible England & Wales coefficients.
    ///
    /// Used by `hpe init-model` and by tests; not a substitute for a model fit
    /// on real sales.
    pub fn demo() -> Self {
        fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        }

        ModelFile {
            tool: TOOL_NAME.to_string(),
            format_version: FORMAT_VERSION,
            name: "uk-house-price-demo".to_string(),
            trained_on: NaiveDate::from_ymd_opt(2024, 6, 30),
            target_transform: TargetTransform::Log1p,
            handle_unknown: HandleUnknown::Ignore,
            intercept: 12.0,
            categorical: CategoricalTables {
                property_type: table(&[
                    ("D", 0.45),
                    ("S", 0.12),
                    ("T", 0.0),
                    ("F", -0.15),
                    ("O", 0.05),
                ]),
                new_build: table(&[("Y", 0.08), ("N", 0.0)]),
                tenure: table(&[("F", 0.1), ("L", 0.0)]),
                county: table(&[
                    ("Cornwall", 0.05),
                    ("Cumbria", -0.2),
                    ("Devon", 0.08),
                    ("Essex", 0.25),
                    ("Greater London", 0.7),
                    ("Greater Manchester", -0.05),
                    ("Hertfordshire", 0.4),
                    ("Kent", 0.22),
                    ("Lancashire", -0.25),
                    ("Merseyside", -0.2),
                    ("Oxfordshire", 0.38),
                    ("Surrey", 0.45),
                    ("Tyne and Wear", -0.3),
                    ("West Midlands", -0.08),
                    ("West Yorkshire", -0.15),
                ]),
            },
            numeric: NumericTerms {
                year: NumericTerm {
                    coefficient: 0.045,
                    center: 2010.0,
                },
                month: NumericTerm {
                    coefficient: 0.002,
                    center: 6.5,
                },
            },
        }
    }
}
