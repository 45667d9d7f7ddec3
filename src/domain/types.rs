//! Shared domain types.
//!
//! The closed vocabularies map the labels a person picks on a form to the
//! one-letter tokens the model was trained on. Everything downstream of the
//! normalizer only ever sees the tokens.

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Kind of dwelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "D")]
    Detached,
    #[serde(rename = "S")]
    SemiDetached,
    #[serde(rename = "T")]
    Terraced,
    #[serde(rename = "F")]
    Flat,
    #[serde(rename = "O")]
    Other,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Detached,
        PropertyType::SemiDetached,
        PropertyType::Terraced,
        PropertyType::Flat,
        PropertyType::Other,
    ];

    /// Form label, e.g. `Semi-Detached`.
    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Detached => "Detached",
            PropertyType::SemiDetached => "Semi-Detached",
            PropertyType::Terraced => "Terraced",
            PropertyType::Flat => "Flat",
            PropertyType::Other => "Other",
        }
    }

    /// Encoded token the model was trained on.
    pub fn code(self) -> &'static str {
        match self {
            PropertyType::Detached => "D",
            PropertyType::SemiDetached => "S",
            PropertyType::Terraced => "T",
            PropertyType::Flat => "F",
            PropertyType::Other => "O",
        }
    }

    /// Exact (case-sensitive) label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

/// Whether the sale was of a newly built property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewBuild {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl NewBuild {
    pub const ALL: [NewBuild; 2] = [NewBuild::Yes, NewBuild::No];

    pub fn label(self) -> &'static str {
        match self {
            NewBuild::Yes => "Yes",
            NewBuild::No => "No",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            NewBuild::Yes => "Y",
            NewBuild::No => "N",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.label() == label)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.code() == code)
    }
}

/// Tenure of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tenure {
    #[serde(rename = "F")]
    Freehold,
    #[serde(rename = "L")]
    Leasehold,
}

impl Tenure {
    pub const ALL: [Tenure; 2] = [Tenure::Freehold, Tenure::Leasehold];

    pub fn label(self) -> &'static str {
        match self {
            Tenure::Freehold => "Freehold",
            Tenure::Leasehold => "Leasehold",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Tenure::Freehold => "F",
            Tenure::Leasehold => "L",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// The six model inputs, in the column order the model was fit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    PropertyType,
    NewBuild,
    Tenure,
    County,
    Year,
    Month,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::PropertyType,
        Feature::NewBuild,
        Feature::Tenure,
        Feature::County,
        Feature::Year,
        Feature::Month,
    ];

    /// Column name, also used as the form key.
    pub fn name(self) -> &'static str {
        match self {
            Feature::PropertyType => "property_type",
            Feature::NewBuild => "new_build",
            Feature::Tenure => "tenure",
            Feature::County => "county",
            Feature::Year => "year",
            Feature::Month => "month",
        }
    }
}

/// A validated, encoded request. Only the normalizer builds these from
/// user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub property_type: PropertyType,
    pub new_build: NewBuild,
    pub tenure: Tenure,
    pub county: String,
    pub year: i64,
    pub month: i64,
}

/// A single cell of a [`FeatureRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue<'a> {
    Category(&'a str),
    Number(i64),
}

/// Single-row model input.
///
/// Holds the encoded values exactly as the normalizer produced them; nothing
/// is re-encoded on the way to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub property_type: &'static str,
    pub new_build: &'static str,
    pub tenure: &'static str,
    pub county: String,
    pub year: i64,
    pub month: i64,
}

impl FeatureRecord {
    pub fn from_request(request: &PredictionRequest) -> Self {
        Self {
            property_type: request.property_type.code(),
            new_build: request.new_build.code(),
            tenure: request.tenure.code(),
            county: request.county.clone(),
            year: request.year,
            month: request.month,
        }
    }

    pub fn value(&self, feature: Feature) -> FeatureValue<'_> {
        match feature {
            Feature::PropertyType => FeatureValue::Category(self.property_type),
            Feature::NewBuild => FeatureValue::Category(self.new_build),
            Feature::Tenure => FeatureValue::Category(self.tenure),
            Feature::County => FeatureValue::Category(&self.county),
            Feature::Year => FeatureValue::Number(self.year),
            Feature::Month => FeatureValue::Number(self.month),
        }
    }

    /// Columns in training order.
    pub fn columns(&self) -> impl Iterator<Item = (Feature, FeatureValue<'_>)> {
        Feature::ALL.into_iter().map(move |f| (f, self.value(f)))
    }
}

/// Echo of what the user submitted, for display next to the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInputs {
    pub property_type: String,
    pub new_build: String,
    pub tenure: String,
    pub county: String,
    pub year: String,
    /// Resolved calendar name, e.g. `June`.
    pub month: String,
}

impl DisplayInputs {
    pub fn rows(&self) -> [(&'static str, &str); 6] {
        [
            ("Property Type", &self.property_type),
            ("New Build", &self.new_build),
            ("Tenure", &self.tenure),
            ("County", &self.county),
            ("Year", &self.year),
            ("Month", &self.month),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// e.g. `£268,336`
    pub formatted_price: String,
    /// Price in original units, before rounding.
    pub price: f64,
    /// Raw model output (log scale for log1p-trained models).
    pub model_output: f64,
    pub inputs: DisplayInputs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub error_message: String,
}

/// Outcome of one request: an estimate or a failure, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionResult {
    Estimate(Estimate),
    Failure(Failure),
}

impl PredictionResult {
    pub fn formatted_price(&self) -> Option<&str> {
        match self {
            PredictionResult::Estimate(e) => Some(&e.formatted_price),
            PredictionResult::Failure(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            PredictionResult::Estimate(_) => None,
            PredictionResult::Failure(f) => Some(&f.error_message),
        }
    }

    pub fn is_estimate(&self) -> bool {
        matches!(self, PredictionResult::Estimate(_))
    }
}
