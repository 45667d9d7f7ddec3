//! Command-line parsing for the house price estimator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! normalization and prediction code. Form fields are taken as raw strings so
//! that validation happens in exactly one place (`io::normalize`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::Feature;
use crate::error::AppError;
use crate::io::RawForm;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hpe", version, about = "House price estimates from a trained regression model")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the price of one property.
    Predict(PredictArgs),
    /// Validate and encode a form without calling the model.
    Normalize(FormArgs),
    /// Show what a model artifact contains.
    Info(ModelArgs),
    /// Write the built-in demo model artifact.
    InitModel {
        /// Output path for the artifact JSON.
        output: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Form fields. Each flag overrides the same field from `--form`.
#[derive(Debug, Args, Clone, Default)]
pub struct FormArgs {
    /// JSON object with the form fields.
    #[arg(long, value_name = "JSON")]
    pub form: Option<PathBuf>,

    /// Detached, Semi-Detached, Terraced, Flat or Other.
    #[arg(long)]
    pub property_type: Option<String>,

    /// Yes or No.
    #[arg(long)]
    pub new_build: Option<String>,

    /// Freehold or Leasehold.
    #[arg(long)]
    pub tenure: Option<String>,

    #[arg(long)]
    pub county: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub year: Option<String>,

    /// Month number, 1-12.
    #[arg(long, allow_hyphen_values = true)]
    pub month: Option<String>,
}

impl FormArgs {
    /// Build the raw form: `--form` file first, then individual flags.
    pub fn to_form(&self) -> Result<RawForm, AppError> {
        let mut form = match &self.form {
            Some(path) => RawForm::from_json_file(path)?,
            None => RawForm::new(),
        };
        let flags = [
            (Feature::PropertyType, &self.property_type),
            (Feature::NewBuild, &self.new_build),
            (Feature::Tenure, &self.tenure),
            (Feature::County, &self.county),
            (Feature::Year, &self.year),
            (Feature::Month, &self.month),
        ];
        for (feature, value) in flags {
            if let Some(value) = value {
                form.insert(feature.name(), value.clone());
            }
        }
        Ok(form)
    }
}

#[derive(Debug, Args, Clone, Default)]
pub struct ModelArgs {
    /// Model artifact JSON (default: $HPE_MODEL_PATH or model/uk_house_price_model.json).
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub form: FormArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Reject counties the model never saw in training.
    #[arg(long)]
    pub strict_county: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
