//! Error types.
//!
//! Two layers:
//!
//! - [`PredictError`]: what can go wrong while turning one form submission into
//!   an estimate. The prediction service converts these into a failed
//!   [`crate::domain::PredictionResult`]; they never reach the process boundary.
//! - [`AppError`]: what the `hpe` binary reports before exiting (bad flags,
//!   unreadable model file, failed request). Carries the process exit code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exit code for usage, configuration and file I/O problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for a request rejected by input validation.
pub const EXIT_INVALID_INPUT: u8 = 3;
/// Exit code for a request the model could not price.
pub const EXIT_MODEL: u8 = 4;

/// Failure of a single prediction request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("Unknown {field} '{value}'")]
    UnknownCategory { field: &'static str, value: String },

    #[error("Invalid {field} '{value}': expected a whole number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::UnknownCategory { .. } => ErrorKind::UnknownCategory,
            PredictError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            PredictError::MissingField { .. } => ErrorKind::MissingField,
            PredictError::ModelInvocation(_) => ErrorKind::ModelInvocation,
        }
    }
}

/// Serializable tag for a [`PredictError`], kept on failed results so callers
/// can tell validation failures from model failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownCategory,
    InvalidNumber,
    MissingField,
    ModelInvocation,
}

impl ErrorKind {
    /// Process exit code used by the CLI when a request fails with this kind.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::UnknownCategory | ErrorKind::InvalidNumber | ErrorKind::MissingField => {
                EXIT_INVALID_INPUT
            }
            ErrorKind::ModelInvocation => EXIT_MODEL,
        }
    }
}

/// Error raised by an estimator implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("category '{value}' was not seen for feature {feature} during training")]
    UnseenCategory { feature: &'static str, value: String },

    #[error("model produced a non-finite output ({0})")]
    NonFinite(f64),

    #[error("{0}")]
    Internal(String),
}

impl From<ModelError> for PredictError {
    fn from(err: ModelError) -> Self {
        PredictError::ModelInvocation(err.to_string())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        AppError::new(err.kind().exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_kinds_share_exit_code() {
        assert_eq!(ErrorKind::UnknownCategory.exit_code(), EXIT_INVALID_INPUT);
        assert_eq!(ErrorKind::InvalidNumber.exit_code(), EXIT_INVALID_INPUT);
        assert_eq!(ErrorKind::MissingField.exit_code(), EXIT_INVALID_INPUT);
        assert_eq!(ErrorKind::ModelInvocation.exit_code(), EXIT_MODEL);
    }

    #[test]
    fn model_error_folds_into_invocation() {
        let err: PredictError = ModelError::NonFinite(f64::NAN).into();
        assert_eq!(err.kind(), ErrorKind::ModelInvocation);
        assert!(err.to_string().starts_with("Model invocation failed"));
    }

    #[test]
    fn messages_name_field_and_value() {
        let err = PredictError::UnknownCategory {
            field: "property_type",
            value: "Castle".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown property_type 'Castle'");
    }
}
