//! Calendar month names for display.

use chrono::Month;

use crate::domain::Feature;
use crate::error::PredictError;

/// `1 → "January"` … `12 → "December"`.
pub fn month_name(month: i64) -> Result<&'static str, PredictError> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .ok_or_else(|| PredictError::InvalidNumber {
            field: Feature::Month.name(),
            value: month.to_string(),
        })
}
