//! Formatted terminal output.
//!
//! We keep formatting code in one place so the pipeline stays free of
//! presentation details and output changes are localized.

use crate::domain::{PredictionRequest, PredictionResult};
use crate::error::AppError;
use crate::models::ModelSummary;

/// Currency symbol prefixed to every formatted price.
pub const CURRENCY_SYMBOL: &str = "£";

/// Round to whole pounds and group thousands: `268336.29 → "£268,336"`.
///
/// Ties round to even, matching how fixed-point formatting rounds.
pub fn format_price(price: f64) -> String {
    let rounded = price.round_ties_even();
    let digits = group_thousands(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("{CURRENCY_SYMBOL}-{digits}")
    } else {
        format!("{CURRENCY_SYMBOL}{digits}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Human-readable result: the estimate with the submitted inputs, or the
/// error message alone.
pub fn format_result(result: &PredictionResult) -> String {
    let mut out = String::new();
    match result {
        PredictionResult::Estimate(estimate) => {
            out.push_str(&format!("Estimated price: {}\n", estimate.formatted_price));
            out.push('\n');
            for (label, value) in estimate.inputs.rows() {
                out.push_str(&format!("  {label:<14} {value}\n"));
            }
        }
        PredictionResult::Failure(failure) => {
            out.push_str(&format!("Error: {}\n", failure.error_message));
        }
    }
    out
}

pub fn format_result_json(result: &PredictionResult) -> Result<String, AppError> {
    serde_json::to_string_pretty(result)
        .map_err(|e| AppError::usage(format!("Failed to serialize result: {e}")))
}

/// Encoded request as the model will see it.
pub fn format_request(request: &PredictionRequest) -> String {
    let mut out = String::new();
    out.push_str(&format!("property_type: {}\n", request.property_type.code()));
    out.push_str(&format!("new_build:     {}\n", request.new_build.code()));
    out.push_str(&format!("tenure:        {}\n", request.tenure.code()));
    out.push_str(&format!("county:        {}\n", request.county));
    out.push_str(&format!("year:          {}\n", request.year));
    out.push_str(&format!("month:         {}\n", request.month));
    out
}

pub fn format_model_summary(summary: &ModelSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Model: {}\n", summary.name));
    if let Some(date) = summary.trained_on {
        out.push_str(&format!("Trained on: {date}\n"));
    }
    out.push_str(&format!("Target transform: {}\n", summary.transform.name()));
    out.push_str(&format!("Unknown categories: {}\n", summary.handle_unknown.name()));
    out.push_str(&format!("Design columns: {}\n", summary.n_columns));
    for (feature, levels) in &summary.levels {
        out.push_str(&format!(
            "- {} ({}): {}\n",
            feature.name(),
            levels.len(),
            preview(levels, 8)
        ));
    }
    out
}

fn preview(levels: &[String], max: usize) -> String {
    let shown: Vec<&str> = levels.iter().take(max).map(String::as_str).collect();
    let mut out = shown.join(", ");
    if levels.len() > max {
        out.push_str(&format!(", … (+{})", levels.len() - max));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayInputs, Estimate, Failure, NewBuild, PropertyType, Tenure};
    use crate::error::ErrorKind;
    use crate::models::{LinearModel, ModelFile};

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(268_336.286_52), "£268,336");
        assert_eq!(format_price(0.0), "£0");
        assert_eq!(format_price(999.5), "£1,000");
        assert_eq!(format_price(1_234_567.0), "£1,234,567");
        assert_eq!(format_price(100_000.0), "£100,000");
        assert_eq!(format_price(-1.2), "£-1");
    }

    #[test]
    fn ties_round_to_even() {
        assert_eq!(format_price(2.5), "£2");
        assert_eq!(format_price(3.5), "£4");
    }

    #[test]
    fn prices_beyond_u64_keep_every_digit() {
        assert_eq!(format_price(1e20), "£100,000,000,000,000,000,000");
        let price = 50.0_f64.exp_m1();
        let expected = format!("{price:.0}");
        let digits: String = format_price(price)
            .trim_start_matches(CURRENCY_SYMBOL)
            .chars()
            .filter(|c| *c != ',')
            .collect();
        assert_eq!(digits, expected);
    }

    #[test]
    fn estimate_text_lists_inputs() {
        let result = PredictionResult::Estimate(Estimate {
            formatted_price: "£268,336".to_string(),
            price: 268_336.29,
            model_output: 12.5,
            inputs: DisplayInputs {
                property_type: "Detached".to_string(),
                new_build: "No".to_string(),
                tenure: "Freehold".to_string(),
                county: "Surrey".to_string(),
                year: "2020".to_string(),
                month: "June".to_string(),
            },
        });
        let text = format_result(&result);
        assert!(text.starts_with("Estimated price: £268,336\n"));
        assert!(text.contains("Month          June"));
    }

    #[test]
    fn failure_text_is_message_only() {
        let result = PredictionResult::Failure(Failure {
            kind: ErrorKind::UnknownCategory,
            error_message: "Unknown property_type 'Castle'".to_string(),
        });
        assert_eq!(format_result(&result), "Error: Unknown property_type 'Castle'\n");
        let json = format_result_json(&result).unwrap();
        assert!(json.contains("\"status\": \"failure\""));
    }

    #[test]
    fn request_shows_codes() {
        let text = format_request(&PredictionRequest {
            property_type: PropertyType::Terraced,
            new_build: NewBuild::Yes,
            tenure: Tenure::Leasehold,
            county: "Kent".to_string(),
            year: 1999,
            month: 12,
        });
        assert!(text.contains("property_type: T\n"));
        assert!(text.contains("tenure:        L\n"));
    }

    #[test]
    fn summary_truncates_long_vocabularies() {
        let model = LinearModel::try_from(ModelFile::demo()).unwrap();
        let text = format_model_summary(&model.summary());
        assert!(text.contains("Model: uk-house-price-demo"));
        assert!(text.contains("Target transform: log1p"));
        assert!(text.contains("- county (15): "));
        assert!(text.contains("(+7)"));
    }
}
