//! Raw form submissions.
//!
//! A [`RawForm`] is the loosely-typed field mapping a caller hands to the
//! normalizer: every value is the string the user typed or picked. Nothing is
//! validated here.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    fields: BTreeMap<String, String>,
}

impl RawForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a JSON object of field → value.
    ///
    /// String values are taken verbatim; numbers are stringified so that
    /// `{"year": 2020}` and `{"year": "2020"}` mean the same thing. `null`
    /// fields are treated as absent.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| AppError::usage(format!("Invalid form JSON: {e}")))?;
        Self::from_json_value(value)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::usage(format!("Failed to open form JSON '{}': {e}", path.display()))
        })?;
        let value: Value = serde_json::from_reader(file)
            .map_err(|e| AppError::usage(format!("Invalid form JSON '{}': {e}", path.display())))?;
        Self::from_json_value(value)
    }

    fn from_json_value(value: Value) -> Result<Self, AppError> {
        let Value::Object(map) = value else {
            return Err(AppError::usage("Form JSON must be an object of field names to values."));
        };

        let mut form = RawForm::new();
        for (key, value) in map {
            match value {
                Value::String(s) => form.insert(key, s),
                Value::Number(n) => form.insert(key, n.to_string()),
                Value::Null => {}
                other => {
                    return Err(AppError::usage(format!(
                        "Form field '{key}' must be a string or number, got {other}."
                    )));
                }
            }
        }
        Ok(form)
    }
}
