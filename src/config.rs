//! Runtime configuration.
//!
//! Values come from the process environment, after loading a `.env` file from
//! the working directory if one exists. Command-line flags override them.
//!
//! | Variable | Default |
//! | - | - |
//! | `HPE_MODEL_PATH` | `model/uk_house_price_model.json` |
//! | `HPE_STRICT_COUNTY` | `false` |

use std::path::PathBuf;

use crate::error::AppError;

pub const ENV_MODEL_PATH: &str = "HPE_MODEL_PATH";
pub const ENV_STRICT_COUNTY: &str = "HPE_STRICT_COUNTY";

pub const DEFAULT_MODEL_PATH: &str = "model/uk_house_price_model.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub model_path: PathBuf,
    pub strict_county: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            strict_county: false,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_MODEL_PATH).filter(|p| !p.trim().is_empty()) {
            config.model_path = PathBuf::from(path.trim());
        }
        if let Some(raw) = lookup(ENV_STRICT_COUNTY) {
            config.strict_county = parse_bool(&raw).ok_or_else(|| {
                AppError::usage(format!(
                    "Invalid {ENV_STRICT_COUNTY}='{raw}' (expected true/false)."
                ))
            })?;
        }
        Ok(config)
    }

    /// Apply command-line overrides on top of environment values.
    pub fn with_overrides(mut self, model_path: Option<PathBuf>, strict_county: bool) -> Self {
        if let Some(path) = model_path {
            self.model_path = path;
        }
        if strict_county {
            self.strict_county = true;
        }
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn reads_environment_values() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (ENV_MODEL_PATH, " /srv/models/prices.json "),
            (ENV_STRICT_COUNTY, "Yes"),
        ]))
        .unwrap();
        assert_eq!(config.model_path, PathBuf::from("/srv/models/prices.json"));
        assert!(config.strict_county);
    }

    #[test]
    fn rejects_garbage_booleans() {
        let err = ServiceConfig::from_lookup(lookup(&[(ENV_STRICT_COUNTY, "sometimes")]))
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }

    #[test]
    fn flags_override_environment() {
        let config = ServiceConfig::default()
            .with_overrides(Some(PathBuf::from("other.json")), true);
        assert_eq!(config.model_path, PathBuf::from("other.json"));
        assert!(config.strict_county);
    }
}
