//! Pipeline configuration.
//!
//! All run-to-run constants live here as an explicit immutable value
//! passed into the orchestrator, not as compile-time constants: the
//! cutoff date, the date column, and the predictor/response schema.
//! Loadable from TOML; omitted keys fall back to the canonical defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::schema::{FeatureSchema, CANONICAL_PREDICTORS, RESPONSE_COLUMN};

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Split boundary: rows dated before this train, on/after validate.
    #[serde(default = "default_cutoff_date")]
    pub cutoff_date: NaiveDate,

    /// Name of the calendar-date column.
    #[serde(default = "default_date_column")]
    pub date_column: String,

    /// Predictor columns, in the order features are presented to the
    /// classifier during both fit and predict.
    #[serde(default = "default_predictor_columns")]
    pub predictor_columns: Vec<String>,

    /// Name of the label column.
    #[serde(default = "default_response_column")]
    pub response_column: String,
}

fn default_cutoff_date() -> NaiveDate {
    // The upstream dataset's boundary between history and holdout.
    NaiveDate::from_ymd_opt(2022, 8, 1).expect("valid constant date")
}

fn default_date_column() -> String {
    "Date".to_string()
}

fn default_predictor_columns() -> Vec<String> {
    CANONICAL_PREDICTORS.iter().map(|s| s.to_string()).collect()
}

fn default_response_column() -> String {
    RESPONSE_COLUMN.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cutoff_date: default_cutoff_date(),
            date_column: default_date_column(),
            predictor_columns: default_predictor_columns(),
            response_column: default_response_column(),
        }
    }
}

impl PipelineConfig {
    /// The predictor/response schema this configuration describes.
    pub fn feature_schema(&self) -> FeatureSchema {
        FeatureSchema::new(self.predictor_columns.clone(), self.response_column.clone())
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_carries_canonical_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.cutoff_date, NaiveDate::from_ymd_opt(2022, 8, 1).unwrap());
        assert_eq!(config.date_column, "Date");
        assert_eq!(config.predictor_columns.len(), 12);
        assert_eq!(config.response_column, "Response");
    }

    #[test]
    fn test_toml_overrides_cutoff_only() {
        let config = PipelineConfig::from_toml_str("cutoff_date = \"2023-01-15\"").unwrap();
        assert_eq!(config.cutoff_date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        // Everything else stays canonical.
        assert_eq!(config.predictor_columns.len(), 12);
        assert_eq!(config.response_column, "Response");
    }

    #[test]
    fn test_toml_overrides_schema() {
        let raw = r#"
            predictor_columns = ["Backward_Volatility", "Sentiment_lag_1"]
            response_column = "Label"
        "#;
        let config = PipelineConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.predictor_columns.len(), 2);
        assert_eq!(config.response_column, "Label");

        let schema = config.feature_schema();
        assert_eq!(schema.predictors, config.predictor_columns);
        assert_eq!(schema.response, "Label");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = PipelineConfig::from_toml_str("cutoff_date = [not toml");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        let result = PipelineConfig::from_toml_str("cutoff_date = \"August 1st\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
