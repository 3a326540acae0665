//! Engine configuration

use crate::error::{ForecastError, Result};
use crate::models::InformationCriterion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Dataset location used when none is configured
pub const DEFAULT_DATASET_PATH: &str = "data/semi_synthetic_fdi.csv";
/// Forecast horizon used when a caller does not pick one
pub const DEFAULT_STEPS: usize = 24;
/// Horizon range callers are expected to stay within
pub const RECOMMENDED_STEPS: std::ops::RangeInclusive<usize> = 12..=60;

/// Settings for a [`ForecastEngine`](crate::ForecastEngine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// CSV dataset read on every call
    pub dataset_path: PathBuf,
    /// Criterion ranking candidate lag orders
    pub criterion: InformationCriterion,
    /// Horizon used by front ends when none is given
    pub default_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            criterion: InformationCriterion::default(),
            default_steps: DEFAULT_STEPS,
        }
    }
}

impl EngineConfig {
    /// Create a configuration reading the given dataset
    pub fn new<P: Into<PathBuf>>(dataset_path: P) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            ..Self::default()
        }
    }

    pub fn with_criterion(mut self, criterion: InformationCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn with_default_steps(mut self, steps: usize) -> Result<Self> {
        self.default_steps = steps;
        self.validate()?;
        Ok(self)
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_steps == 0 {
            return Err(ForecastError::InvalidParameter(
                "default_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET_PATH));
        assert_eq!(config.criterion, InformationCriterion::Aic);
        assert_eq!(config.default_steps, 24);
    }

    #[test]
    fn test_from_json_file_fills_missing_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"dataset_path": "fdi.csv", "criterion": "bic"}}"#).unwrap();

        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("fdi.csv"));
        assert_eq!(config.criterion, InformationCriterion::Bic);
        assert_eq!(config.default_steps, DEFAULT_STEPS);
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();

        let result = EngineConfig::from_json_file(file.path());
        assert!(matches!(result, Err(ForecastError::Config(_))));
    }

    #[test]
    fn test_zero_default_steps_is_rejected() {
        assert!(EngineConfig::new("x.csv").with_default_steps(0).is_err());
    }
}
