//! Error types for the inflow_forecast crate

use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use var_math::MathError;

/// Custom error types for the inflow_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The dataset is missing, unreadable or lacks a mandatory column
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Too few valid rows remain for the requested country
    #[error("Insufficient data: need at least {needed} valid rows, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Fitting or projecting the model failed at the final order
    #[error("Model fit failure: {0}")]
    ModelFit(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV export
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),

    /// Error from numerical routines
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error reading engine configuration
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::Polars(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Config(err.to_string())
    }
}

impl ForecastError {
    /// The user-facing marker for loader-stage failures.
    ///
    /// Only `DataUnavailable` and `InsufficientData` are converted into an
    /// empty outlook; every other error is fatal and has no marker.
    pub fn marker(&self) -> Option<ErrorMarker> {
        match self {
            ForecastError::DataUnavailable(_) => Some(ErrorMarker::DataMissing),
            ForecastError::InsufficientData { .. } => Some(ErrorMarker::InsufficientData),
            _ => None,
        }
    }
}

/// Reason attached to an empty outlook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorMarker {
    DataMissing,
    InsufficientData,
}

impl ErrorMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorMarker::DataMissing => "Data Missing",
            ErrorMarker::InsufficientData => "Insufficient Data",
        }
    }
}

impl fmt::Display for ErrorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
