//! # Var Math
//!
//! Numerical building blocks for vector autoregression.
//! This crate provides a rank-revealing least squares solver,
//! log-determinants of covariance matrices and the descriptive statistics
//! the forecasting engine needs. Matrices are `nalgebra` dense matrices.

use thiserror::Error;

pub mod determinant;
pub mod least_squares;
pub mod stats;

pub use determinant::log_det_spd;
pub use least_squares::{lstsq, LeastSquares};
pub use nalgebra::DMatrix;

/// Errors that can occur in numerical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Singular matrix: {0}")]
    Singular(String),
}

/// Result type for numerical operations
pub type Result<T> = std::result::Result<T, MathError>;
