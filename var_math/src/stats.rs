//! Descriptive statistics over slices

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean of a non-empty slice
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Mean of an empty sample".to_string(),
        ));
    }
    Ok(values.iter().mean())
}

/// Pearson correlation coefficient of two equally long samples.
///
/// Returns `Ok(None)` when either sample has zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<Option<f64>> {
    if x.len() != y.len() {
        return Err(MathError::InvalidInput(format!(
            "Samples have different lengths ({} and {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(MathError::InsufficientData(
            "Correlation needs at least 2 observations".to_string(),
        ));
    }

    let sx = x.iter().std_dev();
    let sy = y.iter().std_dev();
    if !(sx > 0.0 && sy > 0.0) {
        return Ok(None);
    }

    let r = x.iter().covariance(y.iter()) / (sx * sy);
    Ok(Some(r.clamp(-1.0, 1.0)))
}
