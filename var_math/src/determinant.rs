//! Log-determinants of covariance matrices

use crate::{MathError, Result};
use nalgebra::DMatrix;

/// Cholesky pivots below this fraction of the largest diagonal entry count
/// as zero
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Natural log of the determinant of a symmetric positive definite matrix.
///
/// Uses a Cholesky factorisation. A matrix that is not positive definite,
/// or whose squared pivot falls below [`PIVOT_TOLERANCE`] of the largest
/// diagonal entry, is reported as [`MathError::Singular`].
pub fn log_det_spd(matrix: &DMatrix<f64>) -> Result<f64> {
    if !matrix.is_square() || matrix.nrows() == 0 {
        return Err(MathError::InvalidInput(format!(
            "Log-determinant needs a non-empty square matrix, got {}x{}",
            matrix.nrows(),
            matrix.ncols()
        )));
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Log-determinant input contains non-finite values".to_string(),
        ));
    }

    let max_diag = matrix.diagonal().iter().copied().fold(0.0_f64, f64::max);
    let tolerance = max_diag * PIVOT_TOLERANCE;

    let cholesky = matrix.clone().cholesky().ok_or_else(|| {
        MathError::Singular("Matrix is not positive definite".to_string())
    })?;

    let mut log_det = 0.0;
    for (j, diag) in cholesky.l().diagonal().iter().enumerate() {
        let pivot = diag * diag;
        if pivot.is_nan() || pivot <= tolerance {
            return Err(MathError::Singular(format!(
                "Pivot {:e} at column {} is below tolerance",
                pivot, j
            )));
        }
        log_det += pivot.ln();
    }

    Ok(log_det)
}
