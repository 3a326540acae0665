//! Least squares via the singular value decomposition
//!
//! Solves `min ‖A·X − B‖` for a design matrix `A` (m×n) and one or more
//! right-hand sides `B` (m×r). Singular values below a relative tolerance
//! are treated as zero, which gives the minimum-norm solution when columns
//! are linearly dependent (for example a constant column next to an
//! intercept).

use crate::{MathError, Result};
use nalgebra::DMatrix;

/// Singular values below this fraction of the largest one are dropped.
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Solution of a least-squares problem
#[derive(Debug, Clone)]
pub struct LeastSquares {
    /// Coefficients (n×r), one column per right-hand side
    pub coefficients: DMatrix<f64>,
    /// Numerical rank of the design matrix
    pub rank: usize,
}

/// Solve `min ‖A·X − B‖` for every column of `B`.
pub fn lstsq(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<LeastSquares> {
    let (m, n) = a.shape();

    if m == 0 || n == 0 {
        return Err(MathError::InsufficientData(format!(
            "Design matrix is empty ({}x{})",
            m, n
        )));
    }
    if b.nrows() != m {
        return Err(MathError::InvalidInput(format!(
            "Right-hand side has {} rows, design matrix has {}",
            b.nrows(),
            m
        )));
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Least squares input contains non-finite values".to_string(),
        ));
    }

    let svd = a.clone().svd(true, true);
    let largest = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let eps = largest * RANK_TOLERANCE;

    let rank = svd.rank(eps);
    if rank == 0 {
        return Err(MathError::Singular(
            "Design matrix has rank zero".to_string(),
        ));
    }

    let coefficients = svd
        .solve(b, eps)
        .map_err(|e| MathError::CalculationError(e.to_string()))?;

    if coefficients.iter().any(|v| !v.is_finite()) {
        return Err(MathError::CalculationError(
            "Least squares produced non-finite coefficients".to_string(),
        ));
    }

    Ok(LeastSquares { coefficients, rank })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_exact_fit_recovers_coefficients() {
        // y = 2 + 3x
        let a = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let b = DMatrix::from_column_slice(4, 1, &[2.0, 5.0, 8.0, 11.0]);

        let solution = lstsq(&a, &b).unwrap();
        assert_eq!(solution.rank, 2);
        assert_abs_diff_eq!(solution.coefficients[(0, 0)], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.coefficients[(1, 0)], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overdetermined_fit_minimises_residuals() {
        let a = DMatrix::from_element(3, 1, 1.0);
        let b = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 6.0]);

        let solution = lstsq(&a, &b).unwrap();
        assert_abs_diff_eq!(solution.coefficients[(0, 0)], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_columns_still_fit() {
        // Third column duplicates the intercept scaled by 70
        let a = DMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 1.0, 70.0, //
                1.0, 2.0, 70.0, //
                1.0, 3.0, 70.0, //
                1.0, 4.0, 70.0,
            ],
        );
        let b = DMatrix::from_column_slice(4, 1, &[6.0, 7.0, 8.0, 9.0]);

        let solution = lstsq(&a, &b).unwrap();
        assert_eq!(solution.rank, 2);

        let fitted = &a * &solution.coefficients;
        for i in 0..4 {
            assert_abs_diff_eq!(fitted[(i, 0)], b[(i, 0)], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dependent_columns_get_minimum_norm_solution() {
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let b = DMatrix::from_column_slice(3, 1, &[2.0, 2.0, 2.0]);

        let solution = lstsq(&a, &b).unwrap();
        assert_eq!(solution.rank, 1);
        assert_abs_diff_eq!(solution.coefficients[(0, 0)], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(solution.coefficients[(1, 0)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_several_right_hand_sides() {
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let b = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 3.0, -1.0, 5.0, -2.0]);

        let solution = lstsq(&a, &b).unwrap();
        assert_eq!(solution.coefficients.shape(), (2, 2));
        assert_abs_diff_eq!(solution.coefficients[(1, 0)], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.coefficients[(1, 1)], -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_design_is_singular() {
        let a = DMatrix::<f64>::zeros(3, 2);
        let b = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        assert!(matches!(lstsq(&a, &b), Err(MathError::Singular(_))));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let a = DMatrix::from_column_slice(2, 1, &[1.0, f64::NAN]);
        let b = DMatrix::from_column_slice(2, 1, &[1.0, 2.0]);
        assert!(matches!(lstsq(&a, &b), Err(MathError::InvalidInput(_))));
    }

    #[test]
    fn test_mismatched_rows_are_rejected() {
        let a = DMatrix::from_element(3, 1, 1.0);
        let b = DMatrix::from_element(2, 1, 1.0);
        assert!(matches!(lstsq(&a, &b), Err(MathError::InvalidInput(_))));
    }
}
