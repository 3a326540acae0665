//! Vector autoregression with intercept
//!
//! Each column at time `t` is modelled as an intercept plus a linear
//! combination of every column at `t-1 … t-p`. Coefficients are estimated
//! equation by equation with least squares on a shared design matrix.

use crate::data::{IndicatorSeries, Observation};
use crate::error::{ForecastError, Result};
use crate::utils::future_month_starts;
use chrono::NaiveDate;
use var_math::{lstsq, DMatrix};

/// Least-squares estimate on a window of observations
#[derive(Debug, Clone)]
pub(crate) struct Estimate {
    /// (1 + k·p) × k; row 0 is the intercept
    pub beta: DMatrix<f64>,
    /// Maximum-likelihood residual covariance (divided by `nobs`)
    pub residual_cov: DMatrix<f64>,
    pub nobs: usize,
    pub rank: usize,
}

impl Estimate {
    /// Number of regressors per equation
    pub fn df_model(&self) -> usize {
        self.beta.nrows()
    }
}

/// Build the lagged design matrix and targets.
///
/// Targets run from `offset + p` to the end of `observations`, so a larger
/// `offset` trims the start of the sample. Lag search uses this to fit
/// every candidate order on the same rows.
pub(crate) fn design_matrices(
    observations: &[Observation],
    width: usize,
    p: usize,
    offset: usize,
) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    if p == 0 {
        return Err(ForecastError::InvalidParameter(
            "Lag order must be at least 1".to_string(),
        ));
    }
    let start = offset + p;
    if observations.len() <= start {
        return Err(ForecastError::ModelFit(format!(
            "Lag order {} needs more than {} observations, got {}",
            p,
            start,
            observations.len()
        )));
    }

    let nobs = observations.len() - start;
    let mut x = DMatrix::zeros(nobs, 1 + width * p);
    let mut y = DMatrix::zeros(nobs, width);

    for (row, t) in (start..observations.len()).enumerate() {
        x[(row, 0)] = 1.0;
        for lag in 1..=p {
            let lagged = &observations[t - lag].values;
            for (var, value) in lagged.iter().enumerate() {
                x[(row, 1 + (lag - 1) * width + var)] = *value;
            }
        }
        for (var, value) in observations[t].values.iter().enumerate() {
            y[(row, var)] = *value;
        }
    }

    Ok((x, y))
}

/// Estimate an order-`p` VAR on `observations[offset..]`
pub(crate) fn estimate(
    observations: &[Observation],
    width: usize,
    p: usize,
    offset: usize,
) -> Result<Estimate> {
    let (x, y) = design_matrices(observations, width, p, offset)?;
    let (nobs, regressors) = x.shape();
    if nobs < regressors {
        return Err(ForecastError::ModelFit(format!(
            "Lag order {} has {} regressors but only {} observations",
            p,
            regressors,
            nobs
        )));
    }

    let solution = lstsq(&x, &y).map_err(|e| ForecastError::ModelFit(e.to_string()))?;
    let residuals = y - &x * &solution.coefficients;
    let residual_cov = residuals.tr_mul(&residuals) / nobs as f64;

    Ok(Estimate {
        beta: solution.coefficients,
        residual_cov,
        nobs,
        rank: solution.rank,
    })
}

/// An unfitted VAR of a chosen lag order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarModel {
    order: usize,
}

impl VarModel {
    /// Create a new VAR of the given lag order
    pub fn new(order: usize) -> Result<Self> {
        if order == 0 {
            return Err(ForecastError::InvalidParameter(
                "Lag order must be at least 1".to_string(),
            ));
        }
        Ok(Self { order })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Fit the model on the whole series
    pub fn fit(&self, series: &IndicatorSeries) -> Result<FittedVar> {
        let width = series.width();
        let estimate = estimate(series.observations(), width, self.order, 0)?;

        Ok(FittedVar {
            order: self.order,
            width,
            beta: estimate.beta,
            residual_cov: estimate.residual_cov,
            nobs: estimate.nobs,
            rank: estimate.rank,
        })
    }
}

/// A fitted VAR, owned by a single forecasting call
#[derive(Debug, Clone)]
pub struct FittedVar {
    order: usize,
    width: usize,
    beta: DMatrix<f64>,
    residual_cov: DMatrix<f64>,
    nobs: usize,
    rank: usize,
}

impl FittedVar {
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of modelled columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of observations the model was estimated on
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Numerical rank of the design matrix
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Intercept of every equation
    pub fn intercept(&self) -> Vec<f64> {
        self.beta.row(0).iter().copied().collect()
    }

    /// Effect of `variable` at `lag` on `equation`
    pub fn coefficient(&self, lag: usize, equation: usize, variable: usize) -> Option<f64> {
        if lag == 0 || lag > self.order || equation >= self.width || variable >= self.width {
            return None;
        }
        Some(self.beta[(1 + (lag - 1) * self.width + variable, equation)])
    }

    pub fn residual_covariance(&self) -> &DMatrix<f64> {
        &self.residual_cov
    }

    /// Predict the observation that follows `window`.
    ///
    /// `window` holds at least `order` rows in chronological order; only
    /// the trailing `order` rows are used.
    pub fn predict_next(&self, window: &[Vec<f64>]) -> Result<Vec<f64>> {
        if window.len() < self.order {
            return Err(ForecastError::ModelFit(format!(
                "Prediction needs {} lagged rows, got {}",
                self.order,
                window.len()
            )));
        }

        let mut next = self.intercept();
        for lag in 1..=self.order {
            let lagged = &window[window.len() - lag];
            if lagged.len() != self.width {
                return Err(ForecastError::ModelFit(format!(
                    "Lagged row has {} values, model has {} columns",
                    lagged.len(),
                    self.width
                )));
            }
            for (var, value) in lagged.iter().enumerate() {
                let row = 1 + (lag - 1) * self.width + var;
                for (eq, out) in next.iter_mut().enumerate() {
                    *out += self.beta[(row, eq)] * value;
                }
            }
        }

        if next.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFit(
                "Prediction produced non-finite values".to_string(),
            ));
        }
        Ok(next)
    }

    /// Project `steps` months past the end of `history`.
    ///
    /// Each prediction is appended to the lag window and feeds the next
    /// step, so errors compound over the horizon. Dates are month-starts
    /// beginning the month after the last historical date.
    pub fn forecast(&self, history: &IndicatorSeries, steps: usize) -> Result<Vec<Observation>> {
        let last_date: NaiveDate = history.last_date().ok_or_else(|| {
            ForecastError::ModelFit("Cannot forecast from an empty history".to_string())
        })?;
        if history.width() != self.width {
            return Err(ForecastError::ModelFit(format!(
                "History has {} columns, model has {}",
                history.width(),
                self.width
            )));
        }

        let mut window: Vec<Vec<f64>> = history
            .tail(self.order)
            .iter()
            .map(|o| o.values.clone())
            .collect();
        let dates = future_month_starts(last_date, steps)?;
        let mut projected = Vec::with_capacity(dates.len());

        for date in dates {
            let next = self.predict_next(&window)?;
            window.remove(0);
            window.push(next.clone());
            projected.push(Observation::new(date, next));
        }

        Ok(projected)
    }
}
