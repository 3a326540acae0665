//! Headline figures derived from a combined result

use crate::combined::CombinedResult;
use crate::error::{ForecastError, Result};
use crate::schema::Indicator;
use serde::Serialize;
use std::fmt;
use var_math::stats::pearson_correlation;

/// Months per year, used to annualise monthly inflows
pub const MONTHS_PER_YEAR: f64 = 12.0;
/// Correlations stronger than this in absolute value are reported as strong
pub const STRONG_CORRELATION: f64 = 0.5;

/// Strength and sign of a driver correlation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sensitivity {
    pub correlation: f64,
    pub strong: bool,
    pub positive: bool,
}

impl Sensitivity {
    pub fn from_correlation(correlation: f64) -> Self {
        Self {
            correlation,
            strong: correlation.abs() > STRONG_CORRELATION,
            positive: correlation > 0.0,
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} ({} {})",
            self.correlation,
            if self.strong { "Strong" } else { "Weak" },
            if self.positive { "Positive" } else { "Negative" }
        )
    }
}

/// Annualised run-rates and driver sensitivity of an outlook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlookSummary {
    /// Last historical monthly inflow times twelve
    pub current_annualized: f64,
    /// Last forecast monthly inflow times twelve
    pub predicted_annualized: f64,
    /// Percentage change between the two; `None` when current is zero
    pub delta_pct: Option<f64>,
    /// Correlation of inflows with the oil price over all rows
    pub oil_sensitivity: Option<Sensitivity>,
}

impl OutlookSummary {
    pub fn from_result(result: &CombinedResult) -> Result<Self> {
        let history = result.history_target();
        let current = history.last().copied().ok_or_else(|| {
            ForecastError::InvalidParameter("Summary needs at least one history row".to_string())
        })? * MONTHS_PER_YEAR;

        // Without forecast rows the outlook is flat
        let predicted = result
            .forecast_target()
            .last()
            .map(|v| v * MONTHS_PER_YEAR)
            .unwrap_or(current);

        let delta_pct = if current != 0.0 {
            Some((predicted - current) / current * 100.0)
        } else {
            None
        };

        let oil_sensitivity = match (
            result.column(Indicator::TARGET),
            result.column(Indicator::OilPrice),
        ) {
            (Some(target), Some(oil)) if target.len() >= 2 => {
                pearson_correlation(&target, &oil)?.map(Sensitivity::from_correlation)
            }
            _ => None,
        };

        Ok(Self {
            current_annualized: current,
            predicted_annualized: predicted,
            delta_pct,
            oil_sensitivity,
        })
    }
}

impl fmt::Display for OutlookSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outlook Summary:")?;
        writeln!(f, "  Current annualized:  ${:.1}M", self.current_annualized)?;
        write!(f, "  Forecast (end):      ${:.1}M", self.predicted_annualized)?;
        match self.delta_pct {
            Some(delta) => writeln!(f, " ({:+.1}%)", delta)?,
            None => writeln!(f)?,
        }
        match &self.oil_sensitivity {
            Some(s) => writeln!(f, "  Oil sensitivity:     {}", s)?,
            None => writeln!(f, "  Oil sensitivity:     n/a")?,
        }
        Ok(())
    }
}
