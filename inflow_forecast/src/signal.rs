//! Trend classification of a combined result

use crate::combined::CombinedResult;
use crate::error::{ForecastError, Result};
use crate::utils::window_slice;
use serde::{Deserialize, Serialize};
use std::fmt;
use var_math::stats::mean;

/// Rows averaged on each side of the history/forecast boundary
pub const SIGNAL_WINDOW: usize = 12;

/// Direction of projected inflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    HeatingUp,
    CoolingDown,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::HeatingUp => "HEATING_UP",
            Signal::CoolingDown => "COOLING_DOWN",
        }
    }

    /// Classify a combined result.
    ///
    /// Compares the target mean over the last [`SIGNAL_WINDOW`] history rows
    /// with the mean over the first [`SIGNAL_WINDOW`] forecast rows, using
    /// fewer rows when either side is shorter. Only a strictly higher
    /// forecast mean counts as heating up.
    pub fn classify(result: &CombinedResult) -> Result<Signal> {
        let history = result.history_target();
        let forecast = result.forecast_target();
        if history.is_empty() || forecast.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Signal needs at least one history and one forecast row".to_string(),
            ));
        }

        let recent = mean(window_slice(&history, SIGNAL_WINDOW, true))?;
        let upcoming = mean(window_slice(&forecast, SIGNAL_WINDOW, false))?;

        Ok(if upcoming > recent {
            Signal::HeatingUp
        } else {
            Signal::CoolingDown
        })
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{IndicatorSeries, Observation};
    use crate::schema::Schema;
    use crate::utils::future_month_starts;
    use chrono::NaiveDate;

    fn combined(history: &[f64], forecast: &[f64]) -> CombinedResult {
        let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let dates = future_month_starts(start, history.len() + forecast.len()).unwrap();
        let (hist_dates, fcst_dates) = dates.split_at(history.len());

        let series = IndicatorSeries::from_observations(
            Schema::target_only(),
            hist_dates
                .iter()
                .zip(history)
                .map(|(d, v)| Observation::new(*d, vec![*v]))
                .collect(),
        )
        .unwrap();
        let projected = fcst_dates
            .iter()
            .zip(forecast)
            .map(|(d, v)| Observation::new(*d, vec![*v]))
            .collect();

        CombinedResult::new(&series, projected).unwrap()
    }

    #[test]
    fn test_higher_forecast_heats_up() {
        let result = combined(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
        assert_eq!(Signal::classify(&result).unwrap(), Signal::HeatingUp);
    }

    #[test]
    fn test_equal_means_cool_down() {
        let result = combined(&[5.0, 5.0], &[4.0, 6.0]);
        assert_eq!(Signal::classify(&result).unwrap(), Signal::CoolingDown);
    }

    #[test]
    fn test_only_last_twelve_history_rows_count() {
        // Early history is huge; the last 12 rows average 10
        let mut history = vec![1000.0; 5];
        history.extend(vec![10.0; 12]);
        let result = combined(&history, &[11.0]);
        assert_eq!(Signal::classify(&result).unwrap(), Signal::HeatingUp);
    }

    #[test]
    fn test_only_first_twelve_forecast_rows_count() {
        let mut forecast = vec![9.0; 12];
        forecast.extend(vec![500.0; 24]);
        let result = combined(&[10.0; 15], &forecast);
        assert_eq!(Signal::classify(&result).unwrap(), Signal::CoolingDown);
    }

    #[test]
    fn test_display_matches_labels() {
        assert_eq!(Signal::HeatingUp.to_string(), "HEATING_UP");
        assert_eq!(Signal::CoolingDown.to_string(), "COOLING_DOWN");
    }
}
