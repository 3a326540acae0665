//! Request/response orchestration of the forecasting pipeline

use crate::combined::CombinedResult;
use crate::config::{EngineConfig, RECOMMENDED_STEPS};
use crate::data::{DatasetLoader, IndicatorSeries};
use crate::error::{ErrorMarker, ForecastError, Result};
use crate::models::{LagOrderSelector, LagSelection, VarModel};
use crate::signal::Signal;
use serde::Serialize;
use tracing::{debug, info, info_span};

/// Outcome of one forecasting call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outlook {
    /// History plus projection, and its trend
    Ready {
        result: CombinedResult,
        signal: Signal,
        lag: LagSelection,
    },
    /// No result could be produced from the dataset
    Empty { marker: ErrorMarker },
}

impl Outlook {
    pub fn is_empty(&self) -> bool {
        matches!(self, Outlook::Empty { .. })
    }

    pub fn result(&self) -> Option<&CombinedResult> {
        match self {
            Outlook::Ready { result, .. } => Some(result),
            Outlook::Empty { .. } => None,
        }
    }

    pub fn signal(&self) -> Option<Signal> {
        match self {
            Outlook::Ready { signal, .. } => Some(*signal),
            Outlook::Empty { .. } => None,
        }
    }

    pub fn marker(&self) -> Option<ErrorMarker> {
        match self {
            Outlook::Ready { .. } => None,
            Outlook::Empty { marker } => Some(*marker),
        }
    }

    /// Text shown to users: the signal label or the empty-result marker
    pub fn label(&self) -> &'static str {
        match self {
            Outlook::Ready { signal, .. } => signal.as_str(),
            Outlook::Empty { marker } => marker.as_str(),
        }
    }
}

/// Stateless forecasting engine
///
/// Each call reads the dataset, selects a lag order, fits a fresh VAR and
/// projects it; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: EngineConfig,
}

impl ForecastEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Forecast `steps` months of inflows for `country`.
    ///
    /// Loader failures come back as [`Outlook::Empty`] with a marker. A
    /// failure to fit or project the model at the selected order is
    /// returned as [`ForecastError::ModelFit`].
    pub fn forecast(&self, country: &str, steps: usize) -> Result<Outlook> {
        let country = country.trim();
        if country.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Country must not be empty".to_string(),
            ));
        }
        if steps == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast steps must be positive".to_string(),
            ));
        }
        if !RECOMMENDED_STEPS.contains(&steps) {
            debug!(steps, "forecast horizon outside the recommended 12-60 months");
        }

        let span = info_span!("forecast", country, steps);
        let _guard = span.enter();

        let series = match DatasetLoader::from_csv(&self.config.dataset_path, country) {
            Ok(series) => series,
            Err(err) => {
                return match err.marker() {
                    Some(marker) => {
                        info!(%marker, error = %err, "no forecast produced");
                        Ok(Outlook::Empty { marker })
                    }
                    None => Err(err),
                };
            }
        };

        self.forecast_series(&series, steps)
    }

    /// Run selection, fitting, projection and classification on a series
    /// that is already loaded
    pub fn forecast_series(&self, series: &IndicatorSeries, steps: usize) -> Result<Outlook> {
        let selector = LagOrderSelector::new(self.config.criterion);
        let lag = selector.select(series);

        let fitted = VarModel::new(lag.order())?.fit(series)?;
        let projected = fitted.forecast(series, steps)?;
        let result = CombinedResult::new(series, projected)?;
        let signal = Signal::classify(&result)?;

        info!(
            order = lag.order(),
            fallback = lag.is_fallback(),
            history = series.len(),
            %signal,
            "forecast complete"
        );

        Ok(Outlook::Ready {
            result,
            signal,
            lag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_country() {
        let engine = ForecastEngine::default();
        assert!(matches!(
            engine.forecast("  ", 12),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_zero_steps() {
        let engine = ForecastEngine::default();
        assert!(matches!(
            engine.forecast("Kenya", 0),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_missing_dataset_is_empty_outlook() {
        let engine = ForecastEngine::new(EngineConfig::new("does/not/exist.csv"));
        let outlook = engine.forecast("Kenya", 24).unwrap();

        assert!(outlook.is_empty());
        assert_eq!(outlook.marker(), Some(ErrorMarker::DataMissing));
        assert_eq!(outlook.label(), "Data Missing");
        assert!(outlook.result().is_none());
    }
}
