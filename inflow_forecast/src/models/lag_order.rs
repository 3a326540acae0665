//! Lag order selection for VAR models
//!
//! The search is bounded twice: by an absolute ceiling and by the sample
//! size, since richer lag structures overfit short series. Every candidate
//! is estimated on the same trailing sample so their criteria compare.
//! A numerical failure anywhere in the search does not propagate; the
//! selector falls back to order 1 and says so in its result.

use crate::data::IndicatorSeries;
use crate::error::{ForecastError, Result};
use crate::models::var::estimate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use var_math::log_det_spd;

/// Absolute ceiling on the searched lag order
pub const MAX_LAG_CEILING: usize = 12;
/// Observations required per searched lag
pub const OBSERVATIONS_PER_LAG: usize = 10;
/// Order used when the search fails
pub const FALLBACK_ORDER: usize = 1;

/// Largest lag order searched for a series of `n` rows
pub fn max_lag(n: usize) -> usize {
    MAX_LAG_CEILING.min(n / OBSERVATIONS_PER_LAG).max(1)
}

/// Information criterion used to rank lag orders (lower is better)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InformationCriterion {
    /// Akaike
    #[default]
    Aic,
    /// Schwarz / Bayesian
    Bic,
    /// Hannan-Quinn
    Hqic,
    /// Final prediction error
    Fpe,
}

impl InformationCriterion {
    /// Score a candidate from its residual log-determinant.
    ///
    /// `nobs` is the common sample size, `width` the number of modelled
    /// columns and `order` the candidate lag.
    pub fn score(&self, log_det: f64, nobs: usize, width: usize, order: usize) -> f64 {
        let t = nobs as f64;
        let free = (order * width * width) as f64;
        match self {
            InformationCriterion::Aic => log_det + 2.0 * free / t,
            InformationCriterion::Bic => log_det + t.ln() * free / t,
            InformationCriterion::Hqic => log_det + 2.0 * t.ln().ln() * free / t,
            InformationCriterion::Fpe => {
                let df_model = (1 + width * order) as f64;
                ((t + df_model) / (t - df_model)).powi(width as i32) * log_det.exp()
            }
        }
    }
}

impl fmt::Display for InformationCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InformationCriterion::Aic => "aic",
            InformationCriterion::Bic => "bic",
            InformationCriterion::Hqic => "hqic",
            InformationCriterion::Fpe => "fpe",
        };
        f.write_str(name)
    }
}

impl FromStr for InformationCriterion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aic" => Ok(InformationCriterion::Aic),
            "bic" | "sbic" => Ok(InformationCriterion::Bic),
            "hqic" | "hq" => Ok(InformationCriterion::Hqic),
            "fpe" => Ok(InformationCriterion::Fpe),
            other => Err(format!("Unknown information criterion: {}", other)),
        }
    }
}

/// Criterion value of one candidate order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LagScore {
    pub order: usize,
    pub score: f64,
}

/// Outcome of lag order selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LagSelection {
    /// The search completed and picked the best-scoring order
    Searched {
        order: usize,
        max_lag: usize,
        scores: Vec<LagScore>,
    },
    /// The search failed numerically and order 1 was used instead
    Fallback {
        order: usize,
        max_lag: usize,
        reason: String,
    },
}

impl LagSelection {
    pub fn order(&self) -> usize {
        match self {
            LagSelection::Searched { order, .. } | LagSelection::Fallback { order, .. } => *order,
        }
    }

    pub fn max_lag(&self) -> usize {
        match self {
            LagSelection::Searched { max_lag, .. } | LagSelection::Fallback { max_lag, .. } => {
                *max_lag
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LagSelection::Fallback { .. })
    }
}

/// Picks a VAR lag order by information criterion
#[derive(Debug, Clone, Copy, Default)]
pub struct LagOrderSelector {
    criterion: InformationCriterion,
}

impl LagOrderSelector {
    pub fn new(criterion: InformationCriterion) -> Self {
        Self { criterion }
    }

    pub fn criterion(&self) -> InformationCriterion {
        self.criterion
    }

    /// Select an order in `[1, max_lag(n)]`.
    ///
    /// First attempt: search every candidate. Second attempt, only if the
    /// first fails: use [`FALLBACK_ORDER`] directly. Never returns an error.
    pub fn select(&self, series: &IndicatorSeries) -> LagSelection {
        let max_lag = max_lag(series.len());

        match self.search(series, max_lag) {
            Ok((order, scores)) => LagSelection::Searched {
                order,
                max_lag,
                scores,
            },
            Err(err) => {
                warn!(
                    criterion = %self.criterion,
                    max_lag,
                    error = %err,
                    "lag order search failed, falling back to order {}",
                    FALLBACK_ORDER
                );
                LagSelection::Fallback {
                    order: FALLBACK_ORDER,
                    max_lag,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Score every candidate order on the common trailing sample
    pub fn search(&self, series: &IndicatorSeries, max_lag: usize) -> Result<(usize, Vec<LagScore>)> {
        let width = series.width();
        let mut scores = Vec::with_capacity(max_lag);

        for order in 1..=max_lag {
            let fit = estimate(series.observations(), width, order, max_lag - order)?;
            if fit.nobs <= fit.df_model() {
                return Err(ForecastError::ModelFit(format!(
                    "No residual degrees of freedom at lag {}",
                    order
                )));
            }

            let log_det = log_det_spd(&fit.residual_cov)?;
            let score = self.criterion.score(log_det, fit.nobs, width, order);
            if !score.is_finite() {
                return Err(ForecastError::ModelFit(format!(
                    "Non-finite {} at lag {}",
                    self.criterion, order
                )));
            }

            debug!(order, score, criterion = %self.criterion, "lag candidate scored");
            scores.push(LagScore { order, score });
        }

        let best = scores
            .iter()
            .fold(None::<LagScore>, |best, s| match best {
                Some(b) if b.score <= s.score => Some(b),
                _ => Some(*s),
            })
            .ok_or_else(|| ForecastError::ModelFit("No lag candidates searched".to_string()))?;

        Ok((best.order, scores))
    }
}
