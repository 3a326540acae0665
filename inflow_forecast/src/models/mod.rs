//! Forecasting models for indicator series

pub mod lag_order;
pub mod var;

pub use lag_order::{
    max_lag, InformationCriterion, LagOrderSelector, LagScore, LagSelection, FALLBACK_ORDER,
    MAX_LAG_CEILING, OBSERVATIONS_PER_LAG,
};
pub use var::{FittedVar, VarModel};
