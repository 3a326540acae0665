//! # Inflow Forecast
//!
//! Forecasts a country's capital-inflow trajectory from a monthly
//! multivariate economic series with a vector autoregression.
//!
//! ## Features
//!
//! - Per-country dataset loading with optional macro-driver columns
//! - Lag order selection by information criterion, with a fallback to order 1
//! - VAR fitting by rank-revealing least squares and recursive projection
//! - `HEATING_UP` / `COOLING_DOWN` trend classification
//! - CSV export and headline figures for downstream consumers
//!
//! ## Dataset
//!
//! A CSV file with the columns `Date`, `Country` and `FDI_Inflows_MillionUSD`,
//! plus any of `GDP_Growth`, `Inflation`, `Interest_Rate`, `Oil_Price`,
//! `USD_Index`, `Gold_Price` and `Platinum_Price`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use inflow_forecast::{EngineConfig, ForecastEngine, Outlook};
//!
//! let engine = ForecastEngine::new(EngineConfig::new("data/semi_synthetic_fdi.csv"));
//!
//! match engine.forecast("Nigeria", 24)? {
//!     Outlook::Ready { result, signal, .. } => {
//!         println!("{} rows, signal {}", result.len(), signal);
//!     }
//!     Outlook::Empty { marker } => println!("No forecast: {}", marker),
//! }
//! # Ok::<(), inflow_forecast::ForecastError>(())
//! ```

pub mod combined;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod outlook;
pub mod schema;
pub mod signal;
pub mod summary;
pub mod utils;

// Re-export commonly used types
pub use crate::combined::{CombinedResult, CombinedRow, RowKind};
pub use crate::config::EngineConfig;
pub use crate::data::{DatasetLoader, IndicatorSeries, Observation, MIN_OBSERVATIONS};
pub use crate::error::{ErrorMarker, ForecastError, Result};
pub use crate::models::{FittedVar, InformationCriterion, LagOrderSelector, LagSelection, VarModel};
pub use crate::outlook::{ForecastEngine, Outlook};
pub use crate::schema::{Indicator, Presence, Schema};
pub use crate::signal::Signal;
pub use crate::summary::OutlookSummary;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
