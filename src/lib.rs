//! # Inflow Outlook
//!
//! `inflow_outlook_workspace` bundles the capital-inflow forecasting engine
//! and the numerical routines it is built on.
//!
//! ## Example
//!
//! ```no_run
//! use inflow_outlook_workspace::forecast::{EngineConfig, ForecastEngine};
//!
//! let engine = ForecastEngine::new(EngineConfig::new("data/semi_synthetic_fdi.csv"));
//! let outlook = engine.forecast("Kenya", 36)?;
//! println!("{}", outlook.label());
//! # Ok::<(), inflow_outlook_workspace::forecast::ForecastError>(())
//! ```

/// The forecasting engine
pub use inflow_forecast as forecast;
/// Matrix, least-squares and statistics routines
pub use var_math as math;

pub use inflow_forecast::{ForecastEngine, Outlook, Signal};
