//! Indicator series handling and dataset loading

use crate::error::{ForecastError, Result};
use crate::schema::{Indicator, Schema, COUNTRY_COLUMN, DATE_COLUMN};
use crate::utils::parse_date;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// Fewest valid rows a country needs before a model is fitted
pub const MIN_OBSERVATIONS: usize = 15;

/// One monthly observation vector laid out by a [`Schema`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub values: Vec<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, values: Vec<f64>) -> Self {
        Self { date, values }
    }
}

/// Time-ordered multivariate series for a single country
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    schema: Schema,
    observations: Vec<Observation>,
}

impl IndicatorSeries {
    /// Create a series from observations that are already cleaned.
    ///
    /// Every observation must match the schema width, and dates must be
    /// strictly increasing.
    pub fn from_observations(schema: Schema, observations: Vec<Observation>) -> Result<Self> {
        let width = schema.width();
        for (i, obs) in observations.iter().enumerate() {
            if obs.values.len() != width {
                return Err(ForecastError::InvalidParameter(format!(
                    "Observation {} has {} values, schema has {} columns",
                    i,
                    obs.values.len(),
                    width
                )));
            }
        }
        if let Some(pair) = observations.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(ForecastError::InvalidParameter(format!(
                "Dates must be strictly increasing ({} then {})",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self {
            schema,
            observations,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of columns, including the target
    pub fn width(&self) -> usize {
        self.schema.width()
    }

    /// Observation at a position
    pub fn row(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    /// The trailing `count` observations (fewer if the series is shorter)
    pub fn tail(&self, count: usize) -> &[Observation] {
        let start = self.observations.len().saturating_sub(count);
        &self.observations[start..]
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Values of one indicator, or `None` if it is absent from the schema
    pub fn column(&self, indicator: Indicator) -> Option<Vec<f64>> {
        let position = self.schema.position(indicator)?;
        Some(self.observations.iter().map(|o| o.values[position]).collect())
    }

    /// Values of the inflow target
    pub fn target(&self) -> Vec<f64> {
        let position = self.schema.target_position();
        self.observations.iter().map(|o| o.values[position]).collect()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.observations.len()
    }
}

/// Loader for persisted country indicator datasets
#[derive(Debug)]
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load one country's series from a CSV dataset.
    ///
    /// Fails with `DataUnavailable` when the file cannot be read or lacks a
    /// mandatory column, and with `InsufficientData` when fewer than
    /// [`MIN_OBSERVATIONS`] valid rows remain.
    pub fn from_csv<P: AsRef<Path>>(path: P, country: &str) -> Result<IndicatorSeries> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ForecastError::DataUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()
            .map_err(|e| ForecastError::DataUnavailable(format!("{}: {}", path.display(), e)))?;

        Self::from_dataframe(&df, country)
    }

    /// Extract one country's series from an already loaded DataFrame
    pub fn from_dataframe(df: &DataFrame, country: &str) -> Result<IndicatorSeries> {
        let schema = Self::detect_schema(df)?;
        let columns = schema.columns();

        let countries = Self::text_column(df, COUNTRY_COLUMN)?;
        let dates = Self::text_column(df, DATE_COLUMN)?;
        let values = columns
            .iter()
            .map(|c| Self::numeric_column(df, c.column_name()))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::new();
        let mut matched = 0;
        for i in 0..df.height() {
            if countries[i].as_deref() != Some(country) {
                continue;
            }
            matched += 1;

            let Some(raw_date) = dates[i].as_deref() else {
                continue;
            };
            let date = parse_date(raw_date).ok_or_else(|| {
                ForecastError::DataUnavailable(format!("Unreadable date '{}'", raw_date))
            })?;

            let row: Option<Vec<f64>> = values
                .iter()
                .map(|col| col[i].filter(|v| v.is_finite()))
                .collect();
            if let Some(row) = row {
                rows.push(Observation::new(date, row));
            }
        }

        rows.sort_by_key(|o| o.date);
        let before_dedup = rows.len();
        rows.dedup_by_key(|o| o.date);
        if rows.len() != before_dedup {
            warn!(
                country,
                dropped = before_dedup - rows.len(),
                "duplicate dates in dataset, keeping first occurrence"
            );
        }

        debug!(
            country,
            matched,
            valid = rows.len(),
            columns = schema.width(),
            "loaded country rows"
        );

        if rows.len() < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: rows.len(),
            });
        }

        IndicatorSeries::from_observations(schema, rows)
    }

    /// Work out which recognised columns a DataFrame carries
    fn detect_schema(df: &DataFrame) -> Result<Schema> {
        let column_names = df.get_column_names();

        for required in [DATE_COLUMN, COUNTRY_COLUMN, Indicator::TARGET.column_name()] {
            if !column_names.contains(&required) {
                return Err(ForecastError::DataUnavailable(format!(
                    "Missing mandatory column '{}'",
                    required
                )));
            }
        }

        let drivers = column_names
            .iter()
            .filter_map(|name| Indicator::from_column_name(name))
            .filter(|indicator| *indicator != Indicator::TARGET);

        Ok(Schema::with_drivers(drivers))
    }

    /// Helper method to get a column as optional strings
    fn text_column(df: &DataFrame, column_name: &str) -> Result<Vec<Option<String>>> {
        let col = df.column(column_name)?.cast(&DataType::Utf8)?;
        Ok(col
            .utf8()?
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect())
    }

    /// Helper method to get a column as optional f64 values
    fn numeric_column(df: &DataFrame, column_name: &str) -> Result<Vec<Option<f64>>> {
        let col = df.column(column_name)?.cast(&DataType::Float64)?;
        Ok(col.f64()?.into_iter().collect())
    }
}
