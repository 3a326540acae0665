//! History and forecast rows joined into one result

use crate::data::{IndicatorSeries, Observation};
use crate::error::{ForecastError, Result};
use crate::schema::{Indicator, Schema, DATE_COLUMN, TYPE_COLUMN};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Whether a row was observed or projected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    History,
    Forecast,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::History => f.write_str("History"),
            RowKind::Forecast => f.write_str("Forecast"),
        }
    }
}

/// A tagged row of the combined result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub date: NaiveDate,
    pub values: Vec<f64>,
    pub kind: RowKind,
}

/// Historical rows followed by forecast rows, sharing one schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedResult {
    schema: Schema,
    rows: Vec<CombinedRow>,
    history_len: usize,
}

impl CombinedResult {
    /// Join a history with the forecast that continues it.
    ///
    /// Forecast rows must match the history's width and start after its
    /// last date.
    pub fn new(history: &IndicatorSeries, forecast: Vec<Observation>) -> Result<Self> {
        let width = history.width();
        if let Some(bad) = forecast.iter().find(|o| o.values.len() != width) {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast row {} has {} values, history has {} columns",
                bad.date,
                bad.values.len(),
                width
            )));
        }
        if let (Some(last), Some(first)) = (history.last_date(), forecast.first()) {
            if first.date <= last {
                return Err(ForecastError::InvalidParameter(format!(
                    "Forecast starts at {} but history ends at {}",
                    first.date, last
                )));
            }
        }

        let tag = |obs: &Observation, kind| CombinedRow {
            date: obs.date,
            values: obs.values.clone(),
            kind,
        };
        let mut rows: Vec<CombinedRow> = history
            .observations()
            .iter()
            .map(|o| tag(o, RowKind::History))
            .collect();
        rows.extend(forecast.iter().map(|o| tag(o, RowKind::Forecast)));

        Ok(Self {
            schema: history.schema().clone(),
            rows,
            history_len: history.len(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[CombinedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows tagged `History`
    pub fn history(&self) -> &[CombinedRow] {
        &self.rows[..self.history_len]
    }

    /// Rows tagged `Forecast`
    pub fn forecast(&self) -> &[CombinedRow] {
        &self.rows[self.history_len..]
    }

    pub fn last_history_date(&self) -> Option<NaiveDate> {
        self.history().last().map(|r| r.date)
    }

    /// Values of one indicator across all rows, or `None` if absent
    pub fn column(&self, indicator: Indicator) -> Option<Vec<f64>> {
        let position = self.schema.position(indicator)?;
        Some(self.rows.iter().map(|r| r.values[position]).collect())
    }

    /// Target values of the history rows
    pub fn history_target(&self) -> Vec<f64> {
        let position = self.schema.target_position();
        self.history().iter().map(|r| r.values[position]).collect()
    }

    /// Target values of the forecast rows
    pub fn forecast_target(&self) -> Vec<f64> {
        let position = self.schema.target_position();
        self.forecast().iter().map(|r| r.values[position]).collect()
    }

    /// Write the result as CSV: `Date`, the schema columns, then `Type`
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![DATE_COLUMN.to_string()];
        header.extend(self.schema.column_names().iter().map(|c| c.to_string()));
        header.push(TYPE_COLUMN.to_string());
        csv_writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(row.values.len() + 2);
            record.push(row.date.format("%Y-%m-%d").to_string());
            record.extend(row.values.iter().map(|v| v.to_string()));
            record.push(row.kind.to_string());
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the result to a CSV file
    pub fn to_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}
