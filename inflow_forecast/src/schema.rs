//! Column schema for country indicator datasets
//!
//! Every dataset carries the inflow target. The macro drivers are optional
//! and vary by country (mineral prices, for instance, only exist for some
//! profiles), so a [`Schema`] records which drivers are present and where
//! they sit in each observation vector. Position 0 is always the target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the date column in the source file
pub const DATE_COLUMN: &str = "Date";
/// Name of the country column in the source file
pub const COUNTRY_COLUMN: &str = "Country";
/// Name of the row tag column in exported results
pub const TYPE_COLUMN: &str = "Type";

/// A recognised indicator column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Indicator {
    FdiInflows,
    GdpGrowth,
    Inflation,
    InterestRate,
    OilPrice,
    UsdIndex,
    GoldPrice,
    PlatinumPrice,
}

impl Indicator {
    /// The forecast target
    pub const TARGET: Indicator = Indicator::FdiInflows;

    /// Optional macro drivers in canonical column order
    pub const DRIVERS: [Indicator; 7] = [
        Indicator::GdpGrowth,
        Indicator::Inflation,
        Indicator::InterestRate,
        Indicator::OilPrice,
        Indicator::UsdIndex,
        Indicator::GoldPrice,
        Indicator::PlatinumPrice,
    ];

    /// Column header used in dataset files
    pub fn column_name(&self) -> &'static str {
        match self {
            Indicator::FdiInflows => "FDI_Inflows_MillionUSD",
            Indicator::GdpGrowth => "GDP_Growth",
            Indicator::Inflation => "Inflation",
            Indicator::InterestRate => "Interest_Rate",
            Indicator::OilPrice => "Oil_Price",
            Indicator::UsdIndex => "USD_Index",
            Indicator::GoldPrice => "Gold_Price",
            Indicator::PlatinumPrice => "Platinum_Price",
        }
    }

    /// Look up an indicator by its column header
    pub fn from_column_name(name: &str) -> Option<Self> {
        std::iter::once(Self::TARGET)
            .chain(Self::DRIVERS)
            .find(|indicator| indicator.column_name() == name)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Whether an optional driver is part of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present at the given position of each observation vector
    Present(usize),
    Absent,
}

/// The ordered column set of one indicator series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    drivers: Vec<Indicator>,
}

impl Schema {
    /// Build a schema from the drivers present in a dataset.
    ///
    /// The target is implicit. Drivers are deduplicated and put in canonical
    /// order so two datasets with the same columns always share a layout.
    pub fn with_drivers<I: IntoIterator<Item = Indicator>>(drivers: I) -> Self {
        let requested: Vec<Indicator> = drivers.into_iter().collect();
        let drivers = Indicator::DRIVERS
            .into_iter()
            .filter(|d| requested.contains(d))
            .collect();
        Self { drivers }
    }

    /// Schema holding every recognised column
    pub fn full() -> Self {
        Self::with_drivers(Indicator::DRIVERS)
    }

    /// Schema holding the target only
    pub fn target_only() -> Self {
        Self { drivers: Vec::new() }
    }

    /// Number of columns, including the target
    pub fn width(&self) -> usize {
        1 + self.drivers.len()
    }

    /// Position of the target in each observation vector
    pub fn target_position(&self) -> usize {
        0
    }

    pub fn drivers(&self) -> &[Indicator] {
        &self.drivers
    }

    /// Where a driver sits, if it is present
    pub fn presence(&self, indicator: Indicator) -> Presence {
        if indicator == Indicator::TARGET {
            return Presence::Present(0);
        }
        match self.drivers.iter().position(|d| *d == indicator) {
            Some(i) => Presence::Present(i + 1),
            None => Presence::Absent,
        }
    }

    /// Position of an indicator, or `None` when it is absent
    pub fn position(&self, indicator: Indicator) -> Option<usize> {
        match self.presence(indicator) {
            Presence::Present(i) => Some(i),
            Presence::Absent => None,
        }
    }

    /// Columns in observation order, target first
    pub fn columns(&self) -> Vec<Indicator> {
        std::iter::once(Indicator::TARGET)
            .chain(self.drivers.iter().copied())
            .collect()
    }

    /// Column headers in observation order
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.column_name()).collect()
    }
}
