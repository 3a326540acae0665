//! Synthetic dataset fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use inflow_forecast::utils::future_month_starts;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::io::Write;
use tempfile::NamedTempFile;

pub const FULL_HEADER: &str = "Date,Country,FDI_Inflows_MillionUSD,GDP_Growth,Inflation,\
Interest_Rate,Oil_Price,USD_Index,Gold_Price,Platinum_Price";

/// First month of every synthetic series
pub fn first_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
}

/// `n` consecutive month-starts beginning at [`first_month`]
pub fn months(n: usize) -> Vec<NaiveDate> {
    let before = NaiveDate::from_ymd_opt(2018, 12, 1).unwrap();
    future_month_starts(before, n).unwrap()
}

/// Write a header and data lines to a temporary CSV file
pub fn dataset_file(header: &str, lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", header).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

/// Semi-synthetic rows with every recognised column.
///
/// Drivers follow noisy random walks and inflows respond to growth,
/// inflation and oil, so every column carries independent variation.
pub fn synthetic_rows(country: &str, n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let (mut oil, mut usd, mut gold, mut platinum) = (70.0, 100.0, 1800.0, 900.0);

    months(n)
        .into_iter()
        .map(|date| {
            oil += 2.0 * noise.sample(&mut rng);
            usd += 0.8 * noise.sample(&mut rng);
            gold += 25.0 * noise.sample(&mut rng);
            platinum += 15.0 * noise.sample(&mut rng);

            let gdp: f64 = 3.0 + 0.03 * (oil - 70.0) + noise.sample(&mut rng);
            let inflation = (12.0 - 0.5 * gdp + 1.5 * noise.sample(&mut rng)).abs();
            let rate = inflation + 3.0 + 0.5 * noise.sample(&mut rng);
            let fdi = (1200.0 + 20.0 * gdp - 5.0 * inflation + 5.0 * (oil - 70.0)
                + 150.0 * noise.sample(&mut rng))
            .max(10.0);

            format!(
                "{},{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
                date, country, fdi, gdp, inflation, rate, oil, usd, gold, platinum
            )
        })
        .collect()
}

/// Rows whose inflows rise by a fixed step while every driver stays flat
pub fn trending_rows(country: &str, n: usize) -> Vec<String> {
    months(n)
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            format!(
                "{},{},{},3.0,6.0,9.0,70.0,100.0,1800.0,900.0",
                date,
                country,
                100.0 + 5.0 * i as f64
            )
        })
        .collect()
}
