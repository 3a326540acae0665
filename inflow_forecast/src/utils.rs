//! Utility functions for the inflow_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};

/// First day of the month following `date`
pub fn next_month_start(date: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ForecastError::InvalidParameter(format!("No month follows {}", date))
    })
}

/// Months from `date` to the last month a `NaiveDate` can represent
fn months_remaining(date: NaiveDate) -> i64 {
    let index = |d: NaiveDate| d.year() as i64 * 12 + d.month0() as i64;
    index(NaiveDate::MAX) - index(date)
}

/// Create consecutive month-start dates following `last_date`.
///
/// Fails with `InvalidParameter` when the horizon runs past the last
/// representable month.
pub fn future_month_starts(last_date: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    let remaining = months_remaining(last_date);
    if i64::try_from(horizon).map_or(true, |h| h > remaining) {
        return Err(ForecastError::InvalidParameter(format!(
            "A horizon of {} months from {} runs past the last representable date",
            horizon, last_date
        )));
    }

    let mut dates = Vec::with_capacity(horizon);
    let mut current = last_date;

    for _ in 0..horizon {
        current = next_month_start(current)?;
        dates.push(current);
    }

    Ok(dates)
}

/// Parse the leading `YYYY-MM-DD` of a date or datetime string.
///
/// Month and day may omit their zero padding (`2020-3-1`). A time part
/// after a space or an ISO `T` separator is ignored.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().split(|c| c == ' ' || c == 'T').next()?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// At most `window` values from the front or back of `values`
pub(crate) fn window_slice(values: &[f64], window: usize, from_end: bool) -> &[f64] {
    let take = window.min(values.len());
    if from_end {
        &values[values.len() - take..]
    } else {
        &values[..take]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_month_start_rolls_over_year() {
        assert_eq!(next_month_start(date(2023, 12, 1)).unwrap(), date(2024, 1, 1));
        assert_eq!(next_month_start(date(2024, 1, 31)).unwrap(), date(2024, 2, 1));
    }

    #[test]
    fn test_future_month_starts() {
        let dates = future_month_starts(date(2023, 11, 1), 3).unwrap();
        assert_eq!(dates, vec![date(2023, 12, 1), date(2024, 1, 1), date(2024, 2, 1)]);
        assert!(future_month_starts(date(2023, 11, 1), 0).unwrap().is_empty());
    }

    #[test]
    fn test_future_month_starts_rejects_unrepresentable_horizon() {
        assert!(matches!(
            future_month_starts(date(2023, 11, 1), usize::MAX),
            Err(ForecastError::InvalidParameter(_))
        ));

        let remaining = months_remaining(date(2023, 11, 1)) as usize;
        assert!(future_month_starts(date(2023, 11, 1), remaining + 1).is_err());
        assert!(future_month_starts(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2020-03-01"), Some(date(2020, 3, 1)));
        assert_eq!(parse_date("2020-03-31 00:00:00"), Some(date(2020, 3, 31)));
        assert_eq!(parse_date("2020-03-31T00:00:00+00:00"), Some(date(2020, 3, 31)));
        assert_eq!(parse_date("2020-3-1"), Some(date(2020, 3, 1)));
        assert_eq!(parse_date("2020-3-1 00:00:00"), Some(date(2020, 3, 1)));
        assert_eq!(parse_date("2020-03-011"), None);
        assert_eq!(parse_date("2020/03/01"), None);
        assert_eq!(parse_date("March 2020"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_window_slice() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(window_slice(&values, 2, true), &[3.0, 4.0]);
        assert_eq!(window_slice(&values, 2, false), &[1.0, 2.0]);
        assert_eq!(window_slice(&values, 12, true), &values);
    }
}
