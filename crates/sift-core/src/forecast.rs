//! Short-horizon forecasting
//!
//! Projects income and expense for the month after the latest observed
//! month using a trailing moving average. Forecasting is advisory, not
//! critical-path: with no monthly data (or an unparseable latest month key)
//! the result is simply empty, never an error.

use tracing::debug;

use crate::models::{ForecastPoint, Transaction};
use crate::reports::aggregate_monthly;

/// Default number of trailing months averaged
pub const DEFAULT_FORECAST_WINDOW: usize = 3;

const METHOD_MOVING_AVERAGE: &str = "moving_average";

/// Calendar month immediately after a "YYYY-MM" key, with the
/// December -> January year rollover handled explicitly.
fn next_month_key(month: &str) -> Option<String> {
    let (year_str, month_str) = month.split_once('-')?;
    let year: i32 = year_str.parse().ok()?;
    let month: u32 = month_str.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    Some(format!("{:04}-{:02}", next_year, next_month))
}

/// Build a moving-average forecast for the month following the latest
/// observed month.
///
/// The trailing `window` months of income and expense are averaged
/// independently (unweighted, no seasonality). A window of zero is treated
/// as the default. Returns None when the ledger has no monthly data.
pub fn build_forecast(transactions: &[Transaction], window: usize) -> Option<ForecastPoint> {
    let window = if window == 0 {
        DEFAULT_FORECAST_WINDOW
    } else {
        window
    };

    let monthly = aggregate_monthly(transactions);
    let latest = monthly.last()?;
    let target_month = next_month_key(&latest.month)?;

    let tail = &monthly[monthly.len().saturating_sub(window)..];
    let n = tail.len() as f64;
    let projected_income = tail.iter().map(|m| m.income).sum::<f64>() / n;
    let projected_expense = tail.iter().map(|m| m.expense).sum::<f64>() / n;

    debug!(
        "Forecast for {}: averaged {} trailing months",
        target_month,
        tail.len()
    );

    Some(ForecastPoint {
        month: target_month,
        projected_income,
        projected_expense,
        projected_savings: projected_income - projected_expense,
        method: METHOD_MOVING_AVERAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(date: (i32, u32, u32), amount: f64) -> Transaction {
        Transaction {
            id: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: "TEST".to_string(),
            amount,
            category: "Other".to_string(),
            recurring: None,
        }
    }

    #[test]
    fn test_next_month_key() {
        assert_eq!(next_month_key("2025-01").as_deref(), Some("2025-02"));
        assert_eq!(next_month_key("2025-12").as_deref(), Some("2026-01"));
        assert_eq!(next_month_key("garbage"), None);
        assert_eq!(next_month_key("2025-13"), None);
    }

    #[test]
    fn test_forecast_two_months_window_three() {
        // Jan: income 100k / expense 50k; Feb: income 120k / expense 60k
        let ledger = vec![
            tx((2025, 1, 5), 100_000.0),
            tx((2025, 1, 10), -50_000.0),
            tx((2025, 2, 5), 120_000.0),
            tx((2025, 2, 10), -60_000.0),
        ];

        let forecast = build_forecast(&ledger, 3).unwrap();
        assert_eq!(forecast.month, "2025-03");
        assert_eq!(forecast.projected_income, 110_000.0);
        assert_eq!(forecast.projected_expense, 55_000.0);
        assert_eq!(forecast.projected_savings, 55_000.0);
        assert_eq!(forecast.method, "moving_average");
    }

    #[test]
    fn test_forecast_window_trims_older_months() {
        let ledger = vec![
            tx((2025, 1, 5), 900_000.0), // outside a 2-month window
            tx((2025, 2, 5), 100_000.0),
            tx((2025, 3, 5), 120_000.0),
        ];

        let forecast = build_forecast(&ledger, 2).unwrap();
        assert_eq!(forecast.month, "2025-04");
        assert_eq!(forecast.projected_income, 110_000.0);
    }

    #[test]
    fn test_forecast_year_rollover() {
        let ledger = vec![tx((2025, 12, 10), 1000.0)];
        let forecast = build_forecast(&ledger, 3).unwrap();
        assert_eq!(forecast.month, "2026-01");
    }

    #[test]
    fn test_forecast_empty_ledger() {
        assert!(build_forecast(&[], 3).is_none());
    }

    #[test]
    fn test_forecast_zero_window_uses_default() {
        let ledger = vec![tx((2025, 1, 5), 1000.0)];
        let forecast = build_forecast(&ledger, 0).unwrap();
        assert_eq!(forecast.projected_income, 1000.0);
    }
}
