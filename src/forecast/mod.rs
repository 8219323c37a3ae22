//! Revenue forecast: spreads project contract values over calendar months and
//! lines them up against paid invoices.
//!
//! Everything here is pure and operates on already-fetched records. Edge
//! cases (missing dates, empty inputs, unknown months) resolve to zero rather
//! than errors.

mod actual;
mod allocate;
mod month;
mod series;

use std::collections::BTreeMap;

pub use actual::{actual_by_month, PaidAmount};
pub use allocate::{expected_by_month, ProjectForForecast};
pub use month::{
    clamp_window, trailing_months, trailing_months_now, MonthKey,
    DEFAULT_WINDOW_MONTHS, MAX_WINDOW_MONTHS, MIN_WINDOW_MONTHS,
};
pub use series::{actual_trendline, merge_series, ForecastPoint};

use crate::money::Cents;

/// Cents bucketed by month, ordered chronologically.
pub type MonthMap = BTreeMap<MonthKey, Cents>;

/// Expected vs actual per month of `window`.
pub fn forecast(
    window: &[MonthKey],
    projects: &[ProjectForForecast],
    payments: &[PaidAmount],
) -> Vec<ForecastPoint> {
    let expected = expected_by_month(window, projects);
    let actual = actual_by_month(window, payments);
    merge_series(window, &expected, &actual)
}
