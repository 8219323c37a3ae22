use serde::Serialize;

use super::month::MonthKey;
use super::MonthMap;
use crate::money::Cents;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    pub ym: MonthKey,
    pub expected_cents: Cents,
    pub actual_cents: Cents,
}

/// One point per window month, in window order. Missing keys read as zero.
pub fn merge_series(window: &[MonthKey], expected: &MonthMap, actual: &MonthMap) -> Vec<ForecastPoint> {
    window
        .iter()
        .map(|ym| ForecastPoint {
            ym: *ym,
            expected_cents: expected.get(ym).copied().unwrap_or_default(),
            actual_cents: actual.get(ym).copied().unwrap_or_default(),
        })
        .collect()
}

/// Flat mean of `values` repeated at every position. Display aid only.
pub fn average_trendline(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let total: f64 = values
        .iter()
        .map(|v| if v.is_finite() { *v } else { 0.0 })
        .sum();
    let avg = total / values.len() as f64;
    vec![avg; values.len()]
}

/// Trendline over the actual column of a series.
pub fn actual_trendline(points: &[ForecastPoint]) -> Vec<f64> {
    let actuals: Vec<f64> = points
        .iter()
        .map(|p| p.actual_cents.get() as f64)
        .collect();
    average_trendline(&actuals)
}
