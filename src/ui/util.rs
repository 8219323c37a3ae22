use crate::forecast::ForecastPoint;
use crate::money::Cents;

/// Shorten `s` to at most `max` characters, ending in "…" when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max - 1).collect();
    format!("{kept}…")
}

/// Whole currency units as a float, for chart axes.
pub(crate) fn cents_to_units(cents: Cents) -> f64 {
    cents.get() as f64 / 100.0
}

/// Largest expected or actual value in the series, in whole units. Never
/// below 1 so chart bounds stay non-degenerate.
pub(crate) fn series_peak(series: &[ForecastPoint]) -> f64 {
    series
        .iter()
        .map(|p| p.expected_cents.max(p.actual_cents))
        .max()
        .map(cents_to_units)
        .unwrap_or(0.0)
        .max(1.0)
}

pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
