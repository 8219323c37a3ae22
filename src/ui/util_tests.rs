#![allow(clippy::unwrap_used)]

use super::util::*;
use crate::forecast::{ForecastPoint, MonthKey};
use crate::money::Cents;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_fits() {
    assert_eq!(truncate("Acme", 10), "Acme");
    assert_eq!(truncate("Acme", 4), "Acme");
}

#[test]
fn test_truncate_cuts_with_ellipsis() {
    assert_eq!(truncate("Northwind Traders", 9), "Northwin…");
    assert_eq!(truncate("Acme", 1), "…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Acme", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("Café Müller", 5), "Café…");
}

// ── chart helpers ─────────────────────────────────────────────

fn point(month: u32, expected: u64, actual: u64) -> ForecastPoint {
    ForecastPoint {
        ym: MonthKey::new(2024, month).unwrap(),
        expected_cents: Cents::new(expected),
        actual_cents: Cents::new(actual),
    }
}

#[test]
fn test_cents_to_units() {
    assert_eq!(cents_to_units(Cents::new(12_550)), 125.5);
    assert_eq!(cents_to_units(Cents::ZERO), 0.0);
}

#[test]
fn test_series_peak() {
    let series = vec![point(1, 10_000, 0), point(2, 5_000, 25_000)];
    assert_eq!(series_peak(&series), 250.0);
}

#[test]
fn test_series_peak_floor() {
    assert_eq!(series_peak(&[]), 1.0);
    assert_eq!(series_peak(&[point(1, 0, 0)]), 1.0);
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_ends() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 20, 5);
    assert_eq!((index, scroll), (19, 15));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 0, 5);
    assert_eq!((index, scroll), (0, 0));
}
