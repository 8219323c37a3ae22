#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::*;
use crate::forecast::{forecast, trailing_months, PaidAmount, ProjectForForecast};
use crate::money::Cents;

fn quarter() -> Vec<ForecastPoint> {
    let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let projects = vec![ProjectForForecast {
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        contract_value: Cents::new(300),
    }];
    let payments = vec![PaidAmount {
        paid_date: NaiveDate::from_ymd_opt(2024, 2, 15),
        amount: Cents::new(50),
    }];
    forecast(&trailing_months(3, today), &projects, &payments)
}

#[test]
fn test_write_series_rows() {
    let mut buf = Vec::new();
    let count = write_series(&mut buf, &quarter()).unwrap();
    assert_eq!(count, 3);
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "ym,expected_cents,actual_cents",
            "2024-01,100,0",
            "2024-02,100,50",
            "2024-03,100,0",
        ]
    );
}

#[test]
fn test_write_series_empty_has_header() {
    let mut buf = Vec::new();
    assert_eq!(write_series(&mut buf, &[]).unwrap(), 0);
    assert_eq!(String::from_utf8(buf).unwrap(), "ym,expected_cents,actual_cents\n");
}

#[test]
fn test_export_series_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forecast.csv");
    assert_eq!(export_series_csv(&path, &quarter()).unwrap(), 3);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("ym,expected_cents,actual_cents\n2024-01,100,0\n"));
}

#[test]
fn test_export_series_csv_bad_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("forecast.csv");
    assert!(export_series_csv(&path, &quarter()).is_err());
}
