use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::forecast::ForecastPoint;

const HEADER: [&str; 3] = ["ym", "expected_cents", "actual_cents"];

/// Write the series as CSV with a header row. Returns the number of data rows.
pub(crate) fn write_series<W: Write>(writer: W, points: &[ForecastPoint]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for point in points {
        wtr.write_record([
            point.ym.to_string(),
            point.expected_cents.to_string(),
            point.actual_cents.to_string(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(points.len())
}

pub(crate) fn export_series_csv(path: &Path, points: &[ForecastPoint]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_series(file, points).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests;
