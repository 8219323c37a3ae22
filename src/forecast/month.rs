use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MIN_WINDOW_MONTHS: usize = 3;
pub const MAX_WINDOW_MONTHS: usize = 24;
pub const DEFAULT_WINDOW_MONTHS: usize = 12;

/// A UTC calendar month, rendered as `YYYY-MM`.
///
/// Field order makes the derived `Ord` chronological, which for four-digit
/// years is also the lexicographic order of the rendered key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// `month` is 1-based; returns `None` outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(self) -> Option<NaiveDate> {
        self.succ().first_day().and_then(|d| d.pred_opt())
    }

    /// Shift by a signed number of months, rolling over year boundaries.
    pub fn add_months(self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn succ(self) -> Self {
        self.add_months(1)
    }

    /// Short display label, e.g. `Mar 24`.
    pub fn short_label(self) -> String {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let name = NAMES.get(self.month as usize - 1).copied().unwrap_or("???");
        format!("{name} {:02}", self.year.rem_euclid(100))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    /// Accepts `YYYY-MM` or a full `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }
        let (year, month) = trimmed
            .split_once('-')
            .with_context(|| format!("Invalid month '{s}', expected YYYY-MM"))?;
        if year.len() != 4 || month.len() != 2 {
            anyhow::bail!("Invalid month '{s}', expected YYYY-MM");
        }
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in '{s}'"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month number in '{s}'"))?;
        Self::new(year, month).with_context(|| format!("Month out of range in '{s}'"))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Clamp a requested window length to the supported range.
pub fn clamp_window(requested: usize) -> usize {
    requested.clamp(MIN_WINDOW_MONTHS, MAX_WINDOW_MONTHS)
}

/// `count` month keys ending at `reference`'s month (inclusive), oldest first.
pub fn trailing_months(count: usize, reference: NaiveDate) -> Vec<MonthKey> {
    let last = MonthKey::from_date(reference);
    (0..count)
        .rev()
        .map(|back| last.add_months(-(back as i32)))
        .collect()
}

/// Trailing window ending at the current UTC month.
pub fn trailing_months_now(count: usize) -> Vec<MonthKey> {
    trailing_months(count, Utc::now().date_naive())
}

/// Inclusive months from `start`'s month through `end`'s month. An inverted
/// range collapses to the single month containing `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<MonthKey> {
    let first = MonthKey::from_date(start);
    let last = MonthKey::from_date(end);
    if last < first {
        return vec![first];
    }
    let mut out = Vec::new();
    let mut cur = first;
    while cur <= last {
        out.push(cur);
        cur = cur.succ();
    }
    out
}
