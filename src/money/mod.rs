use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Non-negative amount in minor currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Cents(u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Negative values clamp to zero.
    pub fn from_loose(value: i64) -> Self {
        Self(u64::try_from(value).unwrap_or(0))
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, other: Cents) -> Cents {
        Cents(self.0.saturating_add(other.0))
    }

    /// Whole currency units as a decimal, e.g. `12345` -> `123.45`.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), 2)
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        *self = self.saturating_add(rhs);
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Cents>>(iter: I) -> Cents {
        iter.copied().sum()
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loose integer coercion for values read from text columns or user input.
/// Blank, non-numeric and non-finite input yields `fallback`; fractional
/// input is truncated toward zero.
pub fn safe_int(value: &str, fallback: i64) -> i64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return fallback;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => f.trunc() as i64,
        _ => fallback,
    }
}

/// `safe_int` followed by clamping to a non-negative amount.
pub fn coerce_cents(value: &str) -> Cents {
    Cents::from_loose(safe_int(value, 0))
}

/// Parse a user-entered amount in whole currency units ("1,234.56", "$99")
/// into cents.
pub fn parse_money(input: &str) -> Result<Cents> {
    let cleaned = input.trim().replace(['$', ','], "");
    let amount = Decimal::from_str(cleaned.trim())
        .with_context(|| format!("Invalid amount: '{input}'"))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        anyhow::bail!("Amount must not be negative: '{input}'");
    }
    if amount.normalize().scale() > 2 {
        anyhow::bail!("Amount has more than two decimal places: '{input}'");
    }
    let cents = (amount * Decimal::ONE_HUNDRED)
        .to_u64()
        .with_context(|| format!("Amount out of range: '{input}'"))?;
    Ok(Cents::new(cents))
}

/// Whole-unit display, rounded half away from zero: `$1,235` for USD,
/// `€1,235` / `£1,235` for EUR/GBP, `1,235 CHF` for anything else.
pub fn format_money(cents: Cents, currency: &str) -> String {
    let whole = cents
        .to_decimal()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let grouped = group_thousands(&whole.to_string());
    match currency.trim().to_ascii_uppercase().as_str() {
        "" | "USD" => format!("${grouped}"),
        "EUR" => format!("€{grouped}"),
        "GBP" => format!("£{grouped}"),
        other => format!("{grouped} {other}"),
    }
}

/// Two-decimal display with thousand separators, e.g. `$1,234,567.89`.
pub fn format_cents_exact(cents: Cents) -> String {
    let formatted = format!("{:.2}", cents.to_decimal());
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");
    format!("${}.{dec_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests;
