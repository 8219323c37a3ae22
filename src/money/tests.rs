#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── Cents ─────────────────────────────────────────────────────

#[test]
fn test_from_loose_clamps_negative() {
    assert_eq!(Cents::from_loose(-500), Cents::ZERO);
    assert_eq!(Cents::from_loose(0), Cents::ZERO);
    assert_eq!(Cents::from_loose(1299), Cents::new(1299));
}

#[test]
fn test_cents_sum() {
    let total: Cents = [Cents::new(100), Cents::new(250), Cents::ZERO]
        .iter()
        .sum();
    assert_eq!(total, Cents::new(350));
}

#[test]
fn test_cents_add_saturates() {
    assert_eq!(Cents::new(u64::MAX) + Cents::new(1), Cents::new(u64::MAX));
}

#[test]
fn test_cents_to_decimal() {
    assert_eq!(Cents::new(12345).to_decimal(), dec!(123.45));
    assert_eq!(Cents::ZERO.to_decimal(), dec!(0.00));
}

#[test]
fn test_cents_serializes_as_number() {
    assert_eq!(serde_json::to_string(&Cents::new(42)).unwrap(), "42");
}

// ── safe_int / coerce_cents ───────────────────────────────────

#[test]
fn test_safe_int_integer_text() {
    assert_eq!(safe_int("1200", 0), 1200);
    assert_eq!(safe_int("  -7 ", 0), -7);
}

#[test]
fn test_safe_int_fractional_truncates() {
    assert_eq!(safe_int("99.9", 0), 99);
    assert_eq!(safe_int("-1.5", 0), -1);
}

#[test]
fn test_safe_int_garbage_uses_fallback() {
    assert_eq!(safe_int("", 5), 5);
    assert_eq!(safe_int("   ", 5), 5);
    assert_eq!(safe_int("abc", 5), 5);
    assert_eq!(safe_int("NaN", 5), 5);
    assert_eq!(safe_int("inf", 5), 5);
}

#[test]
fn test_coerce_cents_never_negative() {
    assert_eq!(coerce_cents("-300"), Cents::ZERO);
    assert_eq!(coerce_cents("not a number"), Cents::ZERO);
    assert_eq!(coerce_cents("4500"), Cents::new(4500));
}

// ── parse_money ───────────────────────────────────────────────

#[test]
fn test_parse_money_plain() {
    assert_eq!(parse_money("12.34").unwrap(), Cents::new(1234));
    assert_eq!(parse_money("99").unwrap(), Cents::new(9900));
}

#[test]
fn test_parse_money_symbols_and_commas() {
    assert_eq!(parse_money("$1,234.56").unwrap(), Cents::new(123456));
    assert_eq!(parse_money(" $0.01 ").unwrap(), Cents::new(1));
}

#[test]
fn test_parse_money_trailing_zeros_ok() {
    assert_eq!(parse_money("10.500").unwrap(), Cents::new(1050));
}

#[test]
fn test_parse_money_rejects_negative() {
    assert!(parse_money("-5").is_err());
}

#[test]
fn test_parse_money_rejects_sub_cent() {
    assert!(parse_money("1.001").is_err());
}

#[test]
fn test_parse_money_rejects_garbage() {
    assert!(parse_money("twelve").is_err());
    assert!(parse_money("").is_err());
}

// ── Formatting ────────────────────────────────────────────────

#[test]
fn test_format_money_usd_whole_units() {
    assert_eq!(format_money(Cents::new(123_456), "USD"), "$1,235");
    assert_eq!(format_money(Cents::new(0), "USD"), "$0");
    assert_eq!(format_money(Cents::new(50), "usd"), "$1");
    assert_eq!(format_money(Cents::new(49), "USD"), "$0");
}

#[test]
fn test_format_money_other_currencies() {
    assert_eq!(format_money(Cents::new(100_000_000), "EUR"), "€1,000,000");
    assert_eq!(format_money(Cents::new(250_00), "GBP"), "£250");
    assert_eq!(format_money(Cents::new(1_000_00), "chf"), "1,000 CHF");
}

#[test]
fn test_format_money_blank_currency_defaults_to_usd() {
    assert_eq!(format_money(Cents::new(700), ""), "$7");
}

#[test]
fn test_format_cents_exact() {
    assert_eq!(format_cents_exact(Cents::new(123_456_789)), "$1,234,567.89");
    assert_eq!(format_cents_exact(Cents::new(5)), "$0.05");
    assert_eq!(format_cents_exact(Cents::ZERO), "$0.00");
}
