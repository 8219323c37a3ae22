use chrono::NaiveDate;

use super::month::MonthKey;
use super::MonthMap;
use crate::money::Cents;

/// A payment that has (or has not yet) landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidAmount {
    pub paid_date: Option<NaiveDate>,
    pub amount: Cents,
}

/// Paid totals per window month. Every window month is present; unpaid events
/// and payments outside the window are skipped.
pub fn actual_by_month(window: &[MonthKey], payments: &[PaidAmount]) -> MonthMap {
    let mut actual: MonthMap = window.iter().map(|m| (*m, Cents::ZERO)).collect();
    for payment in payments {
        let Some(paid) = payment.paid_date else {
            continue;
        };
        if let Some(bucket) = actual.get_mut(&MonthKey::from_date(paid)) {
            *bucket += payment.amount;
        }
    }
    actual
}
