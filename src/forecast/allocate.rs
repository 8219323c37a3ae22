use chrono::NaiveDate;

use super::month::{months_between, MonthKey};
use super::MonthMap;
use crate::money::Cents;

/// A project as the allocator sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForForecast {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub contract_value: Cents,
}

/// Split `total` evenly over `months` buckets with no loss to integer
/// division. The first `total % months` buckets carry one extra unit.
/// A zero month count is treated as one.
pub fn allocate(total: Cents, months: usize) -> Vec<Cents> {
    let count = months.max(1) as u64;
    let base = total.get() / count;
    let remainder = total.get() % count;
    (0..count)
        .map(|i| Cents::new(base + u64::from(i < remainder)))
        .collect()
}

/// Expected value per window month.
///
/// Each project's contract value is split over its full span. Months outside
/// `window` are skipped before any remainder unit is handed out, so the
/// extra units land on the earliest months that are actually shown.
pub fn expected_by_month(window: &[MonthKey], projects: &[ProjectForForecast]) -> MonthMap {
    let mut expected: MonthMap = window.iter().map(|m| (*m, Cents::ZERO)).collect();
    let Some(first) = window.first().and_then(|m| m.first_day()) else {
        return expected;
    };

    for project in projects {
        let start = project.start_date.unwrap_or(first);
        let end = project.end_date.unwrap_or(start);
        let span = months_between(start, end);
        // Shares come back largest first; hand them to in-window months in order.
        let shares = allocate(project.contract_value, span.len());
        let visible: Vec<MonthKey> = span
            .into_iter()
            .filter(|m| expected.contains_key(m))
            .collect();

        for (month, share) in visible.iter().zip(shares) {
            if let Some(bucket) = expected.get_mut(month) {
                *bucket += share;
            }
        }
    }

    expected
}
