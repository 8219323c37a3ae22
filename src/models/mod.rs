mod client;
mod invoice;
mod lead;
mod payment_request;
mod project;
mod task;

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

pub use client::Client;
pub use invoice::{Invoice, InvoiceStatus};
pub use lead::{BudgetBracket, Lead, LeadStatus};
pub use payment_request::{PaymentRequest, PaymentRequestStatus};
pub use project::{Project, ProjectStatus};
pub use task::{Subtask, Task, TaskStatus};

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@ \t\r\n]+@[^@ \t\r\n]+\.[^@ \t\r\n]+$").ok());

/// Loose shape check: something@domain.tld, no whitespace.
pub(crate) fn is_plausible_email(email: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

/// Fail with the list of blank fields, e.g. "Missing required fields: name, email".
pub(crate) fn require(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        anyhow::bail!("Missing required fields: {}", missing.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
