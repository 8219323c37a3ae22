use chrono::NaiveDate;
use serde::Serialize;

use crate::forecast::PaidAmount;
use crate::money::Cents;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Issued,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issued => "issued",
            Self::Paid => "paid",
            Self::Void => "void",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "issued" => Some(Self::Issued),
            "paid" => Some(Self::Paid),
            "void" => Some(Self::Void),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub id: Option<i64>,
    pub client_id: i64,
    pub project_id: Option<i64>,
    pub invoice_number: Option<String>,
    #[serde(rename = "amount_cents")]
    pub amount: Cents,
    pub currency: String,
    pub issued_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub created_at: String,
}

impl Invoice {
    pub fn new(client_id: i64, amount: Cents) -> Self {
        Self {
            id: None,
            client_id,
            project_id: None,
            invoice_number: None,
            amount,
            currency: "USD".to_string(),
            issued_date: Some(chrono::Utc::now().date_naive()),
            paid_date: None,
            status: InvoiceStatus::Issued,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Mark as paid on `date`.
    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.status = InvoiceStatus::Paid;
        self.paid_date = Some(date);
        self
    }

    /// The payment event this invoice represents, if it has been paid.
    pub fn paid_amount(&self) -> Option<PaidAmount> {
        match (self.status, self.paid_date) {
            (InvoiceStatus::Paid, Some(date)) => Some(PaidAmount {
                paid_date: Some(date),
                amount: self.amount,
            }),
            _ => None,
        }
    }
}
