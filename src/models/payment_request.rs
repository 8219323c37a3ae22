use chrono::NaiveDate;
use serde::Serialize;

use crate::money::Cents;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRequestStatus {
    #[default]
    Open,
    Paid,
    Cancelled,
}

impl PaymentRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "paid" => Some(Self::Paid),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub id: Option<i64>,
    pub client_id: i64,
    pub project_id: Option<i64>,
    pub title: Option<String>,
    #[serde(rename = "amount_cents")]
    pub amount: Cents,
    pub currency: String,
    pub due_date: Option<NaiveDate>,
    pub status: PaymentRequestStatus,
    pub created_at: String,
}

impl PaymentRequest {
    pub fn new(client_id: i64, amount: Cents) -> Self {
        Self {
            id: None,
            client_id,
            project_id: None,
            title: None,
            amount,
            currency: "USD".to_string(),
            due_date: None,
            status: PaymentRequestStatus::Open,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PaymentRequestStatus::Open
    }
}
