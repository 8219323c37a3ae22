use chrono::NaiveDate;
use serde::Serialize;

use crate::forecast::ProjectForForecast;
use crate::money::Cents;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "completed" | "complete" | "done" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn all() -> &'static [ProjectStatus] {
        &[Self::Active, Self::Paused, Self::Completed, Self::Cancelled]
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: Option<i64>,
    pub client_id: i64,
    pub name: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "contract_value_cents")]
    pub contract_value: Cents,
    pub currency: String,
    pub created_at: String,
}

impl Project {
    pub fn new(client_id: i64, name: String, contract_value: Cents) -> Self {
        Self {
            id: None,
            client_id,
            name: name.trim().to_string(),
            status: ProjectStatus::Active,
            start_date: None,
            end_date: None,
            contract_value,
            currency: "USD".to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn for_forecast(&self) -> ProjectForForecast {
        ProjectForForecast {
            start_date: self.start_date,
            end_date: self.end_date,
            contract_value: self.contract_value,
        }
    }
}
