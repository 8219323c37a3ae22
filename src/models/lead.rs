use anyhow::Result;

use super::{is_plausible_email, require};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBracket {
    Low,
    Mid,
    High,
}

impl BudgetBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mid => "Mid",
            Self::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "mid" | "medium" => Some(Self::Mid),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for BudgetBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Won,
    Lost,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(Self::New),
            "contacted" => Some(Self::Contacted),
            "won" => Some(Self::Won),
            "lost" => Some(Self::Lost),
            _ => None,
        }
    }

    pub fn all() -> &'static [LeadStatus] {
        &[Self::New, Self::Contacted, Self::Won, Self::Lost]
    }

    /// Closed leads no longer need follow-up.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: Option<i64>,
    pub name: String,
    pub company: String,
    pub email: String,
    pub budget_bracket: BudgetBracket,
    pub status: LeadStatus,
    pub pain_point: String,
    pub created_at: String,
}

impl Lead {
    /// Build a lead from raw form input, rejecting missing fields and values
    /// outside the bracket/status vocabularies.
    pub fn from_input(
        name: &str,
        company: &str,
        email: &str,
        budget_bracket: &str,
        status: &str,
        pain_point: &str,
    ) -> Result<Self> {
        require(&[
            ("name", name),
            ("company", company),
            ("email", email),
            ("budget_bracket", budget_bracket),
            ("status", status),
        ])?;
        let budget_bracket = BudgetBracket::parse(budget_bracket)
            .ok_or_else(|| anyhow::anyhow!("budget_bracket must be one of: Low, Mid, High"))?;
        let status = LeadStatus::parse(status).ok_or_else(|| {
            anyhow::anyhow!("status must be one of: New, Contacted, Won, Lost")
        })?;
        if !is_plausible_email(email) {
            anyhow::bail!("Invalid email address: {}", email.trim());
        }

        Ok(Self {
            id: None,
            name: name.trim().to_string(),
            company: company.trim().to_string(),
            email: email.trim().to_string(),
            budget_bracket,
            status,
            pain_point: pain_point.trim().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
