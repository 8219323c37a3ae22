use anyhow::Result;
use serde::Serialize;

use super::{is_plausible_email, require};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: Option<i64>,
    pub name: String,
    pub company: String,
    pub email: String,
    pub created_at: String,
}

impl Client {
    pub fn new(name: String, company: String, email: String) -> Self {
        Self {
            id: None,
            name: name.trim().to_string(),
            company: company.trim().to_string(),
            email: email.trim().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(&[
            ("name", self.name.as_str()),
            ("company", self.company.as_str()),
            ("email", self.email.as_str()),
        ])?;
        if !is_plausible_email(&self.email) {
            anyhow::bail!("Invalid email address: {}", self.email);
        }
        Ok(())
    }
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.company)
    }
}
