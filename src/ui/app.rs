use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::db::Database;
use crate::forecast::clamp_window;
use crate::metrics::{self, ClientDetail, DashboardMetrics};
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Clients,
    Leads,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Clients, Self::Leads]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Clients => write!(f, "Clients"),
            Self::Leads => write!(f, "Leads"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) visible_rows: usize,
    pub(crate) today: NaiveDate,
    pub(crate) window_months: usize,

    // Dashboard
    pub(crate) dashboard: Option<DashboardMetrics>,

    // Clients
    pub(crate) clients: Vec<Client>,
    pub(crate) client_index: usize,
    pub(crate) client_scroll: usize,
    pub(crate) client_detail: Option<ClientDetail>,

    // Leads
    pub(crate) leads: Vec<Lead>,
    pub(crate) lead_index: usize,
    pub(crate) lead_scroll: usize,
}

impl App {
    pub(crate) fn new(window_months: usize, today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            visible_rows: 20,
            today,
            window_months: clamp_window(window_months),

            dashboard: None,

            clients: Vec::new(),
            client_index: 0,
            client_scroll: 0,
            client_detail: None,

            leads: Vec::new(),
            lead_index: 0,
            lead_scroll: 0,
        }
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_dashboard(db)?;
        self.refresh_clients(db)?;
        self.refresh_leads(db)?;
        Ok(())
    }

    pub(crate) fn refresh_dashboard(&mut self, db: &Database) -> Result<()> {
        self.dashboard = Some(metrics::load_dashboard(db, self.window_months, self.today)?);
        Ok(())
    }

    pub(crate) fn refresh_clients(&mut self, db: &Database) -> Result<()> {
        self.clients = db.get_clients()?;
        if self.client_index >= self.clients.len() {
            self.client_index = self.clients.len().saturating_sub(1);
            self.client_scroll = self.client_scroll.min(self.client_index);
        }
        self.refresh_client_detail(db)
    }

    /// Reload metrics for the client under the cursor.
    pub(crate) fn refresh_client_detail(&mut self, db: &Database) -> Result<()> {
        self.client_detail = match self.selected_client().and_then(|c| c.id) {
            Some(id) => metrics::load_client(db, id, self.today)?,
            None => None,
        };
        Ok(())
    }

    pub(crate) fn refresh_leads(&mut self, db: &Database) -> Result<()> {
        self.leads = db.get_leads()?;
        if self.lead_index >= self.leads.len() {
            self.lead_index = self.leads.len().saturating_sub(1);
            self.lead_scroll = self.lead_scroll.min(self.lead_index);
        }
        Ok(())
    }

    /// Set the dashboard window, clamped to the supported range. Returns
    /// the window actually applied.
    pub(crate) fn set_window(&mut self, months: usize, db: &Database) -> Result<usize> {
        let clamped = clamp_window(months);
        if clamped != self.window_months {
            debug!(from = self.window_months, to = clamped, "dashboard window changed");
            self.window_months = clamped;
            self.refresh_dashboard(db)?;
        }
        Ok(clamped)
    }

    pub(crate) fn selected_client(&self) -> Option<&Client> {
        self.clients.get(self.client_index)
    }

    pub(crate) fn selected_lead(&self) -> Option<&Lead> {
        self.leads.get(self.lead_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
