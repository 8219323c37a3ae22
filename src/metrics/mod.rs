//! Dashboard and per-client figures. The `build_*` functions are pure over
//! fetched records; `load_*` do the fetching.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::db::Database;
use crate::forecast::{
    actual_trendline, clamp_window, forecast, trailing_months, ForecastPoint, MonthKey, PaidAmount,
    ProjectForForecast, DEFAULT_WINDOW_MONTHS,
};
use crate::models::{Client, Invoice, PaymentRequest, Project, Subtask, Task};
use crate::money::Cents;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct PaidTotals {
    pub(crate) paid_30d_cents: Cents,
    pub(crate) paid_90d_cents: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DashboardMetrics {
    pub(crate) series: Vec<ForecastPoint>,
    pub(crate) trendline: Vec<f64>,
    pub(crate) open_payment_requests_count: usize,
    pub(crate) open_payment_requests_cents: Cents,
    pub(crate) totals: PaidTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ClientMetrics {
    pub(crate) total_value_cents: Cents,
    pub(crate) open_payment_requests_count: usize,
    pub(crate) open_payment_requests_cents: Cents,
    pub(crate) series: Vec<ForecastPoint>,
}

/// A client with everything the detail views show.
#[derive(Debug, Clone)]
pub(crate) struct ClientDetail {
    pub(crate) client: Client,
    pub(crate) projects: Vec<Project>,
    pub(crate) tasks: Vec<Task>,
    pub(crate) subtasks: Vec<Subtask>,
    pub(crate) invoices: Vec<Invoice>,
    pub(crate) payment_requests: Vec<PaymentRequest>,
    pub(crate) metrics: ClientMetrics,
}

impl ClientDetail {
    /// Tasks of one project, in stored order.
    pub(crate) fn tasks_for(&self, project_id: Option<i64>) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |t| Some(t.project_id) == project_id)
    }

    pub(crate) fn subtasks_for(&self, task_id: Option<i64>) -> impl Iterator<Item = &Subtask> {
        self.subtasks
            .iter()
            .filter(move |s| Some(s.task_id) == task_id)
    }
}

/// Sum of payments made at most `days` days before `today`. Dates after
/// `today` count as recent.
pub(crate) fn paid_within_days(payments: &[PaidAmount], today: NaiveDate, days: i64) -> Cents {
    payments
        .iter()
        .filter_map(|p| p.paid_date.map(|d| (d, p.amount)))
        .filter(|(d, _)| (today - *d).num_days() <= days)
        .map(|(_, amount)| amount)
        .sum()
}

fn open_requests(requests: &[PaymentRequest]) -> (usize, Cents) {
    let open: Vec<&PaymentRequest> = requests.iter().filter(|r| r.is_open()).collect();
    (open.len(), open.iter().map(|r| r.amount).sum())
}

fn forecast_inputs(projects: &[Project], invoices: &[Invoice]) -> (Vec<ProjectForForecast>, Vec<PaidAmount>) {
    (
        projects.iter().map(Project::for_forecast).collect(),
        invoices.iter().filter_map(Invoice::paid_amount).collect(),
    )
}

pub(crate) fn build_dashboard(
    window: &[MonthKey],
    projects: &[Project],
    invoices: &[Invoice],
    requests: &[PaymentRequest],
    today: NaiveDate,
) -> DashboardMetrics {
    let (projects, payments) = forecast_inputs(projects, invoices);
    let series = forecast(window, &projects, &payments);
    let trendline = actual_trendline(&series);
    let (open_count, open_cents) = open_requests(requests);

    DashboardMetrics {
        series,
        trendline,
        open_payment_requests_count: open_count,
        open_payment_requests_cents: open_cents,
        totals: PaidTotals {
            paid_30d_cents: paid_within_days(&payments, today, 30),
            paid_90d_cents: paid_within_days(&payments, today, 90),
        },
    }
}

pub(crate) fn build_client_metrics(
    window: &[MonthKey],
    projects: &[Project],
    invoices: &[Invoice],
    requests: &[PaymentRequest],
) -> ClientMetrics {
    let (forecast_projects, payments) = forecast_inputs(projects, invoices);
    let (open_count, open_cents) = open_requests(requests);

    ClientMetrics {
        total_value_cents: projects.iter().map(|p| p.contract_value).sum(),
        open_payment_requests_count: open_count,
        open_payment_requests_cents: open_cents,
        series: forecast(window, &forecast_projects, &payments),
    }
}

/// Dashboard over a trailing window of `months` (clamped 3–24) ending at `today`.
pub(crate) fn load_dashboard(db: &Database, months: usize, today: NaiveDate) -> Result<DashboardMetrics> {
    let window = trailing_months(clamp_window(months), today);
    let projects = db.get_projects().context("Failed to load projects")?;
    let invoices = db.get_paid_invoices().context("Failed to load paid invoices")?;
    let requests = db
        .get_open_payment_requests()
        .context("Failed to load open payment requests")?;
    debug!(
        months = window.len(),
        projects = projects.len(),
        invoices = invoices.len(),
        requests = requests.len(),
        "computing dashboard metrics"
    );
    Ok(build_dashboard(&window, &projects, &invoices, &requests, today))
}

/// `None` when the client does not exist.
pub(crate) fn load_client(db: &Database, client_id: i64, today: NaiveDate) -> Result<Option<ClientDetail>> {
    let Some(client) = db.get_client_by_id(client_id)? else {
        return Ok(None);
    };
    let projects = db.get_projects_by_client(client_id)?;
    let project_ids: Vec<i64> = projects.iter().filter_map(|p| p.id).collect();
    let tasks = db.get_tasks_by_projects(&project_ids)?;
    let task_ids: Vec<i64> = tasks.iter().filter_map(|t| t.id).collect();
    let subtasks = db.get_subtasks_by_tasks(&task_ids)?;
    let invoices = db.get_invoices_by_client(client_id)?;
    let payment_requests = db.get_payment_requests_by_client(client_id)?;

    let window = trailing_months(DEFAULT_WINDOW_MONTHS, today);
    let metrics = build_client_metrics(&window, &projects, &invoices, &payment_requests);
    debug!(
        client_id,
        projects = projects.len(),
        tasks = tasks.len(),
        "computed client metrics"
    );

    Ok(Some(ClientDetail {
        client,
        projects,
        tasks,
        subtasks,
        invoices,
        payment_requests,
        metrics,
    }))
}
