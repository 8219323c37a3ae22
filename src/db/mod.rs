mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::Path;
use tracing::{debug, info};

use crate::models::*;
use crate::money::{coerce_cents, safe_int, Cents};

pub(crate) struct Database {
    conn: Connection,
}

/// Schema version plus row counts per table.
#[derive(Debug, Clone)]
pub(crate) struct StoreHealth {
    pub(crate) schema_version: i32,
    pub(crate) table_counts: Vec<(&'static str, i64)>,
}

const CLIENT_COLUMNS: &str = "id, name, company, email, created_at";
const PROJECT_COLUMNS: &str =
    "id, client_id, name, status, start_date, end_date, contract_value_cents, currency, created_at";
const INVOICE_COLUMNS: &str = "id, client_id, project_id, invoice_number, amount_cents, currency, issued_date, paid_date, status, created_at";
const PAYMENT_REQUEST_COLUMNS: &str =
    "id, client_id, project_id, title, amount_cents, currency, due_date, status, created_at";
const TASK_COLUMNS: &str = "id, project_id, title, status, sort_order, created_at";
const SUBTASK_COLUMNS: &str = "id, task_id, title, status, sort_order, created_at";
const LEAD_COLUMNS: &str =
    "id, name, company, email, budget_bracket, status, pain_point, created_at";

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        info!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        // A fresh database starts at v1 and walks the migrations like any other.
        let current = if has_version_table {
            self.schema_version().unwrap_or(0)
        } else {
            info!("creating schema");
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn
                .execute("INSERT INTO schema_version (version) VALUES (1)", [])?;
            1
        };

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                info!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    // ── Clients ───────────────────────────────────────────────

    pub(crate) fn insert_client(&self, client: &Client) -> Result<i64> {
        client.validate()?;
        self.conn.execute(
            "INSERT INTO clients (name, company, email, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![client.name, client.company, client.email, client.created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name = %client.name, "client inserted");
        Ok(id)
    }

    /// All clients, newest first.
    pub(crate) fn get_clients(&self) -> Result<Vec<Client>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], client_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_client_by_id(&self, id: i64) -> Result<Option<Client>> {
        let result = self.conn.query_row(
            &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"),
            params![id],
            client_from_row,
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ── Projects ──────────────────────────────────────────────

    pub(crate) fn insert_project(&self, project: &Project) -> Result<i64> {
        if project.name.trim().is_empty() {
            anyhow::bail!("Missing required fields: name");
        }
        self.conn
            .execute(
                "INSERT INTO projects (client_id, name, status, start_date, end_date, contract_value_cents, currency, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    project.client_id,
                    project.name,
                    project.status.as_str(),
                    date_to_sql(project.start_date),
                    date_to_sql(project.end_date),
                    cents_to_sql(project.contract_value),
                    project.currency,
                    project.created_at,
                ],
            )
            .with_context(|| format!("Failed to insert project for client {}", project.client_id))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, client_id = project.client_id, "project inserted");
        Ok(id)
    }

    pub(crate) fn get_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], project_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_projects_by_client(&self, client_id: i64) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE client_id = ?1 ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![client_id], project_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Tasks ─────────────────────────────────────────────────

    pub(crate) fn insert_task(&self, task: &Task) -> Result<i64> {
        if task.title.trim().is_empty() {
            anyhow::bail!("Missing required fields: title");
        }
        self.conn
            .execute(
                "INSERT INTO tasks (project_id, title, status, sort_order, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    task.project_id,
                    task.title,
                    task.status.as_str(),
                    task.sort_order,
                    task.created_at,
                ],
            )
            .with_context(|| format!("Failed to insert task for project {}", task.project_id))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, project_id = task.project_id, "task inserted");
        Ok(id)
    }

    pub(crate) fn insert_subtask(&self, subtask: &Subtask) -> Result<i64> {
        if subtask.title.trim().is_empty() {
            anyhow::bail!("Missing required fields: title");
        }
        self.conn
            .execute(
                "INSERT INTO subtasks (task_id, title, status, sort_order, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    subtask.task_id,
                    subtask.title,
                    subtask.status.as_str(),
                    subtask.sort_order,
                    subtask.created_at,
                ],
            )
            .with_context(|| format!("Failed to insert subtask for task {}", subtask.task_id))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, task_id = subtask.task_id, "subtask inserted");
        Ok(id)
    }

    /// Tasks of the given projects, by `sort_order` then insertion order.
    pub(crate) fn get_tasks_by_projects(&self, project_ids: &[i64]) -> Result<Vec<Task>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id IN ({}) ORDER BY id",
            placeholders(project_ids.len())
        ))?;
        let rows = stmt.query_map(params_from_iter(project_ids), task_from_row)?;
        let mut tasks = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        tasks.sort_by_key(|t| t.sort_order);
        Ok(tasks)
    }

    /// Subtasks of the given tasks, by `sort_order` then insertion order.
    pub(crate) fn get_subtasks_by_tasks(&self, task_ids: &[i64]) -> Result<Vec<Subtask>> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SUBTASK_COLUMNS} FROM subtasks WHERE task_id IN ({}) ORDER BY id",
            placeholders(task_ids.len())
        ))?;
        let rows = stmt.query_map(params_from_iter(task_ids), subtask_from_row)?;
        let mut subtasks = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        subtasks.sort_by_key(|s| s.sort_order);
        Ok(subtasks)
    }

    // ── Invoices ──────────────────────────────────────────────

    pub(crate) fn insert_invoice(&self, invoice: &Invoice) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO invoices (client_id, project_id, invoice_number, amount_cents, currency, issued_date, paid_date, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    invoice.client_id,
                    invoice.project_id,
                    invoice.invoice_number,
                    cents_to_sql(invoice.amount),
                    invoice.currency,
                    date_to_sql(invoice.issued_date),
                    date_to_sql(invoice.paid_date),
                    invoice.status.as_str(),
                    invoice.created_at,
                ],
            )
            .with_context(|| format!("Failed to insert invoice for client {}", invoice.client_id))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, client_id = invoice.client_id, status = %invoice.status, "invoice inserted");
        Ok(id)
    }

    pub(crate) fn get_invoices_by_client(&self, client_id: i64) -> Result<Vec<Invoice>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE client_id = ?1 ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![client_id], invoice_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Invoices with status `paid` and a recorded paid date.
    pub(crate) fn get_paid_invoices(&self) -> Result<Vec<Invoice>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices
             WHERE status = 'paid' AND paid_date IS NOT NULL
             ORDER BY paid_date DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], invoice_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Returns false when no invoice has that id.
    pub(crate) fn mark_invoice_paid(&self, id: i64, paid_date: NaiveDate) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE invoices SET status = 'paid', paid_date = ?1 WHERE id = ?2",
            params![date_to_sql(Some(paid_date)), id],
        )?;
        Ok(changed > 0)
    }

    // ── Payment requests ──────────────────────────────────────

    pub(crate) fn insert_payment_request(&self, request: &PaymentRequest) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO payment_requests (client_id, project_id, title, amount_cents, currency, due_date, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    request.client_id,
                    request.project_id,
                    request.title,
                    cents_to_sql(request.amount),
                    request.currency,
                    date_to_sql(request.due_date),
                    request.status.as_str(),
                    request.created_at,
                ],
            )
            .with_context(|| {
                format!("Failed to insert payment request for client {}", request.client_id)
            })?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_payment_requests_by_client(
        &self,
        client_id: i64,
    ) -> Result<Vec<PaymentRequest>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PAYMENT_REQUEST_COLUMNS} FROM payment_requests WHERE client_id = ?1 ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![client_id], payment_request_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_open_payment_requests(&self) -> Result<Vec<PaymentRequest>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PAYMENT_REQUEST_COLUMNS} FROM payment_requests WHERE status = 'open' ORDER BY due_date, id"
        ))?;
        let rows = stmt.query_map([], payment_request_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Leads ─────────────────────────────────────────────────

    pub(crate) fn insert_lead(&self, lead: &Lead) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO leads (name, company, email, budget_bracket, status, pain_point, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                lead.name,
                lead.company,
                lead.email,
                lead.budget_bracket.as_str(),
                lead.status.as_str(),
                lead.pain_point,
                lead.created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, company = %lead.company, "lead inserted");
        Ok(id)
    }

    /// All leads, newest first.
    pub(crate) fn get_leads(&self) -> Result<Vec<Lead>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], lead_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Returns false when no lead has that id.
    pub(crate) fn update_lead_status(&self, id: i64, status: LeadStatus) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE leads SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        Ok(changed > 0)
    }

    // ── Health ────────────────────────────────────────────────

    pub(crate) fn health(&self) -> Result<StoreHealth> {
        let schema_version = self.schema_version().context("Failed to read schema version")?;
        let mut table_counts = Vec::with_capacity(schema::TABLES.len());
        for &table in schema::TABLES {
            let count: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .with_context(|| format!("Failed to count rows in {table}"))?;
            table_counts.push((table, count));
        }
        Ok(StoreHealth {
            schema_version,
            table_counts,
        })
    }
}

/// True when the error chain contains SQLite's "no such table", which means
/// the database predates the current schema.
pub(crate) fn is_missing_table(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<rusqlite::Error>(),
            Some(rusqlite::Error::SqliteFailure(_, Some(msg))) if msg.contains("no such table")
        )
    })
}

// ── Row mapping ───────────────────────────────────────────────

fn date_to_sql(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Unparseable dates read back as missing.
fn date_from_sql(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

fn cents_to_sql(cents: Cents) -> i64 {
    i64::try_from(cents.get()).unwrap_or(i64::MAX)
}

/// SQLite columns are loosely typed: amounts may come back as integers,
/// reals or text. Anything unusable reads as zero.
fn cents_from_sql(value: Value) -> Cents {
    match value {
        Value::Integer(n) => Cents::from_loose(n),
        Value::Real(f) if f.is_finite() => Cents::from_loose(f.trunc() as i64),
        Value::Text(text) => coerce_cents(&text),
        _ => Cents::ZERO,
    }
}

/// `?1, ?2, ...` for an `IN (...)` list.
fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordering keys get the same loose reading as amounts, but may be negative.
fn int_from_sql(value: Value) -> i64 {
    match value {
        Value::Integer(n) => n,
        Value::Real(f) if f.is_finite() => f.trunc() as i64,
        Value::Text(text) => safe_int(&text, 0),
        _ => 0,
    }
}

fn client_from_row(row: &Row) -> rusqlite::Result<Client> {
    Ok(Client {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        company: row.get(2)?,
        email: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn project_from_row(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Some(row.get(0)?),
        client_id: row.get(1)?,
        name: row.get(2)?,
        status: ProjectStatus::parse(&row.get::<_, String>(3)?).unwrap_or_default(),
        start_date: date_from_sql(row.get(4)?),
        end_date: date_from_sql(row.get(5)?),
        contract_value: cents_from_sql(row.get(6)?),
        currency: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: Some(row.get(0)?),
        project_id: row.get(1)?,
        title: row.get(2)?,
        status: TaskStatus::parse(&row.get::<_, String>(3)?).unwrap_or_default(),
        sort_order: int_from_sql(row.get(4)?),
        created_at: row.get(5)?,
    })
}

fn subtask_from_row(row: &Row) -> rusqlite::Result<Subtask> {
    Ok(Subtask {
        id: Some(row.get(0)?),
        task_id: row.get(1)?,
        title: row.get(2)?,
        status: TaskStatus::parse(&row.get::<_, String>(3)?).unwrap_or_default(),
        sort_order: int_from_sql(row.get(4)?),
        created_at: row.get(5)?,
    })
}

fn invoice_from_row(row: &Row) -> rusqlite::Result<Invoice> {
    Ok(Invoice {
        id: Some(row.get(0)?),
        client_id: row.get(1)?,
        project_id: row.get(2)?,
        invoice_number: row.get(3)?,
        amount: cents_from_sql(row.get(4)?),
        currency: row.get(5)?,
        issued_date: date_from_sql(row.get(6)?),
        paid_date: date_from_sql(row.get(7)?),
        status: InvoiceStatus::parse(&row.get::<_, String>(8)?).unwrap_or_default(),
        created_at: row.get(9)?,
    })
}

fn payment_request_from_row(row: &Row) -> rusqlite::Result<PaymentRequest> {
    Ok(PaymentRequest {
        id: Some(row.get(0)?),
        client_id: row.get(1)?,
        project_id: row.get(2)?,
        title: row.get(3)?,
        amount: cents_from_sql(row.get(4)?),
        currency: row.get(5)?,
        due_date: date_from_sql(row.get(6)?),
        status: PaymentRequestStatus::parse(&row.get::<_, String>(7)?).unwrap_or_default(),
        created_at: row.get(8)?,
    })
}

fn lead_from_row(row: &Row) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        company: row.get(2)?,
        email: row.get(3)?,
        budget_bracket: BudgetBracket::parse(&row.get::<_, String>(4)?)
            .unwrap_or(BudgetBracket::Low),
        status: LeadStatus::parse(&row.get::<_, String>(5)?).unwrap_or_default(),
        pain_point: row.get(6)?,
        created_at: row.get(7)?,
    })
}
