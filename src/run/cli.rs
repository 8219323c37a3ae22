use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::{self, Database};
use crate::forecast::{trailing_months_now, ForecastPoint, MonthKey};
use crate::metrics;
use crate::models::*;
use crate::money::{format_cents_exact, format_money, parse_money, safe_int};

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &[
    "--months", "--start", "--end", "--status", "--currency", "--project", "--paid", "--issued",
    "--number", "--due", "--title", "--pain", "--date", "--through", "--order",
];

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let rest = &args[2.min(args.len())..];
    let result = match args.get(1).map(String::as_str).unwrap_or("help") {
        "dashboard" | "d" => cli_dashboard(rest, db, config),
        "client" => cli_client(rest, db),
        "clients" => cli_clients(db),
        "add-client" => cli_add_client(rest, db),
        "add-project" => cli_add_project(rest, db),
        "add-task" => cli_add_task(rest, db),
        "add-subtask" => cli_add_subtask(rest, db),
        "add-invoice" => cli_add_invoice(rest, db),
        "mark-paid" => cli_mark_paid(rest, db),
        "add-request" => cli_add_request(rest, db),
        "leads" => cli_leads(db),
        "add-lead" => cli_add_lead(rest, db),
        "lead-status" => cli_lead_status(rest, db),
        "export" => cli_export(rest, db, config),
        "health" => cli_health(db, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("scout-admin {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    };

    result.map_err(|e| {
        if db::is_missing_table(&e) {
            e.context(format!(
                "Database schema is incomplete. Restore a backup or remove {} to recreate it",
                config.db_path.display()
            ))
        } else {
            e
        }
    })
}

fn print_usage() {
    println!("Scout Admin - clients, billing and revenue forecast");
    println!();
    println!("Usage: scout-admin [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                   Launch interactive TUI");
    println!("  dashboard [--months N] [--json]          Expected vs actual revenue");
    println!("    --through <YYYY-MM>                    End the window at that month");
    println!("  client <id> [--json]                     Client detail and metrics");
    println!("  clients                                  List clients");
    println!("  add-client <name> <company> <email>      Create a client");
    println!("  add-project <client-id> <name> <amount>  Create a project");
    println!("    --start <YYYY-MM-DD> --end <YYYY-MM-DD> --status <s> --currency <c>");
    println!("  add-task <project-id> <title>            Add a task to a project");
    println!("  add-subtask <task-id> <title>            Add a subtask to a task");
    println!("    --status <todo|in_progress|done|blocked> --order <n>");
    println!("  add-invoice <client-id> <amount>         Record an invoice");
    println!("    --project <id> --number <n> --issued <date> --paid <date>");
    println!("  mark-paid <invoice-id> [--date <date>]   Mark an invoice paid (default today)");
    println!("  add-request <client-id> <amount>         Open a payment request");
    println!("    --project <id> --title <t> --due <date>");
    println!("  leads                                    List leads");
    println!("  add-lead <name> <company> <email> <Low|Mid|High>");
    println!("    --status <New|Contacted|Won|Lost> --pain <text>");
    println!("  lead-status <lead-id> <status>           Update a lead's status");
    println!("  export <file.csv> [--months N] [--through YYYY-MM]");
    println!("                                           Export the forecast series");
    println!("  health                                   Database status");
    println!("  --help, -h                               Show this help");
    println!("  --version, -V                            Show version");
}

// ── Argument helpers ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Arguments that are neither flags nor flag values.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_id(value: &str, what: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {what} id: '{value}'"))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{value}', expected YYYY-MM-DD"))
}

fn optional_date(args: &[String], flag: &str) -> Result<Option<NaiveDate>> {
    flag_value(args, flag).map(parse_date).transpose()
}

/// Unparseable values fall back to `default`; the caller clamps.
fn months_flag(args: &[String], default: usize) -> usize {
    flag_value(args, "--months")
        .map(|v| safe_int(v, default as i64).max(0) as usize)
        .unwrap_or(default)
}

/// Reference date for windowed reports: the last day of `--through YYYY-MM`
/// when given, otherwise today.
fn reference_date(args: &[String]) -> Result<NaiveDate> {
    let Some(value) = flag_value(args, "--through") else {
        return Ok(today());
    };
    let month: MonthKey = value.parse()?;
    month
        .last_day()
        .ok_or_else(|| anyhow::anyhow!("Month out of range: {value}"))
}

fn join_all<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn require_client(db: &Database, client_id: i64) -> Result<Client> {
    db.get_client_by_id(client_id)?
        .ok_or_else(|| anyhow::anyhow!("Client not found: {client_id}"))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ── Reports ──────────────────────────────────────────────────

fn cli_dashboard(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let months = months_flag(args, config.window_months);
    let m = metrics::load_dashboard(db, months, reference_date(args)?)?;

    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string_pretty(&m)?);
        return Ok(());
    }

    println!("Scout Admin - revenue, last {} months", m.series.len());
    println!("{}", "─".repeat(44));
    print_series(&m.series);
    let average = m.trendline.first().copied().unwrap_or(0.0);
    println!();
    println!("  Average actual:        {}", format_f64_cents(average));
    println!(
        "  Open payment requests: {} ({})",
        m.open_payment_requests_count,
        format_money(m.open_payment_requests_cents, "USD")
    );
    println!("  Paid last 30 days:     {}", format_money(m.totals.paid_30d_cents, "USD"));
    println!("  Paid last 90 days:     {}", format_money(m.totals.paid_90d_cents, "USD"));
    Ok(())
}

fn print_series(series: &[ForecastPoint]) {
    println!("  {:<10} {:>14} {:>14}", "Month", "Expected", "Actual");
    for point in series {
        println!(
            "  {:<10} {:>14} {:>14}",
            point.ym.to_string(),
            format_money(point.expected_cents, "USD"),
            format_money(point.actual_cents, "USD"),
        );
    }
}

fn format_f64_cents(value: f64) -> String {
    let rounded = if value.is_finite() { value.round().max(0.0) } else { 0.0 };
    format_money(crate::money::Cents::new(rounded as u64), "USD")
}

fn cli_client(args: &[String], db: &mut Database) -> Result<()> {
    let id = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: scout-admin client <id> [--json]"))?;
    let id = parse_id(id, "client")?;
    let detail = metrics::load_client(db, id, today())?
        .ok_or_else(|| anyhow::anyhow!("Client not found: {id}"))?;

    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string_pretty(&client_json(&detail))?);
        return Ok(());
    }

    let c = &detail.client;
    println!("{} - {} <{}>", c.name, c.company, c.email);
    println!("{}", "─".repeat(44));
    println!(
        "  Total contract value:  {}",
        format_money(detail.metrics.total_value_cents, "USD")
    );
    println!(
        "  Open payment requests: {} ({})",
        detail.metrics.open_payment_requests_count,
        format_money(detail.metrics.open_payment_requests_cents, "USD")
    );

    if !detail.projects.is_empty() {
        println!();
        println!("Projects:");
        for p in &detail.projects {
            println!(
                "  #{:<4} {:<24} {:<10} {} to {}  {}",
                p.id.unwrap_or(0),
                p.name,
                p.status.as_str(),
                display_date(p.start_date),
                display_date(p.end_date),
                format_money(p.contract_value, &p.currency),
            );
            for t in detail.tasks_for(p.id) {
                println!("        [{}] {}", t.status.as_str(), t.title);
                for st in detail.subtasks_for(t.id) {
                    println!("          - [{}] {}", st.status.as_str(), st.title);
                }
            }
        }
    }

    if !detail.invoices.is_empty() {
        println!();
        println!("Invoices:");
        for inv in &detail.invoices {
            println!(
                "  #{:<4} {:<10} {:<8} paid {}  {}",
                inv.id.unwrap_or(0),
                inv.invoice_number.as_deref().unwrap_or("-"),
                inv.status.as_str(),
                display_date(inv.paid_date),
                format_cents_exact(inv.amount),
            );
        }
    }

    let open: Vec<&PaymentRequest> = detail
        .payment_requests
        .iter()
        .filter(|r| r.is_open())
        .collect();
    if !open.is_empty() {
        println!();
        println!("Open payment requests:");
        for r in open {
            println!(
                "  #{:<4} {:<24} due {}  {}",
                r.id.unwrap_or(0),
                r.title.as_deref().unwrap_or("-"),
                display_date(r.due_date),
                format_cents_exact(r.amount),
            );
        }
    }

    println!();
    println!("Last {} months:", detail.metrics.series.len());
    print_series(&detail.metrics.series);
    Ok(())
}

/// Client detail document: the record, its projects and work items, billing,
/// and the forecast metrics.
fn client_json(detail: &metrics::ClientDetail) -> serde_json::Value {
    serde_json::json!({
        "client": detail.client,
        "projects": detail.projects,
        "tasks": detail.tasks,
        "subtasks": detail.subtasks,
        "billing": {
            "invoices": detail.invoices,
            "payment_requests": detail.payment_requests,
        },
        "metrics": detail.metrics,
    })
}

fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into())
}

fn cli_clients(db: &mut Database) -> Result<()> {
    let clients = db.get_clients()?;
    if clients.is_empty() {
        println!("No clients");
        return Ok(());
    }

    println!("{:<4} {:<20} {:<20} Email", "ID", "Name", "Company");
    println!("{}", "─".repeat(64));
    for c in &clients {
        println!(
            "{:<4} {:<20} {:<20} {}",
            c.id.unwrap_or(0),
            c.name,
            c.company,
            c.email
        );
    }
    Ok(())
}

fn cli_leads(db: &mut Database) -> Result<()> {
    let leads = db.get_leads()?;
    if leads.is_empty() {
        println!("No leads");
        return Ok(());
    }

    println!(
        "{:<4} {:<18} {:<18} {:<6} {:<10} Email",
        "ID", "Name", "Company", "Budget", "Status"
    );
    println!("{}", "─".repeat(72));
    for l in &leads {
        println!(
            "{:<4} {:<18} {:<18} {:<6} {:<10} {}",
            l.id.unwrap_or(0),
            l.name,
            l.company,
            l.budget_bracket.as_str(),
            l.status.as_str(),
            l.email
        );
    }
    Ok(())
}

fn cli_health(db: &mut Database, config: &Config) -> Result<()> {
    let health = db.health()?;
    println!("Database:       {}", config.db_path.display());
    println!("Log file:       {}", config.log_path().display());
    println!("Schema version: {}", health.schema_version);
    let window = trailing_months_now(config.window_months);
    if let (Some(first), Some(last)) = (window.first(), window.last()) {
        println!("Default window: {first} to {last} ({} months)", window.len());
    }
    for (table, count) in &health.table_counts {
        println!("  {table:<18} {count}");
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let target = positionals(args)
        .first()
        .map(|p| super::shellexpand(p))
        .ok_or_else(|| anyhow::anyhow!("Usage: scout-admin export <file.csv> [--months N]"))?;
    let months = months_flag(args, config.window_months);
    let m = metrics::load_dashboard(db, months, reference_date(args)?)?;
    let count = crate::export::export_series_csv(Path::new(&target), &m.series)?;
    info!(path = %target, rows = count, "exported forecast series");
    println!("Exported {count} months to {target}");
    Ok(())
}

// ── Record entry ─────────────────────────────────────────────

fn cli_add_client(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positionals(args);
    let [name, company, email] = pos.as_slice() else {
        anyhow::bail!("Usage: scout-admin add-client <name> <company> <email>");
    };
    let client = Client::new(name.to_string(), company.to_string(), email.to_string());
    let id = db.insert_client(&client)?;
    println!("Created client #{id}: {client}");
    Ok(())
}

fn cli_add_project(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positionals(args);
    let [client_id, name, amount] = pos.as_slice() else {
        anyhow::bail!(
            "Usage: scout-admin add-project <client-id> <name> <amount> [--start D] [--end D] [--status S]"
        );
    };
    let client = require_client(db, parse_id(client_id, "client")?)?;
    let client_id = client.id.unwrap_or_default();

    let mut project = Project::new(client_id, name.to_string(), parse_money(amount)?);
    project.start_date = optional_date(args, "--start")?;
    project.end_date = optional_date(args, "--end")?;
    if let (Some(start), Some(end)) = (project.start_date, project.end_date) {
        if end < start {
            anyhow::bail!("End date {end} precedes start date {start}");
        }
    }
    if project.start_date.is_none() {
        warn!("project has no start date; the forecast places it in the first month of the window");
    }
    if let Some(status) = flag_value(args, "--status") {
        project.status = ProjectStatus::parse(status).ok_or_else(|| {
            anyhow::anyhow!("status must be one of: {}", join_all(ProjectStatus::all()))
        })?;
    }
    if let Some(currency) = flag_value(args, "--currency") {
        project.currency = currency.trim().to_uppercase();
    }

    let id = db.insert_project(&project)?;
    println!(
        "Created project #{id} for {}: {} ({})",
        client.name,
        project.name,
        format_money(project.contract_value, &project.currency)
    );
    Ok(())
}

fn task_fields(args: &[String]) -> Result<(TaskStatus, i64)> {
    let status = match flag_value(args, "--status") {
        Some(s) => TaskStatus::parse(s).ok_or_else(|| {
            anyhow::anyhow!("status must be one of: {}", join_all(TaskStatus::all()))
        })?,
        None => TaskStatus::Todo,
    };
    let order = flag_value(args, "--order").map_or(0, |o| safe_int(o, 0));
    Ok((status, order))
}

fn cli_add_task(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positionals(args);
    let [project_id, title] = pos.as_slice() else {
        anyhow::bail!("Usage: scout-admin add-task <project-id> <title> [--status S] [--order N]");
    };
    let mut task = Task::new(parse_id(project_id, "project")?, title.to_string());
    (task.status, task.sort_order) = task_fields(args)?;
    let id = db.insert_task(&task)?;
    println!("Added task #{id} to project #{}: {} ({})", task.project_id, task.title, task.status);
    Ok(())
}

fn cli_add_subtask(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positionals(args);
    let [task_id, title] = pos.as_slice() else {
        anyhow::bail!("Usage: scout-admin add-subtask <task-id> <title> [--status S] [--order N]");
    };
    let mut subtask = Subtask::new(parse_id(task_id, "task")?, title.to_string());
    (subtask.status, subtask.sort_order) = task_fields(args)?;
    let id = db.insert_subtask(&subtask)?;
    println!("Added subtask #{id} to task #{}: {} ({})", subtask.task_id, subtask.title, subtask.status);
    Ok(())
}

fn cli_add_invoice(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positionals(args);
    let [client_id, amount] = pos.as_slice() else {
        anyhow::bail!(
            "Usage: scout-admin add-invoice <client-id> <amount> [--project ID] [--paid D] [--number N]"
        );
    };
    let client_id = parse_id(client_id, "client")?;
    require_client(db, client_id)?;

    let mut invoice = Invoice::new(client_id, parse_money(amount)?);
    invoice.project_id = flag_value(args, "--project")
        .map(|p| parse_id(p, "project"))
        .transpose()?;
    invoice.invoice_number = flag_value(args, "--number").map(str::to_string);
    if let Some(issued) = optional_date(args, "--issued")? {
        invoice.issued_date = Some(issued);
    }
    if let Some(paid) = optional_date(args, "--paid")? {
        invoice = invoice.paid_on(paid);
    }

    let id = db.insert_invoice(&invoice)?;
    println!(
        "Recorded invoice #{id} ({}, {})",
        invoice.status,
        format_money(invoice.amount, &invoice.currency)
    );
    Ok(())
}

fn cli_mark_paid(args: &[String], db: &mut Database) -> Result<()> {
    let id = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: scout-admin mark-paid <invoice-id> [--date D]"))?;
    let id = parse_id(id, "invoice")?;
    let date = optional_date(args, "--date")?.unwrap_or_else(today);
    if !db.mark_invoice_paid(id, date)? {
        anyhow::bail!("Invoice not found: {id}");
    }
    println!("Invoice #{id} marked paid on {date}");
    Ok(())
}

fn cli_add_request(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positionals(args);
    let [client_id, amount] = pos.as_slice() else {
        anyhow::bail!("Usage: scout-admin add-request <client-id> <amount> [--due D] [--title T]");
    };
    let client_id = parse_id(client_id, "client")?;
    require_client(db, client_id)?;

    let mut request = PaymentRequest::new(client_id, parse_money(amount)?);
    request.project_id = flag_value(args, "--project")
        .map(|p| parse_id(p, "project"))
        .transpose()?;
    request.title = flag_value(args, "--title").map(str::to_string);
    request.due_date = optional_date(args, "--due")?;

    let id = db.insert_payment_request(&request)?;
    println!(
        "Opened payment request #{id} ({})",
        format_money(request.amount, &request.currency)
    );
    Ok(())
}

fn cli_add_lead(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positionals(args);
    let [name, company, email, bracket] = pos.as_slice() else {
        anyhow::bail!(
            "Usage: scout-admin add-lead <name> <company> <email> <Low|Mid|High> [--status S] [--pain TEXT]"
        );
    };
    let status = flag_value(args, "--status").unwrap_or("New");
    let pain = flag_value(args, "--pain").unwrap_or_default();
    let lead = Lead::from_input(name, company, email, bracket, status, pain)?;
    let id = db.insert_lead(&lead)?;
    println!("Created lead #{id}: {} ({}, {})", lead.name, lead.company, lead.status);
    Ok(())
}

fn cli_lead_status(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positionals(args);
    let [id, status] = pos.as_slice() else {
        anyhow::bail!("Usage: scout-admin lead-status <lead-id> <New|Contacted|Won|Lost>");
    };
    let id = parse_id(id, "lead")?;
    let status = LeadStatus::parse(status).ok_or_else(|| {
        anyhow::anyhow!("status must be one of: {}", join_all(LeadStatus::all()))
    })?;
    if !db.update_lead_status(id, status)? {
        anyhow::bail!("Lead not found: {id}");
    }
    println!("Lead #{id} is now {status}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positionals_skip_flag_values() {
        let a = args(&["3", "Site", "1200", "--start", "2024-01-01", "--json"]);
        assert_eq!(positionals(&a), vec!["3", "Site", "1200"]);
    }

    #[test]
    fn test_flag_value() {
        let a = args(&["out.csv", "--months", "6"]);
        assert_eq!(flag_value(&a, "--months"), Some("6"));
        assert_eq!(flag_value(&a, "--start"), None);
    }

    #[test]
    fn test_months_flag() {
        assert_eq!(months_flag(&args(&["--months", "18"]), 12), 18);
        assert_eq!(months_flag(&args(&["--months", "6.7"]), 12), 6);
        assert_eq!(months_flag(&args(&[]), 12), 12);
        assert_eq!(months_flag(&args(&["--months", "soon"]), 12), 12);
        assert_eq!(months_flag(&args(&["--months", "-4"]), 12), 0);
    }

    #[test]
    fn test_reference_date() {
        let a = args(&["--through", "2024-02"]);
        assert_eq!(reference_date(&a).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(reference_date(&args(&["--through", "Feb"])).is_err());
        assert_eq!(reference_date(&args(&[])).unwrap(), today());
    }

    #[test]
    fn test_status_errors_list_choices() {
        let mut db = Database::open_in_memory().unwrap();
        let err = cli_lead_status(&args(&["1", "maybe"]), &mut db).unwrap_err();
        assert_eq!(err.to_string(), "status must be one of: New, Contacted, Won, Lost");
    }

    #[test]
    fn test_optional_date() {
        let a = args(&["--paid", "2024-02-15"]);
        assert_eq!(
            optional_date(&a, "--paid").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15)
        );
        assert_eq!(optional_date(&a, "--due").unwrap(), None);
        assert!(optional_date(&args(&["--paid", "15/02/2024"]), "--paid").is_err());
    }

    #[test]
    fn test_format_f64_cents_rounds() {
        assert_eq!(format_f64_cents(12_345.6), "$123");
        assert_eq!(format_f64_cents(f64::NAN), "$0");
        assert_eq!(format_f64_cents(-50.0), "$0");
    }

    #[test]
    fn test_record_entry_flow() {
        let mut db = Database::open_in_memory().unwrap();
        cli_add_client(&args(&["Ada", "Acme", "ada@acme.io"]), &mut db).unwrap();
        let client_id = db.get_clients().unwrap()[0].id.unwrap().to_string();

        cli_add_project(
            &args(&[&client_id, "Rebuild", "3.00", "--start", "2024-01-01", "--end", "2024-03-31"]),
            &mut db,
        )
        .unwrap();
        cli_add_invoice(&args(&[&client_id, "0.50", "--paid", "2024-02-15"]), &mut db).unwrap();

        let projects = db.get_projects().unwrap();
        assert_eq!(projects[0].contract_value.get(), 300);
        assert_eq!(db.get_paid_invoices().unwrap().len(), 1);
    }

    #[test]
    fn test_add_project_rejects_inverted_dates() {
        let mut db = Database::open_in_memory().unwrap();
        cli_add_client(&args(&["Ada", "Acme", "ada@acme.io"]), &mut db).unwrap();
        let client_id = db.get_clients().unwrap()[0].id.unwrap().to_string();
        let err = cli_add_project(
            &args(&[&client_id, "Bad", "10", "--start", "2024-05-01", "--end", "2024-01-01"]),
            &mut db,
        )
        .unwrap_err();
        assert!(err.to_string().contains("precedes"));
    }

    #[test]
    fn test_add_invoice_unknown_client() {
        let mut db = Database::open_in_memory().unwrap();
        let err = cli_add_invoice(&args(&["99", "10"]), &mut db).unwrap_err();
        assert_eq!(err.to_string(), "Client not found: 99");
    }

    #[test]
    fn test_lead_flow() {
        let mut db = Database::open_in_memory().unwrap();
        cli_add_lead(&args(&["Ada", "Acme", "ada@acme.io", "High", "--pain", "slow builds"]), &mut db)
            .unwrap();
        let id = db.get_leads().unwrap()[0].id.unwrap().to_string();
        cli_lead_status(&args(&[&id, "contacted"]), &mut db).unwrap();
        let lead = &db.get_leads().unwrap()[0];
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.pain_point, "slow builds");
    }

    #[test]
    fn test_task_flow() {
        let mut db = Database::open_in_memory().unwrap();
        cli_add_client(&args(&["Ada", "Acme", "ada@acme.io"]), &mut db).unwrap();
        let client_id = db.get_clients().unwrap()[0].id.unwrap();
        cli_add_project(&args(&[&client_id.to_string(), "Rebuild", "100"]), &mut db).unwrap();
        let project_id = db.get_projects().unwrap()[0].id.unwrap().to_string();

        cli_add_task(&args(&[&project_id, "Design", "--order", "2"]), &mut db).unwrap();
        cli_add_task(&args(&[&project_id, "Kickoff", "--status", "done", "--order", "1"]), &mut db)
            .unwrap();
        let project_id: i64 = project_id.parse().unwrap();
        let tasks = db.get_tasks_by_projects(&[project_id]).unwrap();
        assert_eq!(tasks[0].title, "Kickoff");
        assert_eq!(tasks[0].status, TaskStatus::Done);

        let design_id = tasks[1].id.unwrap().to_string();
        cli_add_subtask(&args(&[&design_id, "Wireframes", "--status", "in progress"]), &mut db)
            .unwrap();
        let subtasks = db.get_subtasks_by_tasks(&[tasks[1].id.unwrap()]).unwrap();
        assert_eq!(subtasks[0].status, TaskStatus::InProgress);

        let err = cli_add_task(&args(&[&project_id.to_string(), "X", "--status", "maybe"]), &mut db)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "status must be one of: todo, in_progress, done, blocked"
        );
    }

    #[test]
    fn test_client_json_includes_projects_tasks_and_billing() {
        let mut db = Database::open_in_memory().unwrap();
        cli_add_client(&args(&["Ada", "Acme", "ada@acme.io"]), &mut db).unwrap();
        let client_id = db.get_clients().unwrap()[0].id.unwrap();
        let cid = client_id.to_string();
        cli_add_project(&args(&[&cid, "Rebuild", "100", "--start", "2024-01-01"]), &mut db).unwrap();
        let project_id = db.get_projects().unwrap()[0].id.unwrap();
        cli_add_task(&args(&[&project_id.to_string(), "Plan"]), &mut db).unwrap();
        let task_id = db.get_tasks_by_projects(&[project_id]).unwrap()[0].id.unwrap();
        cli_add_subtask(&args(&[&task_id.to_string(), "Outline"]), &mut db).unwrap();
        cli_add_invoice(&args(&[&cid, "40", "--paid", "2024-01-10"]), &mut db).unwrap();
        cli_add_request(&args(&[&cid, "25", "--title", "Deposit"]), &mut db).unwrap();

        let detail = metrics::load_client(&db, client_id, today()).unwrap().unwrap();
        let value = client_json(&detail);
        assert_eq!(value["client"]["name"], "Ada");
        assert_eq!(value["projects"][0]["contract_value_cents"], 10_000);
        assert_eq!(value["tasks"][0]["title"], "Plan");
        assert_eq!(value["tasks"][0]["status"], "todo");
        assert_eq!(value["subtasks"][0]["title"], "Outline");
        assert_eq!(value["billing"]["invoices"][0]["amount_cents"], 4_000);
        assert_eq!(value["billing"]["invoices"][0]["status"], "paid");
        assert_eq!(value["billing"]["payment_requests"][0]["title"], "Deposit");
        assert_eq!(value["metrics"]["open_payment_requests_cents"], 2_500);
    }
}
