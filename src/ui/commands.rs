use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::db::Database;
use crate::forecast::{MAX_WINDOW_MONTHS, MIN_WINDOW_MONTHS};
use crate::models::LeadStatus;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Scout Admin", cmd_quit, r);
    register_command!("quit", "Quit Scout Admin", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("c", "Go to Clients", cmd_clients, r);
    register_command!("clients", "Go to Clients", cmd_clients, r);
    register_command!("l", "Go to Leads", cmd_leads, r);
    register_command!("leads", "Go to Leads", cmd_leads, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("months", "Set forecast window (e.g. :months 6)", cmd_months, r);
    register_command!("m", "Set forecast window (e.g. :months 6)", cmd_months, r);
    register_command!(
        "lead-status",
        "Set selected lead's status (e.g. :lead-status Won)",
        cmd_lead_status,
        r
    );
    register_command!("refresh", "Reload everything from the database", cmd_refresh, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(db)?;
    Ok(())
}

fn cmd_clients(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Clients;
    app.refresh_clients(db)?;
    Ok(())
}

fn cmd_leads(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Leads;
    app.refresh_leads(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.refresh_all(db)?;
    app.set_status("Reloaded");
    Ok(())
}

fn cmd_months(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Ok(requested) = args.parse::<usize>() else {
        app.set_status(format!(
            "Usage: :months <{MIN_WINDOW_MONTHS}-{MAX_WINDOW_MONTHS}>"
        ));
        return Ok(());
    };
    let applied = app.set_window(requested, db)?;
    if applied == requested {
        app.set_status(format!("Showing last {applied} months"));
    } else {
        app.set_status(format!("Showing last {applied} months (clamped from {requested})"));
    }
    Ok(())
}

fn cmd_lead_status(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(status) = LeadStatus::parse(args) else {
        app.set_status("Usage: :lead-status <New|Contacted|Won|Lost>");
        return Ok(());
    };
    let Some((id, name)) = app
        .selected_lead()
        .and_then(|l| l.id.map(|id| (id, l.name.clone())))
    else {
        app.set_status("No lead selected");
        return Ok(());
    };

    if db.update_lead_status(id, status)? {
        app.refresh_leads(db)?;
        app.set_status(format!("{name} is now {status}"));
    } else {
        app.set_status(format!("Lead not found: {id}"));
    }
    Ok(())
}
