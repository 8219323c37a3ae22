#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use ratatui::{backend::TestBackend, Terminal};

use super::app::{App, Screen};
use super::commands::{handle_command, COMMANDS};
use crate::db::Database;
use crate::models::{Client, Lead, LeadStatus, Project, Subtask, Task, TaskStatus};
use crate::money::Cents;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
}

fn seeded() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let ada = db
        .insert_client(&Client::new("Ada".into(), "Acme".into(), "ada@acme.io".into()))
        .unwrap();
    db.insert_client(&Client::new("Bo".into(), "Bolt".into(), "bo@bolt.io".into()))
        .unwrap();
    let mut p = Project::new(ada, "Rebuild".into(), Cents::new(300));
    p.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
    p.end_date = NaiveDate::from_ymd_opt(2024, 3, 31);
    db.insert_project(&p).unwrap();
    db.insert_lead(&Lead::from_input("Cy", "Cyan", "cy@cyan.io", "Mid", "New", "").unwrap())
        .unwrap();

    let mut app = App::new(6, today());
    app.refresh_all(&db).unwrap();
    (app, db)
}

// ── App state ─────────────────────────────────────────────────

#[test]
fn test_new_clamps_window() {
    assert_eq!(App::new(100, today()).window_months, 24);
    assert_eq!(App::new(0, today()).window_months, 3);
}

#[test]
fn test_refresh_all_loads_everything() {
    let (app, _db) = seeded();
    assert_eq!(app.dashboard.as_ref().unwrap().series.len(), 6);
    assert_eq!(app.clients.len(), 2);
    assert_eq!(app.leads.len(), 1);
    assert!(app.client_detail.is_some());
}

#[test]
fn test_set_window_refreshes_dashboard() {
    let (mut app, db) = seeded();
    assert_eq!(app.set_window(30, &db).unwrap(), 24);
    assert_eq!(app.dashboard.as_ref().unwrap().series.len(), 24);
    assert_eq!(app.set_window(2, &db).unwrap(), 3);
    assert_eq!(app.dashboard.as_ref().unwrap().series.len(), 3);
}

#[test]
fn test_client_detail_follows_cursor() {
    let (mut app, db) = seeded();
    let first = app.client_detail.as_ref().unwrap().client.name.clone();
    app.client_index = 1;
    app.refresh_client_detail(&db).unwrap();
    let second = app.client_detail.as_ref().unwrap().client.name.clone();
    assert_ne!(first, second);
}

#[test]
fn test_refresh_clamps_cursor() {
    let (mut app, db) = seeded();
    app.lead_index = 5;
    app.refresh_leads(&db).unwrap();
    assert_eq!(app.lead_index, 0);
}

#[test]
fn test_clients_screen_shows_project_tasks() {
    let (mut app, db) = seeded();
    let project_id = db.get_projects().unwrap()[0].id.unwrap();
    let mut task = Task::new(project_id, "Kickoff".into());
    task.status = TaskStatus::Blocked;
    let task_id = db.insert_task(&task).unwrap();
    db.insert_subtask(&Subtask::new(task_id, "Agenda".into())).unwrap();

    app.screen = Screen::Clients;
    app.client_index = app.clients.iter().position(|c| c.name == "Ada").unwrap();
    app.refresh_client_detail(&db).unwrap();

    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    terminal.draw(|f| super::render::render(f, &app)).unwrap();
    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Kickoff"));
    assert!(screen.contains("blocked"));
    assert!(screen.contains("Agenda"));
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn test_registry_has_core_commands() {
    for name in ["months", "dashboard", "clients", "leads", "lead-status", "q", "help"] {
        assert!(COMMANDS.contains_key(name), "missing :{name}");
    }
}

#[test]
fn test_months_command() {
    let (mut app, mut db) = seeded();
    handle_command("months 9", &mut app, &mut db).unwrap();
    assert_eq!(app.window_months, 9);
    assert_eq!(app.status_message, "Showing last 9 months");

    handle_command("m 48", &mut app, &mut db).unwrap();
    assert_eq!(app.window_months, 24);
    assert!(app.status_message.contains("clamped"));

    handle_command("months soon", &mut app, &mut db).unwrap();
    assert_eq!(app.window_months, 24);
    assert!(app.status_message.starts_with("Usage"));
}

#[test]
fn test_screen_commands() {
    let (mut app, mut db) = seeded();
    handle_command("leads", &mut app, &mut db).unwrap();
    assert_eq!(app.screen, Screen::Leads);
    handle_command("clients", &mut app, &mut db).unwrap();
    assert_eq!(app.screen, Screen::Clients);
    handle_command("d", &mut app, &mut db).unwrap();
    assert_eq!(app.screen, Screen::Dashboard);
}

#[test]
fn test_lead_status_command() {
    let (mut app, mut db) = seeded();
    handle_command("lead-status won", &mut app, &mut db).unwrap();
    assert_eq!(app.leads[0].status, LeadStatus::Won);
    assert_eq!(db.get_leads().unwrap()[0].status, LeadStatus::Won);

    handle_command("lead-status maybe", &mut app, &mut db).unwrap();
    assert_eq!(app.leads[0].status, LeadStatus::Won);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut db) = seeded();
    handle_command("mnths 4", &mut app, &mut db).unwrap();
    assert_eq!(app.status_message, "Unknown command: :mnths. Did you mean :months?");
}

#[test]
fn test_quit() {
    let (mut app, mut db) = seeded();
    handle_command("q", &mut app, &mut db).unwrap();
    assert!(!app.running);
}
