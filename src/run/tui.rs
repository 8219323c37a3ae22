use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use crate::config::Config;
use crate::db::Database;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database, config: &Config) -> Result<()> {
    let mut app = App::new(config.window_months, Utc::now().date_naive());
    app.refresh_all(db)?;
    info!(window = app.window_months, "starting interactive session");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!("interactive session failed: {e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('1') => switch_screen(app, db, Screen::Dashboard)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Clients)?,
        KeyCode::Char('3') => switch_screen(app, db, Screen::Leads)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, db, screens[(idx + 1) % screens.len()])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, db, screens[prev])?;
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, db, Move::Down)?,
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, db, Move::Up)?,
        KeyCode::Char('g') => move_cursor(app, db, Move::Top)?,
        KeyCode::Char('G') => move_cursor(app, db, Move::Bottom)?,
        KeyCode::Char('+') | KeyCode::Char('=') => adjust_window(app, db, 1)?,
        KeyCode::Char('-') => adjust_window(app, db, -1)?,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            if let Err(e) = commands::handle_command(&input, app, db) {
                error!(command = %input, "command failed: {e:#}");
                app.set_status(format!("Error: {e}"));
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            if app.command_input.pop().is_none() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

// ── Navigation ───────────────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    app.status_message.clear();
    match screen {
        Screen::Dashboard => app.refresh_dashboard(db),
        Screen::Clients => app.refresh_clients(db),
        Screen::Leads => app.refresh_leads(db),
    }
}

#[derive(Clone, Copy)]
enum Move {
    Up,
    Down,
    Top,
    Bottom,
}

fn move_cursor(app: &mut App, db: &mut Database, dir: Move) -> Result<()> {
    let page = app.visible_rows;
    match app.screen {
        Screen::Dashboard => {}
        Screen::Clients => {
            let before = app.client_index;
            let len = app.clients.len();
            step(&mut app.client_index, &mut app.client_scroll, len, page, dir);
            if app.client_index != before {
                app.refresh_client_detail(db)?;
            }
        }
        Screen::Leads => {
            let len = app.leads.len();
            step(&mut app.lead_index, &mut app.lead_scroll, len, page, dir);
        }
    }
    Ok(())
}

fn step(index: &mut usize, scroll: &mut usize, len: usize, page: usize, dir: Move) {
    match dir {
        Move::Up => scroll_up(index, scroll),
        Move::Down => scroll_down(index, scroll, len, page),
        Move::Top => scroll_to_top(index, scroll),
        Move::Bottom => scroll_to_bottom(index, scroll, len, page),
    }
}

/// Widen or narrow the dashboard window by one month.
fn adjust_window(app: &mut App, db: &mut Database, delta: i64) -> Result<()> {
    let requested = (app.window_months as i64 + delta).max(0) as usize;
    let applied = app.set_window(requested, db)?;
    app.set_status(format!("Showing last {applied} months"));
    Ok(())
}
