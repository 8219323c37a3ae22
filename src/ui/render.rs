use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

/// Keys that work on every screen, shown in the help overlay.
const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("1-3, Tab", "switch screen"),
    ("j/k", "move selection"),
    ("g/G", "first/last row"),
    ("+/-", "widen/narrow the window"),
    (":", "command bar"),
    ("Esc", "clear status"),
    ("Ctrl-q", "quit"),
];

fn screen_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Dashboard => " +/- window | :months N | ? help ",
        Screen::Clients => " j/k select | g/G top/bottom | ? help ",
        Screen::Leads => " j/k select | :lead-status S | ? help ",
    }
}

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, command] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(f.area());

    render_tab_bar(f, tabs, app);
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, body, app),
        Screen::Clients => super::screens::clients::render(f, body, app),
        Screen::Leads => super::screens::leads::render(f, body, app),
    }
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = Screen::all()
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);
    let tabs = Tabs::new(
        Screen::all()
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}:{s}", i + 1)),
    )
    .select(selected)
    .style(Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG))
    .highlight_style(
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    )
    .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)));
    f.render_widget(tabs, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
    };
    let mode = format!(" {} ", app.input_mode);
    let info = format!(
        " {} | last {} months | {} clients | {} leads",
        app.screen,
        app.window_months,
        app.clients.len(),
        app.leads.len()
    );
    let hint = screen_hint(app.screen);
    let pad = (area.width as usize).saturating_sub(mode.len() + info.len() + hint.len());

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(mode_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(info),
        Span::raw(" ".repeat(pad)),
        Span::raw(hint),
    ]))
    .style(theme::status_bar_style());
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Command => Line::from(vec![
            Span::styled(":", Style::default().fg(theme::ACCENT)),
            Span::styled(app.command_input.as_str(), theme::command_bar_style()),
        ]),
        InputMode::Normal if app.status_message.is_empty() => {
            Line::from(Span::styled(" Press : for commands, ? for help", theme::dim_style()))
        }
        InputMode::Normal => Line::from(Span::styled(
            app.status_message.as_str(),
            theme::command_bar_style(),
        )),
    };
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );

    if app.input_mode == InputMode::Command {
        let offset = 1 + app.command_input.chars().count() as u16;
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Registered commands, one line per command (aliases folded into the
/// longest name).
fn command_help() -> Vec<(&'static str, &'static str)> {
    let mut lines: Vec<(&'static str, &'static str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        match lines.iter_mut().find(|(_, desc)| *desc == cmd.description) {
            Some(entry) if name.len() > entry.0.len() => entry.0 = name,
            Some(_) => {}
            None => lines.push((name, cmd.description)),
        }
    }
    lines.sort_unstable();
    lines
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let row = |key: String, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {key:<14}"), Style::default().fg(theme::ACCENT)),
            Span::styled(desc.to_string(), theme::normal_style()),
        ])
    };

    let mut text = vec![Line::from(Span::styled(" Keys", theme::section_style()))];
    text.extend(GLOBAL_KEYS.iter().map(|(key, desc)| row(key.to_string(), desc)));
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(" Commands", theme::section_style())));
    text.extend(
        command_help()
            .into_iter()
            .map(|(name, desc)| row(format!(":{name}"), desc)),
    );
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(" Press any key to close", theme::dim_style())));

    let height = (text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 60.min(area.width.saturating_sub(4));
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(Span::styled(" Scout Admin Help ", theme::title_style()))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_command_help_folds_aliases() {
        let help = command_help();
        let names: Vec<&str> = help.iter().map(|(name, _)| *name).collect();
        assert!(names.contains(&"months"));
        assert!(names.contains(&"quit"));
        assert!(!names.contains(&"m"));
        assert!(!names.contains(&"q"));
    }
}
