use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::metrics::ClientDetail;
use crate::money::format_money;
use crate::ui::app::App;
use crate::ui::screens::{panel, render_empty};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.clients.is_empty() {
        render_empty(
            f,
            area,
            "Clients (0)",
            &[
                "No clients yet.",
                "",
                "Add one with: scout-admin add-client <name> <company> <email>",
            ],
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_client_list(f, chunks[0], app);
    match &app.client_detail {
        Some(detail) => render_detail(f, chunks[1], detail),
        None => render_empty(f, chunks[1], "Detail", &["Select a client"]),
    }
}

fn render_client_list(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        ["Name", "Company"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let name_width = (area.width as usize / 2).saturating_sub(2).max(4);
    let rows: Vec<Row> = app
        .clients
        .iter()
        .enumerate()
        .skip(app.client_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, c)| {
            let style = if i == app.client_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&c.name, name_width)),
                Cell::from(truncate(&c.company, name_width)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
        .header(header)
        .block(panel(format!("Clients ({})", app.clients.len())));
    f.render_widget(table, area);
}

const MAX_PROJECTS: usize = 6;
const MAX_TASKS: usize = 4;
const MAX_SUBTASKS: usize = 3;

/// Task and subtask lines under one project, status colored.
fn work_lines(detail: &ClientDetail, project_id: Option<i64>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for t in detail.tasks_for(project_id).take(MAX_TASKS) {
        lines.push(Line::from(vec![
            Span::styled(format!("    • {:<30} ", truncate(&t.title, 30)), theme::normal_style()),
            Span::styled(t.status.as_str(), Style::default().fg(theme::task_status_color(t.status))),
        ]));
        for st in detail.subtasks_for(t.id).take(MAX_SUBTASKS) {
            lines.push(Line::from(vec![
                Span::styled(format!("        - {:<26} ", truncate(&st.title, 26)), theme::dim_style()),
                Span::styled(
                    st.status.as_str(),
                    Style::default().fg(theme::task_status_color(st.status)),
                ),
            ]));
        }
    }
    lines
}

fn render_detail(f: &mut Frame, area: Rect, detail: &ClientDetail) {
    let c = &detail.client;
    let m = &detail.metrics;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(c.name.clone(), theme::section_style()),
            Span::styled(format!("  {}  <{}>", c.company, c.email), theme::dim_style()),
        ]),
        Line::from(vec![
            Span::styled("  Contract value: ", theme::dim_style()),
            Span::styled(
                format_money(m.total_value_cents, "USD"),
                Style::default().fg(theme::EXPECTED),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Open requests:  ", theme::dim_style()),
            Span::styled(
                format!(
                    "{} ({})",
                    m.open_payment_requests_count,
                    format_money(m.open_payment_requests_cents, "USD")
                ),
                Style::default().fg(theme::YELLOW),
            ),
        ]),
        Line::from(""),
    ];
    for p in detail.projects.iter().take(MAX_PROJECTS) {
        let span = match (p.start_date, p.end_date) {
            (Some(s), Some(e)) => format!("{s} to {e}"),
            (Some(s), None) => format!("from {s}"),
            _ => "undated".to_string(),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "  {:<22} {:<10} {:<26} {}",
                truncate(&p.name, 22),
                p.status.as_str(),
                span,
                format_money(p.contract_value, &p.currency)
            ),
            theme::normal_style(),
        )));
        lines.extend(work_lines(detail, p.id));
    }

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(4)])
        .split(area);

    f.render_widget(Paragraph::new(lines).block(panel("Detail")), chunks[0]);

    let header = Row::new(
        ["Month", "Expected", "Actual"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );
    let rows: Vec<Row> = m
        .series
        .iter()
        .rev()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.ym.to_string()),
                Cell::from(Span::styled(
                    format_money(p.expected_cents, "USD"),
                    Style::default().fg(theme::EXPECTED),
                )),
                Cell::from(Span::styled(
                    format_money(p.actual_cents, "USD"),
                    Style::default().fg(theme::ACTUAL),
                )),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!("Last {} months", m.series.len())));
    f.render_widget(table, chunks[1]);
}
