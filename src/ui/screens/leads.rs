use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::screens::{panel, render_empty};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.leads.is_empty() {
        render_empty(
            f,
            area,
            "Leads (0)",
            &[
                "No leads yet.",
                "",
                "Add one with: scout-admin add-lead <name> <company> <email> <Low|Mid|High>",
            ],
        );
        return;
    }

    let header = Row::new(
        ["Name", "Company", "Email", "Budget", "Status", "Pain point"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = app
        .leads
        .iter()
        .enumerate()
        .skip(app.lead_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, lead)| {
            let is_cursor = i == app.lead_index;
            let style = if is_cursor {
                theme::selected_style()
            } else if lead.status.is_closed() {
                theme::dim_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let status = if is_cursor {
                Cell::from(lead.status.as_str())
            } else {
                Cell::from(Span::styled(
                    lead.status.as_str(),
                    Style::default().fg(theme::lead_status_color(lead.status)),
                ))
            };

            Row::new(vec![
                Cell::from(truncate(&lead.name, 20)),
                Cell::from(truncate(&lead.company, 20)),
                Cell::from(truncate(&lead.email, 28)),
                Cell::from(lead.budget_bracket.as_str()),
                status,
                Cell::from(truncate(&lead.pain_point, 40)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Length(20),
        Constraint::Length(28),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let open = app.leads.iter().filter(|l| !l.status.is_closed()).count();
    let table = Table::new(rows, widths).header(header).block(panel(format!(
        "Leads ({}, {open} open)",
        app.leads.len()
    )));
    f.render_widget(table, area);
}
