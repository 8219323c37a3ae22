use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::forecast::ForecastPoint;
use crate::metrics::DashboardMetrics;
use crate::money::{format_money, Cents};
use crate::ui::app::App;
use crate::ui::screens::{panel, render_empty};
use crate::ui::theme;
use crate::ui::util::{cents_to_units, series_peak};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(metrics) = &app.dashboard else {
        render_empty(f, area, "Dashboard", &["Loading..."]);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(10),   // Expected vs actual
        ])
        .split(area);

    render_summary_cards(f, chunks[0], metrics);
    render_forecast_chart(f, chunks[1], metrics, app.window_months);
}

fn render_summary_cards(f: &mut Frame, area: Rect, m: &DashboardMetrics) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    let expected: Cents = m.series.iter().map(|p| p.expected_cents).sum();
    let actual: Cents = m.series.iter().map(|p| p.actual_cents).sum();
    let months = m.series.len();

    render_card(
        f,
        cards[0],
        "Expected",
        format_money(expected, "USD"),
        theme::EXPECTED,
        format!("over {months} months"),
    );
    render_card(
        f,
        cards[1],
        "Actual",
        format_money(actual, "USD"),
        if actual >= expected {
            theme::GREEN
        } else {
            theme::RED
        },
        format!("over {months} months"),
    );
    render_card(
        f,
        cards[2],
        "Open Requests",
        format_money(m.open_payment_requests_cents, "USD"),
        theme::YELLOW,
        format!("{} open", m.open_payment_requests_count),
    );
    render_card(
        f,
        cards[3],
        "Paid 30d",
        format_money(m.totals.paid_30d_cents, "USD"),
        theme::GREEN,
        format!("90d: {}", format_money(m.totals.paid_90d_cents, "USD")),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color, sub: String) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub, theme::dim_style())),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

/// Chart coordinates: month index on x, whole units on y.
fn line_points(series: &[ForecastPoint], value: impl Fn(&ForecastPoint) -> Cents) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, cents_to_units(value(p))))
        .collect()
}

fn render_forecast_chart(f: &mut Frame, area: Rect, m: &DashboardMetrics, window: usize) {
    let title = format!("Expected vs Actual, last {window} months");
    if m.series.is_empty() {
        render_empty(f, area, &title, &["No months in window"]);
        return;
    }

    let expected = line_points(&m.series, |p| p.expected_cents);
    let actual = line_points(&m.series, |p| p.actual_cents);
    let trend: Vec<(f64, f64)> = m
        .trendline
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, v / 100.0))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Expected")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::EXPECTED))
            .data(&expected),
        Dataset::default()
            .name("Actual")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::ACTUAL))
            .data(&actual),
        Dataset::default()
            .name("Avg actual")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::TREND))
            .data(&trend),
    ];

    let last = m.series.len() - 1;
    let x_labels: Vec<Span> = [0, last / 2, last]
        .iter()
        .filter_map(|i| m.series.get(*i))
        .map(|p| Span::styled(p.ym.short_label(), theme::dim_style()))
        .collect();

    let peak = series_peak(&m.series);
    let y_labels = vec![
        Span::styled("0", theme::dim_style()),
        Span::styled(format!("{:.0}", peak / 2.0), theme::dim_style()),
        Span::styled(format!("{peak:.0}"), theme::dim_style()),
    ];

    let chart = Chart::new(datasets)
        .block(panel(title))
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, peak * 1.1])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
