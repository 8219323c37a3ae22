pub(crate) mod clients;
pub(crate) mod dashboard;
pub(crate) mod leads;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Bordered block with the dimmed bold title every panel uses.
pub(crate) fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(ratatui::style::Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {} ", title.into()), theme::title_style()))
}

/// Centered placeholder shown when a panel has nothing to list.
pub(crate) fn render_empty(f: &mut Frame, area: Rect, title: &str, lines: &[&str]) {
    let mut text = vec![Line::from("")];
    text.extend(
        lines
            .iter()
            .map(|l| Line::from(Span::styled(l.to_string(), theme::dim_style()))),
    );
    f.render_widget(Paragraph::new(text).centered().block(panel(title)), area);
}
