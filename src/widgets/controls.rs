use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

/// The controls line: active time window, page size, sort and order.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let period = match app.query.time_period.as_str() {
        "all" => "all time".to_string(),
        days => format!("last {} days", days),
    };

    let line = Line::from(vec![
        Span::styled(" Show: ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(period, Style::default().fg(theme::TEXT)),
        Span::styled("  per page: ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(
            app.query.page_size.to_string(),
            Style::default().fg(theme::TEXT),
        ),
        Span::styled("  sort: ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(
            format!("{} {}", app.query.sort, app.query.order.as_str()),
            Style::default().fg(theme::TEXT),
        ),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
