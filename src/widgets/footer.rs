use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Overlay};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.overlay {
        Overlay::Filters => vec![
            hint("Space", "toggle"),
            hint("Enter", "apply"),
            hint("c", "clear"),
            hint("Esc", "close"),
        ],
        Overlay::Help => vec![hint("?", "close")],
        Overlay::None => vec![
            hint("j/k", "nav"),
            hint("h/l", "page"),
            hint("f", "filters"),
            hint("s", "sort"),
            hint("o", "order"),
            hint("t", "period"),
            hint("p", "page size"),
            hint("r", "refresh"),
            hint("?", "help"),
            hint("q", "quit"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            key.as_str(),
            Style::default().fg(theme::GREEN),
        ));
        spans.push(Span::styled(
            format!(":{}", desc),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}

fn hint(key: &str, desc: &str) -> (String, String) {
    (key.to_string(), desc.to_string())
}
