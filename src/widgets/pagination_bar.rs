use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(page) = app.outcome.data() else {
        return;
    };

    let vm = app.pagination();
    let mut spans: Vec<Span> = Vec::new();

    let shown_from = if page.total == 0 {
        0
    } else {
        u64::from(vm.active_page - 1) * u64::from(app.query.page_size) + 1
    };
    let shown_to =
        (u64::from(vm.active_page) * u64::from(app.query.page_size)).min(page.total);
    spans.push(Span::styled(
        format!(" {}-{} of {} ", shown_from, shown_to, page.total),
        Style::default().fg(theme::TEXT_DIM),
    ));

    if vm.has_previous {
        spans.push(Span::styled("‹ prev ", Style::default().fg(theme::GREEN)));
    }
    for number in &vm.visible_pages {
        let style = if *number == vm.active_page && vm.total_pages > 0 {
            Style::default()
                .fg(theme::GREEN)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        spans.push(Span::styled(format!("{} ", number), style));
    }
    if vm.has_next {
        spans.push(Span::styled("next ›", Style::default().fg(theme::GREEN)));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
