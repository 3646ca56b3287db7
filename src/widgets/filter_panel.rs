use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::theme;

/// The "Filter by" overlay: one grouped box per dimension, radio rows for
/// single-select dimensions, checkboxes for the rest.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let entries = app.filter_entries();
    let mut lines: Vec<Line> = vec![Line::from("")];

    let mut entry_idx = 0usize;
    for spec in app.filters.dimensions() {
        lines.push(Line::from(Span::styled(
            format!("  {}", spec.title),
            Style::default()
                .fg(theme::GREEN)
                .add_modifier(Modifier::BOLD),
        )));

        let rows_in_dimension = if spec.single_select && spec.options.len() > 1 {
            spec.options.len() + 1
        } else {
            spec.options.len()
        };

        for _ in 0..rows_in_dimension {
            let entry = &entries[entry_idx];
            let checked = match &entry.option_key {
                Some(key) => app.filters.is_checked(entry.dimension, key),
                None => app.filters.is_fully_selected(entry.dimension),
            };
            let marker = match (spec.single_select, checked) {
                (true, true) => "(•)",
                (true, false) => "( )",
                (false, true) => "[x]",
                (false, false) => "[ ]",
            };

            let style = if entry_idx == app.filter_cursor {
                Style::default()
                    .fg(theme::TEXT)
                    .bg(theme::BG_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT)
            };
            lines.push(Line::from(Span::styled(
                format!("    {} {}", marker, entry.label),
                style,
            )));
            entry_idx += 1;
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  Space toggle  a all  x none  Enter apply  c clear  Esc close",
        Style::default().fg(theme::TEXT_MUTED),
    )));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let modal_area = centered_rect(50, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::GREEN))
        .title(" Filter by ");

    frame.render_widget(Paragraph::new(lines).block(block), modal_area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}
