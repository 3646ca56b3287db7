use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{App, LoadState};
use crate::theme;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    if app.assignment.is_none() {
        let message = Paragraph::new(" No patch assigned. There are no tasks available for you.")
            .style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(message, area);
        return;
    }

    let page = match &app.outcome {
        LoadState::Loaded(page) => page.clone(),
        LoadState::Loading | LoadState::NotLoaded => {
            let loading = Paragraph::new(" Loading worktray...")
                .style(Style::default().fg(theme::TEXT_DIM));
            frame.render_widget(loading, area);
            return;
        }
        LoadState::Error(_) => {
            let failed = Paragraph::new(
                " Unable to fetch the worktray. Check your connection and press r to retry.",
            )
            .style(Style::default().fg(theme::RED));
            frame.render_widget(failed, area);
            return;
        }
    };

    if page.processes.is_empty() {
        let empty = Paragraph::new(" No processes match the current filters")
            .style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(" Process"),
        Cell::from("Name"),
        Cell::from("Address"),
        Cell::from("Patch"),
        Cell::from("State"),
        Cell::from("Status"),
    ])
    .style(
        Style::default()
            .fg(theme::CYAN)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = page
        .processes
        .iter()
        .map(|record| {
            Row::new(vec![
                Cell::from(format!(" {}", record.process_name)),
                Cell::from(record.related("name").unwrap_or("-").to_string()),
                Cell::from(record.related("address").unwrap_or("-").to_string()),
                Cell::from(record.related("patch").unwrap_or("-").to_string()),
                Cell::from(record.current_state.state.clone()),
                Cell::from(
                    record
                        .current_state
                        .status
                        .as_deref()
                        .unwrap_or("-")
                        .to_string(),
                )
                .style(Style::default().fg(theme::GREEN)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(22),
        Constraint::Percentage(18),
        Constraint::Percentage(24),
        Constraint::Length(10),
        Constraint::Percentage(14),
        Constraint::Percentage(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE))
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}
