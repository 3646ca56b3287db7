use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::{App, Overlay};
use crate::query::{QueryAction, SortOption, PAGE_SIZES, TIME_PERIODS};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

/// Bridges crossterm's event stream and a tick interval into one channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    event = reader.next() => {
                        match event {
                            Some(Ok(Event::Key(key))) => {
                                if tx.send(AppEvent::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) => {} // mouse, resize, etc.
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Map a key event to an action based on current app state.
pub fn key_to_action(key: KeyEvent, app: &App) -> Option<Action> {
    match app.overlay {
        Overlay::Help => {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    Some(Action::ToggleHelp)
                }
                _ => None,
            };
        }
        Overlay::Filters => {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('f') => Some(Action::CloseOverlay),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::FilterCursorDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::FilterCursorUp),
                KeyCode::Char(' ') => Some(Action::FilterToggle),
                KeyCode::Char('a') => cursor_dimension(app).map(Action::FilterSelectAll),
                KeyCode::Char('x') => cursor_dimension(app).map(Action::FilterRemoveAll),
                KeyCode::Enter => Some(Action::ApplyFilters),
                KeyCode::Char('c') => Some(Action::ClearFilters),
                _ => None,
            };
        }
        Overlay::None => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('f') => Some(Action::OpenFilters),

        KeyCode::Char('j') | KeyCode::Down => Some(Action::NavigateDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::NavigateUp),
        KeyCode::Char('g') => Some(Action::NavigateTop),
        KeyCode::Char('G') => Some(Action::NavigateBottom),

        KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevPage),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),

        // Control cycling, the TUI stand-in for the controls dropdowns.
        KeyCode::Char('s') => Some(Action::Query(QueryAction::Sort(
            next_sort(app.query.sort).as_str().to_string(),
        ))),
        KeyCode::Char('o') => Some(Action::Query(QueryAction::Order(
            flip_order(app).to_string(),
        ))),
        KeyCode::Char('t') => Some(Action::Query(QueryAction::TimePeriod(
            next_time_period(&app.query.time_period).to_string(),
        ))),
        KeyCode::Char('p') => Some(Action::Query(QueryAction::Limit(next_page_size(
            app.query.page_size,
        )))),

        _ => None,
    }
}

fn cursor_dimension(app: &App) -> Option<crate::query::FilterDimension> {
    app.filter_entries()
        .get(app.filter_cursor)
        .map(|entry| entry.dimension)
}

fn flip_order(app: &App) -> &'static str {
    match app.query.order {
        crate::query::OrderBy::Asc => "desc",
        crate::query::OrderBy::Desc => "asc",
    }
}

pub fn next_sort(current: SortOption) -> SortOption {
    const ORDERED: [SortOption; 7] = [
        SortOption::Status,
        SortOption::TimeLeft,
        SortOption::State,
        SortOption::Patch,
        SortOption::Process,
        SortOption::Name,
        SortOption::Address,
    ];
    let idx = ORDERED.iter().position(|&s| s == current).unwrap_or(0);
    ORDERED[(idx + 1) % ORDERED.len()]
}

pub fn next_time_period(current: &str) -> &'static str {
    let idx = TIME_PERIODS.iter().position(|&t| t == current);
    match idx {
        Some(idx) => TIME_PERIODS[(idx + 1) % TIME_PERIODS.len()],
        // Hydrated value outside the vocabulary: restart the cycle.
        None => TIME_PERIODS[0],
    }
}

pub fn next_page_size(current: u32) -> u32 {
    let idx = PAGE_SIZES.iter().position(|&l| l == current);
    match idx {
        Some(idx) => PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()],
        None => PAGE_SIZES[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_cycle_covers_the_whole_vocabulary_and_wraps() {
        let mut seen = vec![SortOption::Status];
        let mut current = SortOption::Status;
        for _ in 0..6 {
            current = next_sort(current);
            seen.push(current);
        }
        assert_eq!(next_sort(current), SortOption::Status);
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn time_period_cycle_handles_raw_hydrated_values() {
        assert_eq!(next_time_period("30"), "60");
        assert_eq!(next_time_period("all"), "30");
        assert_eq!(next_time_period("garbage"), "30");
    }

    #[test]
    fn page_size_cycle_wraps() {
        assert_eq!(next_page_size(10), 25);
        assert_eq!(next_page_size(100), 10);
        assert_eq!(next_page_size(40), 10);
    }
}
