use std::time::{Duration, Instant};

use ratatui::widgets::TableState;

use crate::action::{Action, Effect};
use crate::domain::{PatchAssignment, SearchPage};
use crate::filters::{DimensionSpec, FilterSelection};
use crate::nav::query_string;
use crate::pagination::{PaginationViewModel, DEFAULT_PAGE_RANGE};
use crate::query::{reconcile_page, FilterDimension, QueryAction, QueryState, SearchParams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Filters,
    Help,
}

/// Fetch outcome for the current parameter set. The three terminal states
/// (loading, loaded, error) are mutually exclusive by construction;
/// `Loaded` with an empty page is the "no results" state, distinct from
/// both.
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotLoaded,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// One selectable row of the filter panel. `option_key` of `None` is the
/// "show all" row of a single-select dimension.
#[derive(Debug, Clone)]
pub struct FilterEntry {
    pub dimension: FilterDimension,
    pub option_key: Option<String>,
    pub label: String,
}

pub struct App {
    pub query: QueryState,
    pub outcome: LoadState<SearchPage>,
    pub assignment: Option<PatchAssignment>,
    pub filters: FilterSelection,
    pub filter_cursor: usize,
    pub overlay: Overlay,
    pub table_state: TableState,
    pub last_error: Option<(String, Instant)>,
    pub should_quit: bool,

    dimension_specs: Vec<DimensionSpec>,
    /// Parameter set of the newest issued request; responses are matched
    /// against `ticket`, not arrival order.
    current_params: SearchParams,
    ticket: u64,
}

impl App {
    pub fn new(
        query: QueryState,
        assignment: Option<PatchAssignment>,
        dimension_specs: Vec<DimensionSpec>,
    ) -> Self {
        let filters = FilterSelection::from_committed(dimension_specs.clone(), &query);
        let current_params = query.search_params();
        Self {
            query,
            outcome: LoadState::NotLoaded,
            assignment,
            filters,
            filter_cursor: 0,
            overlay: Overlay::None,
            table_state: TableState::default(),
            last_error: None,
            should_quit: false,
            dimension_specs,
            current_params,
            ticket: 0,
        }
    }

    /// Effects to run at mount: persist the hydrated state and, when a
    /// patch is assigned, issue the first search. Without an assignment
    /// the worktray stays in its defined empty state and never queries.
    pub fn initial_effects(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::PersistQuery(query_string::serialize(&self.query))];
        if self.assignment.is_some() {
            self.outcome = LoadState::Loading;
            effects.push(Effect::Search {
                ticket: self.ticket,
                params: self.current_params.clone(),
            });
        }
        effects
    }

    pub fn pagination(&self) -> PaginationViewModel {
        let total = self.outcome.data().map_or(0, |page| page.total);
        PaginationViewModel::derive(
            total,
            self.query.page,
            self.query.page_size,
            DEFAULT_PAGE_RANGE,
        )
    }

    pub fn filter_entries(&self) -> Vec<FilterEntry> {
        let mut entries = Vec::new();
        for spec in self.filters.dimensions() {
            if spec.single_select && spec.options.len() > 1 {
                entries.push(FilterEntry {
                    dimension: spec.dimension,
                    option_key: None,
                    label: "Show all".to_string(),
                });
            }
            for option in &spec.options {
                entries.push(FilterEntry {
                    dimension: spec.dimension,
                    option_key: Some(option.key.clone()),
                    label: option.label.clone(),
                });
            }
        }
        entries
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        // Expire stale error toasts.
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > Duration::from_secs(5) {
                self.last_error = None;
            }
        }

        match action {
            Action::Query(query_action) => self.dispatch_all(vec![query_action]),

            Action::NavigateUp => {
                self.table_state.select_previous();
                vec![]
            }
            Action::NavigateDown => {
                if self.result_count() > 0 {
                    self.table_state.select_next();
                }
                vec![]
            }
            Action::NavigateTop => {
                self.table_state.select_first();
                vec![]
            }
            Action::NavigateBottom => {
                self.table_state.select_last();
                vec![]
            }
            Action::NextPage => {
                let pagination = self.pagination();
                if pagination.has_next {
                    self.dispatch_all(vec![QueryAction::Page(pagination.active_page + 1)])
                } else {
                    vec![]
                }
            }
            Action::PrevPage => {
                let pagination = self.pagination();
                if pagination.has_previous {
                    self.dispatch_all(vec![QueryAction::Page(pagination.active_page - 1)])
                } else {
                    vec![]
                }
            }

            Action::OpenFilters => {
                // Selection is transient: re-derive it from the committed
                // filter strings every time the panel opens.
                self.filters = FilterSelection::from_committed(
                    self.dimension_specs.clone(),
                    &self.query,
                );
                self.filter_cursor = 0;
                self.overlay = Overlay::Filters;
                vec![]
            }
            Action::FilterCursorUp => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
                vec![]
            }
            Action::FilterCursorDown => {
                let max = self.filter_entries().len().saturating_sub(1);
                self.filter_cursor = (self.filter_cursor + 1).min(max);
                vec![]
            }
            Action::FilterToggle => self.toggle_filter_entry(),
            Action::FilterSelectAll(dimension) => {
                self.filters.select_all(dimension);
                vec![]
            }
            Action::FilterRemoveAll(dimension) => {
                self.filters.remove_all(dimension);
                vec![]
            }
            Action::ApplyFilters => {
                let actions = self.filters.apply();
                self.overlay = Overlay::None;
                self.dispatch_all(actions)
            }
            Action::ClearFilters => {
                let actions = self.filters.clear();
                self.dispatch_all(actions)
            }

            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }
            Action::CloseOverlay => {
                self.overlay = Overlay::None;
                vec![]
            }

            Action::ResultsLoaded { ticket, page } => {
                if ticket != self.ticket {
                    // Response to a superseded parameter set; drop it.
                    return vec![];
                }
                let total = page.total;
                self.outcome = LoadState::Loaded(page);
                if self.table_state.selected().is_none() && self.result_count() > 0 {
                    self.table_state.select_first();
                }
                // Page reconciliation: snap back when the total shrank
                // under the current page. Dispatching the corrected page
                // re-derives the parameter set, so this cannot loop.
                if let Some(corrected) =
                    reconcile_page(self.query.page, total, self.query.page_size)
                {
                    return self.dispatch_all(vec![QueryAction::Page(corrected)]);
                }
                vec![]
            }
            Action::FetchFailed { ticket, message } => {
                if ticket != self.ticket {
                    return vec![];
                }
                self.outcome = LoadState::Error(message.clone());
                self.last_error = Some((message, Instant::now()));
                vec![]
            }

            Action::Refresh => self.force_search(),
            Action::Tick => vec![],
            Action::ClearError => {
                self.last_error = None;
                vec![]
            }
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
        }
    }

    /// Reduce a batch of query actions, then persist and re-fetch once.
    /// Rejected payloads reduce to the same state and produce no effects.
    fn dispatch_all(&mut self, actions: Vec<QueryAction>) -> Vec<Effect> {
        let mut next = self.query.clone();
        for action in &actions {
            next = next.reduce(action);
        }
        if next == self.query {
            return vec![];
        }
        self.query = next;

        // Persistence is unconditional on state change, even while the
        // query itself is failing; retry-by-reload depends on it.
        let mut effects = vec![Effect::PersistQuery(query_string::serialize(&self.query))];

        let params = self.query.search_params();
        if params != self.current_params {
            self.current_params = params;
            self.table_state = TableState::default();
            effects.extend(self.force_search());
        }
        effects
    }

    /// Issue a fresh search for the current parameter set under a new
    /// ticket, superseding any in-flight request.
    fn force_search(&mut self) -> Vec<Effect> {
        if self.assignment.is_none() {
            return vec![];
        }
        self.ticket += 1;
        self.outcome = LoadState::Loading;
        vec![Effect::Search {
            ticket: self.ticket,
            params: self.current_params.clone(),
        }]
    }

    fn toggle_filter_entry(&mut self) -> Vec<Effect> {
        let entries = self.filter_entries();
        let Some(entry) = entries.get(self.filter_cursor) else {
            return vec![];
        };
        let single_select = self
            .filters
            .spec(entry.dimension)
            .is_some_and(|spec| spec.single_select);

        if single_select {
            match &entry.option_key {
                Some(key) => self.filters.select_single(entry.dimension, key),
                None => self.filters.select_all(entry.dimension),
            }
            // Radio dimensions commit immediately on change.
            let action = self.filters.apply_dimension(entry.dimension);
            self.dispatch_all(vec![action])
        } else if let Some(key) = &entry.option_key {
            self.filters.toggle(entry.dimension, key);
            vec![]
        } else {
            vec![]
        }
    }

    pub fn result_count(&self) -> usize {
        self.outcome.data().map_or(0, |page| page.processes.len())
    }

    #[cfg(test)]
    pub(crate) fn current_ticket(&self) -> u64 {
        self.ticket
    }
}
