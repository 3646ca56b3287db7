use crate::domain::SearchPage;
use crate::query::{FilterDimension, QueryAction, SearchParams};

#[derive(Debug, Clone)]
pub enum Action {
    /// The only mutation surface over the query state: a dispatched
    /// reducer action.
    Query(QueryAction),

    // Result table navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,
    NextPage,
    PrevPage,

    // Filter panel
    OpenFilters,
    FilterCursorUp,
    FilterCursorDown,
    FilterToggle,
    FilterSelectAll(FilterDimension),
    FilterRemoveAll(FilterDimension),
    ApplyFilters,
    ClearFilters,

    // UI
    ToggleHelp,
    CloseOverlay,

    // Data responses (tagged with the fetch ticket that produced them)
    ResultsLoaded { ticket: u64, page: SearchPage },
    FetchFailed { ticket: u64, message: String },

    // App control
    Refresh,
    Tick,
    ClearError,
    Quit,
}

/// Side effects requested by the state container; the event loop carries
/// them out.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Issue a search for the given parameter set. The ticket comes back
    /// in the response action and stale tickets are dropped.
    Search { ticket: u64, params: SearchParams },
    /// Push the serialized query string to the navigator and, when a
    /// session key is configured, mirror it into the session slot.
    PersistQuery(String),
    Quit,
}
