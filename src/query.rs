//! Canonical worktray query state and its reducer.
//!
//! Every mutating action re-validates its payload against the allowed
//! vocabulary instead of trusting the caller: dispatch payloads may
//! originate from query-string hydration, so the reducer is the last line
//! of defense against a malformed URL corrupting state. Rejected payloads
//! leave the state unchanged.

use std::fmt;

/// Page sizes accepted by the LIMIT action.
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// Lookback windows (in days) accepted by the TIME_PERIOD action, plus the
/// unrestricted sentinel.
pub const TIME_PERIODS: [&str; 6] = ["30", "60", "90", "180", "365", "all"];

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TIME_PERIOD: &str = "30";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    Status,
    TimeLeft,
    State,
    Patch,
    Process,
    Name,
    Address,
}

impl SortOption {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::TimeLeft => "time_left",
            Self::State => "state",
            Self::Patch => "patch",
            Self::Process => "process",
            Self::Name => "name",
            Self::Address => "address",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "status" => Some(Self::Status),
            "time_left" => Some(Self::TimeLeft),
            "state" => Some(Self::State),
            "patch" => Some(Self::Patch),
            "process" => Some(Self::Process),
            "name" => Some(Self::Name),
            "address" => Some(Self::Address),
            _ => None,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Asc,
    Desc,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// The fixed set of filter dimensions committed into query state. The type
/// itself is the "known filter key" check of the FILTER action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Patch,
    ProcessNames,
    Status,
}

impl FilterDimension {
    pub const ALL: [Self; 3] = [Self::Patch, Self::ProcessNames, Self::Status];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::ProcessNames => "processNames",
            Self::Status => "status",
        }
    }
}

/// The canonical, authoritative worktray query state.
///
/// `page_size` and `time_period` are looser than the action vocabulary on
/// purpose: hydration passes raw query-string values through untyped, and
/// only dispatched actions are enum-checked. Filter strings are opaque
/// comma-joined token sets; empty means "not filtered".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub page: u32,
    pub page_size: u32,
    pub time_period: String,
    pub sort: SortOption,
    pub order: OrderBy,
    pub patch: String,
    pub process_names: String,
    pub status: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            time_period: DEFAULT_TIME_PERIOD.to_string(),
            sort: SortOption::Status,
            order: OrderBy::Asc,
            patch: String::new(),
            process_names: String::new(),
            status: String::new(),
        }
    }
}

/// Tagged actions accepted by [`QueryState::reduce`]. Payloads for the
/// enum-guarded actions stay raw so the reducer can reject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction {
    Page(u32),
    Limit(u32),
    TimePeriod(String),
    Sort(String),
    Order(String),
    Filter {
        dimension: FilterDimension,
        value: String,
    },
}

impl QueryState {
    /// Pure transition function. Invalid payloads are silent no-ops; PAGE
    /// deliberately has no bounds check here (the page reconciler owns
    /// that, once the server total is known).
    pub fn reduce(&self, action: &QueryAction) -> Self {
        let mut next = self.clone();
        match action {
            QueryAction::Page(page) => {
                next.page = *page;
            }
            QueryAction::Limit(limit) => {
                if PAGE_SIZES.contains(limit) {
                    next.page_size = *limit;
                }
            }
            QueryAction::TimePeriod(period) => {
                if TIME_PERIODS.contains(&period.as_str()) {
                    next.time_period = period.clone();
                }
            }
            QueryAction::Sort(sort) => {
                if let Some(sort) = SortOption::parse(sort) {
                    next.sort = sort;
                }
            }
            QueryAction::Order(order) => {
                if let Some(order) = OrderBy::parse(order) {
                    next.order = order;
                }
            }
            QueryAction::Filter { dimension, value } => match dimension {
                FilterDimension::Patch => next.patch = value.clone(),
                FilterDimension::ProcessNames => next.process_names = value.clone(),
                FilterDimension::Status => next.status = value.clone(),
            },
        }
        next
    }

    pub fn filter_value(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::Patch => &self.patch,
            FilterDimension::ProcessNames => &self.process_names,
            FilterDimension::Status => &self.status,
        }
    }

    /// The subset of state the search service cares about.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            search_text: self.patch.clone(),
            process_names: self.process_names.clone(),
            status: self.status.clone(),
            page: self.page,
            page_size: self.page_size,
            time_period: self.time_period.clone(),
            sort_by: self.sort,
            is_desc: self.order == OrderBy::Desc,
        }
    }
}

/// Request parameters derived from [`QueryState`]. Equality over the whole
/// struct keys the fetch pipeline: one in-flight request per distinct
/// parameter set, and a response is only applied if its parameter set is
/// still the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub search_text: String,
    pub process_names: String,
    pub status: String,
    pub page: u32,
    pub page_size: u32,
    pub time_period: String,
    pub sort_by: SortOption,
    pub is_desc: bool,
}

impl SearchParams {
    /// Wire query pairs, empty-string values skipped. `is_desc` is the
    /// fixed contract with the search backend: `order=desc` maps to
    /// `isDesc=true`.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(8);
        if !self.search_text.is_empty() {
            pairs.push(("searchText", self.search_text.clone()));
        }
        if !self.process_names.is_empty() {
            pairs.push(("processNames", self.process_names.clone()));
        }
        if !self.status.is_empty() {
            pairs.push(("status", self.status.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("pageSize", self.page_size.to_string()));
        if !self.time_period.is_empty() {
            pairs.push(("timePeriod", self.time_period.clone()));
        }
        pairs.push(("sortBy", self.sort_by.as_str().to_string()));
        pairs.push(("isDesc", self.is_desc.to_string()));
        pairs
    }
}

/// Page count implied by a server-reported total: `ceil(total / page_size)`
/// when there are results, zero otherwise.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if total == 0 || page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

/// The page-reconciliation rule: if the active page fell beyond the range
/// implied by the latest total, the corrective PAGE payload. `None` means
/// the state is already consistent, which is what makes reconciliation
/// idempotent.
pub fn reconcile_page(page: u32, total: u64, page_size: u32) -> Option<u32> {
    let pages = total_pages(total, page_size);
    if pages > 0 && page > pages {
        Some(pages)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_dispatch_is_unbounded() {
        let state = QueryState::default();
        let next = state.reduce(&QueryAction::Page(100));
        assert_eq!(next.page, 100);
    }

    #[test]
    fn limit_accepts_known_sizes() {
        let state = QueryState::default();
        let next = state.reduce(&QueryAction::Limit(25));
        assert_eq!(next.page_size, 25);
    }

    #[test]
    fn limit_rejects_unknown_sizes() {
        let state = QueryState::default();
        let next = state.reduce(&QueryAction::Limit(14));
        assert_eq!(next.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn time_period_rejects_unknown_windows() {
        let state = QueryState::default();
        let next = state.reduce(&QueryAction::TimePeriod("100".into()));
        assert_eq!(next.time_period, DEFAULT_TIME_PERIOD);

        let next = state.reduce(&QueryAction::TimePeriod("all".into()));
        assert_eq!(next.time_period, "all");
    }

    #[test]
    fn sort_rejects_unknown_keys() {
        let state = QueryState::default();
        let next = state.reduce(&QueryAction::Sort("street".into()));
        assert_eq!(next.sort, SortOption::Status);

        let next = state.reduce(&QueryAction::Sort("time_left".into()));
        assert_eq!(next.sort, SortOption::TimeLeft);
    }

    #[test]
    fn order_rejects_unknown_directions() {
        let state = QueryState::default();
        let next = state.reduce(&QueryAction::Order("name".into()));
        assert_eq!(next.order, OrderBy::Asc);

        let next = state.reduce(&QueryAction::Order("desc".into()));
        assert_eq!(next.order, OrderBy::Desc);
    }

    #[test]
    fn filter_sets_the_named_dimension() {
        let state = QueryState::default();
        let next = state.reduce(&QueryAction::Filter {
            dimension: FilterDimension::Patch,
            value: "CP1,CP2".into(),
        });
        assert_eq!(next.patch, "CP1,CP2");
        assert_eq!(next.process_names, "");
    }

    #[test]
    fn rejected_actions_leave_state_identical() {
        let state = QueryState::default();
        for action in [
            QueryAction::Limit(14),
            QueryAction::TimePeriod("7".into()),
            QueryAction::Sort("street".into()),
            QueryAction::Order("sideways".into()),
        ] {
            assert_eq!(state.reduce(&action), state);
        }
    }

    #[test]
    fn search_params_map_order_to_is_desc() {
        let mut state = QueryState::default();
        assert!(!state.search_params().is_desc);
        state.order = OrderBy::Desc;
        assert!(state.search_params().is_desc);
    }

    #[test]
    fn query_pairs_skip_empty_filters() {
        let state = QueryState::default();
        let pairs = state.search_params().to_query_pairs();
        assert!(pairs.iter().all(|(key, _)| *key != "searchText"));
        assert!(pairs.iter().any(|(key, value)| *key == "page" && value == "1"));
        assert!(pairs
            .iter()
            .any(|(key, value)| *key == "sortBy" && value == "status"));
    }

    #[test]
    fn reconcile_snaps_page_back_and_is_idempotent() {
        // 40 results at 10 per page: 4 pages.
        assert_eq!(reconcile_page(100, 40, 10), Some(4));
        assert_eq!(reconcile_page(4, 40, 10), None);
    }

    #[test]
    fn reconcile_ignores_empty_totals() {
        assert_eq!(reconcile_page(7, 0, 10), None);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(41, 10), 5);
    }

    #[test]
    fn page_count_saturates_on_huge_totals() {
        assert_eq!(total_pages(u64::MAX, 10), u32::MAX);
        assert_eq!(reconcile_page(1, u64::MAX, 10), None);
    }
}
