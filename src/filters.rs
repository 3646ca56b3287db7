//! Pre-commit filter selection.
//!
//! Selections live here until the user applies them; only then are they
//! joined and dispatched as FILTER actions into the query state.
//! Single-select dimensions commit immediately on change, which the panel
//! drives via [`FilterSelection::apply_dimension`].

use std::collections::HashMap;

use crate::query::{FilterDimension, QueryAction, QueryState};

/// Sentinel option key that selects every option of a single-select
/// dimension ("show all").
pub const SHOW_ALL_KEY: &str = "show-all";

#[derive(Debug, Clone)]
pub struct FilterOption {
    pub key: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Static description of one filter dimension: its options and its
/// selection semantics.
#[derive(Debug, Clone)]
pub struct DimensionSpec {
    pub dimension: FilterDimension,
    pub title: String,
    pub options: Vec<FilterOption>,
    /// Radio semantics: exactly one option (or all, via the sentinel).
    pub single_select: bool,
    /// Clearing resets to the full option set instead of empty. Used for
    /// the patch dimension, where "no patches" is not a meaningful state.
    pub default_full: bool,
}

#[derive(Debug, Clone)]
pub struct FilterSelection {
    dimensions: Vec<DimensionSpec>,
    selected: HashMap<FilterDimension, Vec<String>>,
}

impl FilterSelection {
    /// Build a selection model, re-deriving the selected sets from the
    /// committed filter strings of the query state.
    pub fn from_committed(dimensions: Vec<DimensionSpec>, committed: &QueryState) -> Self {
        let mut selected = HashMap::new();
        for spec in &dimensions {
            selected.insert(
                spec.dimension,
                split_committed(committed.filter_value(spec.dimension)),
            );
        }
        Self {
            dimensions,
            selected,
        }
    }

    pub fn dimensions(&self) -> &[DimensionSpec] {
        &self.dimensions
    }

    pub fn spec(&self, dimension: FilterDimension) -> Option<&DimensionSpec> {
        self.dimensions.iter().find(|s| s.dimension == dimension)
    }

    pub fn selected(&self, dimension: FilterDimension) -> &[String] {
        self.selected
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Add the option if absent, remove it if present. Multi-select
    /// dimensions only.
    pub fn toggle(&mut self, dimension: FilterDimension, option_key: &str) {
        let set = self.selected.entry(dimension).or_default();
        if let Some(idx) = set.iter().position(|key| key == option_key) {
            set.remove(idx);
        } else {
            set.push(option_key.to_string());
        }
    }

    /// Replace the set with exactly the chosen option; the show-all
    /// sentinel replaces it with every option of the dimension.
    pub fn select_single(&mut self, dimension: FilterDimension, option_key: &str) {
        if option_key == SHOW_ALL_KEY {
            self.select_all(dimension);
            return;
        }
        self.selected
            .insert(dimension, vec![option_key.to_string()]);
    }

    pub fn select_all(&mut self, dimension: FilterDimension) {
        let all = self
            .spec(dimension)
            .map(|spec| spec.options.iter().map(|o| o.key.clone()).collect())
            .unwrap_or_default();
        self.selected.insert(dimension, all);
    }

    pub fn remove_all(&mut self, dimension: FilterDimension) {
        self.selected.insert(dimension, Vec::new());
    }

    pub fn is_fully_selected(&self, dimension: FilterDimension) -> bool {
        let Some(spec) = self.spec(dimension) else {
            return false;
        };
        !spec.options.is_empty() && self.selected(dimension).len() == spec.options.len()
    }

    /// Whether an option renders as checked. A single-select dimension with
    /// every option selected shows "show all" checked instead of the
    /// individual options, except when there is exactly one option, which
    /// has no meaningful unselected state.
    pub fn is_checked(&self, dimension: FilterDimension, option_key: &str) -> bool {
        let Some(spec) = self.spec(dimension) else {
            return false;
        };
        if spec.single_select && spec.options.len() == 1 {
            return true;
        }
        let selected = self.selected(dimension);
        if spec.single_select && selected.len() == spec.options.len() {
            return false;
        }
        selected.iter().any(|key| key == option_key)
    }

    /// The FILTER action committing one dimension's current selection.
    pub fn apply_dimension(&self, dimension: FilterDimension) -> QueryAction {
        QueryAction::Filter {
            dimension,
            value: join_selected(self.selected(dimension)),
        }
    }

    /// One FILTER action per dimension, committing every selection.
    pub fn apply(&self) -> Vec<QueryAction> {
        self.dimensions
            .iter()
            .map(|spec| self.apply_dimension(spec.dimension))
            .collect()
    }

    /// Reset every dimension (default-full dimensions back to the full
    /// option set, others to empty) and commit the result.
    pub fn clear(&mut self) -> Vec<QueryAction> {
        let dims: Vec<(FilterDimension, bool)> = self
            .dimensions
            .iter()
            .map(|spec| (spec.dimension, spec.default_full))
            .collect();
        for (dimension, default_full) in dims {
            if default_full {
                self.select_all(dimension);
            } else {
                self.remove_all(dimension);
            }
        }
        self.apply()
    }
}

/// Committed filter strings are comma-prefixed joins; an empty selection
/// serializes to the empty string.
fn join_selected(selected: &[String]) -> String {
    if selected.is_empty() {
        return String::new();
    }
    let mut joined = String::new();
    for key in selected {
        joined.push(',');
        joined.push_str(key);
    }
    joined
}

fn split_committed(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Vec<DimensionSpec> {
        vec![
            DimensionSpec {
                dimension: FilterDimension::Patch,
                title: "Patches".into(),
                options: vec![
                    FilterOption::new("CP1", "CP1"),
                    FilterOption::new("CP2", "CP2"),
                    FilterOption::new("CP3", "CP3"),
                ],
                single_select: true,
                default_full: true,
            },
            DimensionSpec {
                dimension: FilterDimension::ProcessNames,
                title: "Processes".into(),
                options: vec![
                    FilterOption::new("A", "Process A"),
                    FilterOption::new("B", "Process B"),
                    FilterOption::new("C", "Process C"),
                ],
                single_select: false,
                default_full: false,
            },
        ]
    }

    fn model() -> FilterSelection {
        FilterSelection::from_committed(dims(), &QueryState::default())
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = model();
        sel.toggle(FilterDimension::ProcessNames, "A");
        assert_eq!(sel.selected(FilterDimension::ProcessNames), ["A"]);
        sel.toggle(FilterDimension::ProcessNames, "A");
        assert!(sel.selected(FilterDimension::ProcessNames).is_empty());
    }

    #[test]
    fn select_all_then_apply_commits_every_option() {
        let mut sel = model();
        sel.select_all(FilterDimension::ProcessNames);
        let action = sel.apply_dimension(FilterDimension::ProcessNames);
        assert_eq!(
            action,
            QueryAction::Filter {
                dimension: FilterDimension::ProcessNames,
                value: ",A,B,C".into(),
            }
        );
    }

    #[test]
    fn clear_empties_ordinary_dimensions_and_refills_default_full_ones() {
        let mut sel = model();
        sel.toggle(FilterDimension::ProcessNames, "A");
        sel.select_single(FilterDimension::Patch, "CP2");

        let actions = sel.clear();
        assert!(actions.contains(&QueryAction::Filter {
            dimension: FilterDimension::Patch,
            value: ",CP1,CP2,CP3".into(),
        }));
        assert!(actions.contains(&QueryAction::Filter {
            dimension: FilterDimension::ProcessNames,
            value: String::new(),
        }));
    }

    #[test]
    fn single_select_replaces_the_set() {
        let mut sel = model();
        sel.select_single(FilterDimension::Patch, "CP1");
        assert_eq!(sel.selected(FilterDimension::Patch), ["CP1"]);
        sel.select_single(FilterDimension::Patch, "CP3");
        assert_eq!(sel.selected(FilterDimension::Patch), ["CP3"]);
    }

    #[test]
    fn show_all_sentinel_selects_every_option() {
        let mut sel = model();
        sel.select_single(FilterDimension::Patch, SHOW_ALL_KEY);
        assert_eq!(sel.selected(FilterDimension::Patch), ["CP1", "CP2", "CP3"]);
        assert!(sel.is_fully_selected(FilterDimension::Patch));
        // Fully-selected radio renders as "show all", not per-option checks.
        assert!(!sel.is_checked(FilterDimension::Patch, "CP1"));
    }

    #[test]
    fn lone_option_is_implicitly_checked() {
        let spec = DimensionSpec {
            dimension: FilterDimension::Patch,
            title: "Patches".into(),
            options: vec![FilterOption::new("CP1", "CP1")],
            single_select: true,
            default_full: true,
        };
        let sel = FilterSelection::from_committed(vec![spec], &QueryState::default());
        assert!(sel.is_checked(FilterDimension::Patch, "CP1"));
    }

    #[test]
    fn selection_rederives_from_committed_strings() {
        let mut state = QueryState::default();
        state.process_names = ",A,C".into();
        let sel = FilterSelection::from_committed(dims(), &state);
        assert_eq!(sel.selected(FilterDimension::ProcessNames), ["A", "C"]);
    }

    #[test]
    fn apply_emits_one_action_per_dimension() {
        let sel = model();
        let actions = sel.apply();
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|action| matches!(
            action,
            QueryAction::Filter { value, .. } if value.is_empty()
        )));
    }
}
