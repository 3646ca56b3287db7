//! Query-string hydration and persistence for the worktray state.
//!
//! Hydration passes raw values through untyped; anything that later fails
//! reducer validation is coerced by the reducer, not here. Serialization
//! omits defaulted fields to keep the persisted string minimal, and the
//! two directions round-trip for every state reachable through the
//! documented parameter set.

use std::collections::HashMap;

use crate::query::{OrderBy, QueryState, SortOption, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Parse a persisted query string (with or without the leading `?`) into
/// an initial [`QueryState`]. `default_patch` is the resolved patch of the
/// signed-in staff member, used when the string carries no `patch` value.
pub fn hydrate(query: &str, default_patch: Option<&str>) -> QueryState {
    let params = parse_query(query.strip_prefix('?').unwrap_or(query));
    let defaults = QueryState::default();

    let page = params
        .get("p")
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(DEFAULT_PAGE);

    let page_size = params
        .get("l")
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|&l| l > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let time_period = params
        .get("t")
        .filter(|raw| !raw.is_empty())
        .cloned()
        .unwrap_or(defaults.time_period);

    // Only the two sorts a persisted worktray link can carry are
    // recognized here; everything else falls back to the default.
    let sort = match params.get("sort").map(String::as_str) {
        Some("name") => SortOption::Name,
        _ => SortOption::Status,
    };

    let order = match params.get("o").map(String::as_str) {
        Some("desc") => OrderBy::Desc,
        _ => OrderBy::Asc,
    };

    let patch = params
        .get("patch")
        .filter(|raw| !raw.is_empty())
        .cloned()
        .or_else(|| default_patch.map(str::to_string))
        .unwrap_or_default();

    QueryState {
        page,
        page_size,
        time_period,
        sort,
        order,
        patch,
        process_names: params.get("processNames").cloned().unwrap_or_default(),
        status: params.get("status").cloned().unwrap_or_default(),
    }
}

/// Serialize the committed query state back into a `?`-prefixed string.
/// Omission rules: `p` when on page 1, `l` at the default page size, `o`
/// when ascending, and empty filter strings; `t` and `sort` are always
/// written.
pub fn serialize(state: &QueryState) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if state.page > 1 {
        pairs.push(("p", state.page.to_string()));
    }
    if state.page_size != DEFAULT_PAGE_SIZE {
        pairs.push(("l", state.page_size.to_string()));
    }
    pairs.push(("t", state.time_period.clone()));
    if state.order != OrderBy::Asc {
        pairs.push(("o", state.order.as_str().to_string()));
    }
    pairs.push(("sort", state.sort.as_str().to_string()));
    if !state.patch.is_empty() {
        pairs.push(("patch", state.patch.clone()));
    }
    if !state.process_names.is_empty() {
        pairs.push(("processNames", state.process_names.clone()));
    }
    if !state.status.is_empty() {
        pairs.push(("status", state.status.clone()));
    }

    let query = pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, encode_component(&value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("?{}", query)
}

fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        params.insert(decode_component(key), decode_component(value));
    }
    params
}

fn encode_component(input: &str) -> String {
    let mut out = String::new();
    for b in input.as_bytes() {
        match *b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(*b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn decode_component(input: &str) -> String {
    // Escapes decode to raw bytes first; a multi-byte UTF-8 sequence spans
    // several escapes and only becomes a char once the whole component is
    // decoded.
    let raw = input.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'%' if i + 2 < raw.len() => {
                let hi = (raw[i + 1] as char).to_digit(16);
                let lo = (raw[i + 2] as char).to_digit(16);
                if let (Some(hi), Some(lo)) = (hi, lo) {
                    bytes.push(((hi << 4) + lo) as u8);
                    i += 3;
                } else {
                    bytes.push(b'%');
                    i += 1;
                }
            }
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            byte => {
                bytes.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryAction, PAGE_SIZES};

    #[test]
    fn hydrates_documented_params() {
        let state = hydrate("?p=3&l=40&t=30", None);
        assert_eq!(state.page, 3);
        assert_eq!(state.page_size, 40);
        assert_eq!(state.time_period, "30");
        assert_eq!(state.sort, SortOption::Status);
        assert_eq!(state.order, OrderBy::Asc);
    }

    #[test]
    fn hydration_defaults_when_params_absent() {
        let state = hydrate("", None);
        assert_eq!(state, QueryState::default());

        let state = hydrate("?p=abc&l=0&t=", None);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 10);
        assert_eq!(state.time_period, "30");
    }

    #[test]
    fn hydration_recognizes_name_sort_and_desc_order() {
        let state = hydrate("?sort=name&o=desc", None);
        assert_eq!(state.sort, SortOption::Name);
        assert_eq!(state.order, OrderBy::Desc);

        let state = hydrate("?sort=bogus&o=up", None);
        assert_eq!(state.sort, SortOption::Status);
        assert_eq!(state.order, OrderBy::Asc);
    }

    #[test]
    fn hydration_falls_back_to_the_assigned_patch() {
        let state = hydrate("", Some("patch-7"));
        assert_eq!(state.patch, "patch-7");

        let state = hydrate("?patch=x", Some("patch-7"));
        assert_eq!(state.patch, "x");
    }

    #[test]
    fn round_trips_a_fully_populated_string() {
        let query = "?p=3&l=40&t=30&o=desc&sort=name&patch=x&processNames=y&status=z";
        let state = hydrate(query, None);
        assert_eq!(serialize(&state), query);
    }

    #[test]
    fn default_state_serializes_minimally() {
        assert_eq!(serialize(&QueryState::default()), "?t=30&sort=status");
    }

    #[test]
    fn comma_joined_filters_survive_the_round_trip() {
        let mut state = QueryState::default();
        state.process_names = ",Process 2,process-1".to_string();
        let query = serialize(&state);
        assert_eq!(query, "?t=30&sort=status&processNames=%2CProcess+2%2Cprocess-1");
        assert_eq!(hydrate(&query, None), state);
    }

    #[test]
    fn non_ascii_filter_values_survive_the_round_trip() {
        // Filter tokens come from the API verbatim and can carry accented
        // names; every UTF-8 byte escapes and reassembles.
        let mut state = QueryState::default();
        state.process_names = ",Renté".to_string();
        let query = serialize(&state);
        assert_eq!(query, "?t=30&sort=status&processNames=%2CRent%C3%A9");
        assert_eq!(hydrate(&query, None), state);
    }

    #[test]
    fn truncated_escapes_decode_to_their_literal_bytes() {
        let state = hydrate("?status=100%25&patch=50%2", None);
        assert_eq!(state.status, "100%");
        assert_eq!(state.patch, "50%2");
    }

    #[test]
    fn hydrated_values_stay_raw_until_the_reducer_rejects_them() {
        // l=40 is not a dispatchable page size, but hydration keeps it and
        // serialization writes it back out.
        let state = hydrate("?l=40&t=30", None);
        assert!(!PAGE_SIZES.contains(&state.page_size));
        assert_eq!(serialize(&state), "?l=40&t=30&sort=status");

        // A later LIMIT dispatch is still enum-guarded.
        let next = state.reduce(&QueryAction::Limit(25));
        assert_eq!(next.page_size, 25);
    }
}
