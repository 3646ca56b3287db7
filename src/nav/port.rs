//! Navigation and session-slot ports.
//!
//! The core never touches a global location; it reads and pushes query
//! strings through [`Navigator`], and mirrors them into a named session
//! slot through [`SessionStore`] so a later URL-less re-entry restores the
//! last-used worktray state.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub trait Navigator {
    /// The query string of the current location (may be empty).
    fn read_query(&self) -> String;
    /// Push a new query string as the current navigable location.
    fn push_query(&mut self, query: &str);
}

/// History-keeping navigator; the production TUI has no browser location,
/// so "navigation" is this process-local history.
#[derive(Debug, Default)]
pub struct InMemoryNavigator {
    history: Vec<String>,
}

impl InMemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: vec![initial.into()],
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Navigator for InMemoryNavigator {
    fn read_query(&self) -> String {
        self.history.last().cloned().unwrap_or_default()
    }

    fn push_query(&mut self, query: &str) {
        self.history.push(query.to_string());
    }
}

pub trait SessionStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// Startup query precedence: an explicit query wins, then the session
/// slot, then defaults (the empty string). This is what makes a URL-less
/// re-entry restore the last-used worktray state.
pub fn initial_query(explicit: Option<String>, session: &dyn SessionStore, key: &str) -> String {
    explicit
        .or_else(|| session.load(key))
        .unwrap_or_default()
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slots: HashMap<String, String>,
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.slots.insert(key.to_string(), value.to_string());
    }
}

/// Session slots persisted as one small file per key. Write failures are
/// logged and swallowed; losing the slot must not take down the worktray.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the user's state directory (cache as fallback).
    pub fn for_user() -> Option<Self> {
        let base = dirs::state_dir().or_else(dirs::cache_dir)?;
        Some(Self::new(base.join("worktray")))
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.query", key))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Option<String> {
        let raw = fs::read_to_string(self.slot_path(key)).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(self.slot_path(key), value))
        {
            tracing::warn!(%err, key, "failed to persist session slot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigator_keeps_history_and_serves_the_latest_entry() {
        let mut nav = InMemoryNavigator::new("?t=30&sort=status");
        nav.push_query("?p=2&t=30&sort=status");
        assert_eq!(nav.read_query(), "?p=2&t=30&sort=status");
        assert_eq!(nav.history().len(), 2);
    }

    #[test]
    fn url_less_re_entry_restores_the_session_slot() {
        let mut store = InMemorySessionStore::default();
        store.save("worktray", "?p=2&t=60&sort=status");

        let query = initial_query(None, &store, "worktray");
        assert_eq!(query, "?p=2&t=60&sort=status");

        let state = crate::nav::hydrate(&query, None);
        assert_eq!(state.page, 2);
        assert_eq!(state.time_period, "60");
    }

    #[test]
    fn explicit_query_overrides_the_session_slot() {
        let mut store = InMemorySessionStore::default();
        store.save("worktray", "?p=2&t=60&sort=status");

        let query = initial_query(Some("?p=5&t=30&sort=name".to_string()), &store, "worktray");
        assert_eq!(query, "?p=5&t=30&sort=name");

        // An unused slot falls through to defaults.
        assert_eq!(initial_query(None, &store, "other"), "");
    }

    #[test]
    fn file_store_round_trips_a_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileSessionStore::new(dir.path().join("slots"));
        assert_eq!(store.load("worktray"), None);
        store.save("worktray", "?p=3&t=30&sort=status");
        assert_eq!(
            store.load("worktray").as_deref(),
            Some("?p=3&t=30&sort=status")
        );
    }
}
