use std::collections::HashMap;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::storage;
use crate::types::{Session, SessionLogEntry, SessionMessage, SessionToolLog};
use crate::util;

/// Whole-store shape as persisted: sessions keyed by id, the display order
/// of those ids, and the id the playground is currently bound to.
///
/// Invariants: `order` holds exactly the keys of `map`, without duplicates,
/// and `current_id` is either `None` or a key of `map`. Every operation
/// below preserves them; `storage::decode` restores them on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default, deserialize_with = "crate::types::map_or_empty")]
    pub map: HashMap<String, Session>,
    #[serde(default, deserialize_with = "crate::types::vec_or_empty")]
    pub order: Vec<String>,
    #[serde(default, deserialize_with = "crate::types::string_or_none")]
    pub current_id: Option<String>,
}

fn blank_session(id: &str, name: String, now: &str) -> Session {
    Session {
        id: id.to_string(),
        name,
        created_at: now.to_string(),
        updated_at: now.to_string(),
        messages: Vec::new(),
        tools: Vec::new(),
        logs: Vec::new(),
    }
}

impl SessionState {
    /// Insert a fresh session at the end of the order and make it current.
    /// An id collision only re-selects the existing session, so a misbehaving
    /// id generator cannot corrupt the order list.
    pub fn create(&mut self, id: &str, name: Option<String>, now: &str) {
        if !self.map.contains_key(id) {
            let name = name.unwrap_or_else(|| format!("Session {}", self.order.len() + 1));
            self.map.insert(id.to_string(), blank_session(id, name, now));
            self.order.push(id.to_string());
        }
        self.current_id = Some(id.to_string());
    }

    /// Insert an empty session under a caller-supplied id if absent, leaving
    /// the current selection untouched. Used to adopt session ids the
    /// gateway assigned on its side. Returns whether anything was inserted.
    pub fn ensure(&mut self, id: &str, now: &str) -> bool {
        if id.is_empty() || self.map.contains_key(id) {
            return false;
        }
        let name = format!("Session {}", self.order.len() + 1);
        self.map.insert(id.to_string(), blank_session(id, name, now));
        self.order.push(id.to_string());
        true
    }

    /// Point the current selection at `id`. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.map.contains_key(id) || self.current_id.as_deref() == Some(id) {
            return false;
        }
        self.current_id = Some(id.to_string());
        true
    }

    /// Drop a session. When the current session is deleted, selection moves
    /// to the first remaining id in order, or clears entirely.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.map.remove(id).is_none() {
            return false;
        }
        self.order.retain(|entry| entry != id);
        if self.current_id.as_deref() == Some(id) {
            self.current_id = self.order.first().cloned();
        }
        true
    }

    /// Destroy every session. Irreversible.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn rename(&mut self, id: &str, name: &str, now: &str) -> bool {
        let Some(session) = self.map.get_mut(id) else {
            return false;
        };
        if session.name == name {
            return false;
        }
        session.name = name.to_string();
        session.updated_at = now.to_string();
        true
    }

    pub fn push_message(&mut self, id: &str, message: SessionMessage, now: &str) -> bool {
        let Some(session) = self.map.get_mut(id) else {
            return false;
        };
        session.messages.push(message);
        session.updated_at = now.to_string();
        true
    }

    /// Append a batch of tool logs. An empty batch is a strict no-op.
    pub fn push_tool_logs(&mut self, id: &str, logs: Vec<SessionToolLog>, now: &str) -> bool {
        if logs.is_empty() {
            return false;
        }
        let Some(session) = self.map.get_mut(id) else {
            return false;
        };
        session.tools.extend(logs);
        session.updated_at = now.to_string();
        true
    }

    /// Append a batch of diagnostic log entries. An empty batch is a strict
    /// no-op.
    pub fn push_log_entries(
        &mut self,
        id: &str,
        entries: Vec<SessionLogEntry>,
        now: &str,
    ) -> bool {
        if entries.is_empty() {
            return false;
        }
        let Some(session) = self.map.get_mut(id) else {
            return false;
        };
        session.logs.extend(entries);
        session.updated_at = now.to_string();
        true
    }

    /// Sessions in display order, recomputed on every read. Ids that fail to
    /// resolve are skipped defensively.
    pub fn sessions(&self) -> Vec<&Session> {
        self.order.iter().filter_map(|id| self.map.get(id)).collect()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current_id.as_deref().and_then(|id| self.map.get(id))
    }
}

/// Reactive handle to the session store. Cheap to copy into closures, like
/// a signal. Construct one explicitly and hand it to consumers through
/// context; nothing here is a process-wide singleton, so tests can run any
/// number of independent stores.
///
/// Every mutation that actually changes state is written through to local
/// storage, one write per mutation.
#[derive(Clone, Copy)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
    persist: bool,
}

impl SessionStore {
    /// Rehydrate from local storage; subsequent changes are persisted.
    pub fn load() -> Self {
        Self {
            state: RwSignal::new(storage::load()),
            persist: true,
        }
    }

    /// Empty store that never touches local storage.
    pub fn ephemeral() -> Self {
        Self {
            state: RwSignal::new(SessionState::default()),
            persist: false,
        }
    }

    fn apply(&self, transition: impl FnOnce(&mut SessionState) -> bool) {
        let mut changed = false;
        self.state.update(|state| changed = transition(state));
        if changed && self.persist {
            self.state.with_untracked(storage::save);
        }
    }

    /// Create a session with a generated id and select it. Ids come from
    /// `crypto.randomUUID` when the browser offers it, else a
    /// timestamp+random composite; either way uniqueness is probabilistic,
    /// not guaranteed.
    pub fn create_session(&self, name: Option<String>) -> String {
        let id = util::generate_id("session");
        let now = util::now_iso();
        {
            let id = id.clone();
            self.apply(move |state| {
                state.create(&id, name, &now);
                true
            });
        }
        id
    }

    /// Make sure `id` exists, without changing the current selection.
    pub fn adopt_session(&self, id: &str) {
        let now = util::now_iso();
        let id = id.to_string();
        self.apply(move |state| state.ensure(&id, &now));
    }

    pub fn select_session(&self, id: &str) {
        let id = id.to_string();
        self.apply(move |state| state.select(&id));
    }

    pub fn delete_session(&self, id: &str) {
        let id = id.to_string();
        self.apply(move |state| state.remove(&id));
    }

    pub fn reset_sessions(&self) {
        self.apply(|state| {
            state.clear();
            true
        });
    }

    pub fn rename_session(&self, id: &str, name: &str) {
        let now = util::now_iso();
        let (id, name) = (id.to_string(), name.to_string());
        self.apply(move |state| state.rename(&id, &name, &now));
    }

    pub fn append_message(&self, id: &str, message: SessionMessage) {
        let now = util::now_iso();
        let id = id.to_string();
        self.apply(move |state| state.push_message(&id, message, &now));
    }

    pub fn append_tool_logs(&self, id: &str, logs: Vec<SessionToolLog>) {
        if logs.is_empty() {
            return;
        }
        let now = util::now_iso();
        let id = id.to_string();
        self.apply(move |state| state.push_tool_logs(&id, logs, &now));
    }

    pub fn append_logs(&self, id: &str, entries: Vec<SessionLogEntry>) {
        if entries.is_empty() {
            return;
        }
        let now = util::now_iso();
        let id = id.to_string();
        self.apply(move |state| state.push_log_entries(&id, entries, &now));
    }

    // Reads. Each one tracks the underlying signal when called from a
    // reactive scope, so views recompute as the store changes.

    pub fn sessions(&self) -> Vec<Session> {
        self.state
            .with(|state| state.sessions().into_iter().cloned().collect())
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.with(|state| state.current().cloned())
    }

    pub fn current_id(&self) -> Option<String> {
        self.state.with(|state| state.current_id.clone())
    }

    pub fn session(&self, id: &str) -> Option<Session> {
        self.state.with(|state| state.map.get(id).cloned())
    }
}
