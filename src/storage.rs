use std::collections::HashSet;

use crate::state::SessionState;

/// Fixed local-storage key for the serialized session store.
pub const STORAGE_KEY: &str = "mcp-playground.sessions";

/// Read the persisted store. An absent key, unreadable JSON, or misshapen
/// data all degrade to the empty state; this never surfaces an error.
pub fn load() -> SessionState {
    match read_raw() {
        Some(raw) => decode(&raw),
        None => SessionState::default(),
    }
}

/// Serialize the full state and overwrite the stored blob. Best effort: a
/// failed write (quota, storage unavailable) is logged and swallowed, and
/// the in-memory state stays authoritative.
pub fn save(state: &SessionState) {
    let Some(storage) = local_storage() else {
        return;
    };
    if storage.set_item(STORAGE_KEY, &encode(state)).is_err() {
        log::warn!("failed to persist sessions to local storage");
    }
}

pub fn encode(state: &SessionState) -> String {
    serde_json::to_string(state).unwrap_or_else(|_| "{}".to_string())
}

/// Parse a stored blob, normalizing malformed fields instead of failing.
/// Unparseable input yields the empty state.
pub fn decode(raw: &str) -> SessionState {
    let state = serde_json::from_str::<SessionState>(raw).unwrap_or_default();
    reconcile(state)
}

/// Restore the order/map/currentId invariants after lenient parsing: the
/// order list keeps only known ids (first occurrence wins), sessions missing
/// from it are re-appended sorted by creation time then id, and a current id
/// that names no session resets to none.
fn reconcile(mut state: SessionState) -> SessionState {
    let mut seen: HashSet<String> = HashSet::new();
    let map = &state.map;
    state
        .order
        .retain(|id| map.contains_key(id) && seen.insert(id.clone()));

    let mut missing: Vec<_> = state
        .map
        .iter()
        .filter(|(id, _)| !seen.contains(id.as_str()))
        .collect();
    missing.sort_by(|(id_a, a), (id_b, b)| {
        a.created_at.cmp(&b.created_at).then_with(|| id_a.cmp(id_b))
    });
    let missing: Vec<String> = missing.into_iter().map(|(id, _)| id.clone()).collect();
    state.order.extend(missing);

    if let Some(current) = state.current_id.as_deref() {
        if !state.map.contains_key(current) {
            state.current_id = None;
        }
    }
    state
}

fn read_raw() -> Option<String> {
    local_storage()?.get_item(STORAGE_KEY).ok()?
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
