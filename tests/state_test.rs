use std::collections::HashSet;

use mcp_playground::state::SessionState;
use mcp_playground::types::{MessageRole, SessionLogEntry, SessionMessage, SessionToolLog};
use serde_json::json;

const T0: &str = "2026-08-04T10:00:00.000Z";
const T1: &str = "2026-08-04T10:00:01.000Z";
const T2: &str = "2026-08-04T10:00:02.000Z";

fn message(id: &str, role: MessageRole, content: &str, at: &str) -> SessionMessage {
    SessionMessage {
        id: id.into(),
        role,
        content: content.into(),
        timestamp: at.into(),
        attachments: None,
    }
}

fn tool_log(id: &str, tool: &str, at: &str) -> SessionToolLog {
    SessionToolLog {
        id: id.into(),
        tool: tool.into(),
        success: true,
        message: None,
        input: json!({"q": "rust"}),
        output: json!({"hits": 1}),
        timestamp: at.into(),
    }
}

fn assert_invariants(state: &SessionState) {
    assert_eq!(state.order.len(), state.map.len());
    for id in &state.order {
        assert!(state.map.contains_key(id), "order entry {id} missing from map");
    }
    let unique: HashSet<_> = state.order.iter().collect();
    assert_eq!(unique.len(), state.order.len(), "order contains duplicates");
    if let Some(current) = state.current_id.as_deref() {
        assert!(
            state.map.contains_key(current),
            "current id {current} points at no session"
        );
    }
}

#[test]
fn create_and_delete_keep_order_and_map_in_step() {
    let mut state = SessionState::default();
    assert_invariants(&state);

    for id in ["a", "b", "c", "d"] {
        state.create(id, None, T0);
        assert_invariants(&state);
    }
    assert_eq!(state.order, vec!["a", "b", "c", "d"]);

    state.remove("b");
    assert_invariants(&state);
    state.remove("b");
    assert_invariants(&state);
    state.create("e", None, T1);
    assert_invariants(&state);
    state.remove("a");
    state.remove("e");
    state.remove("c");
    state.remove("d");
    assert_invariants(&state);
    assert!(state.order.is_empty());
    assert!(state.current_id.is_none());
}

#[test]
fn create_defaults_name_from_position() {
    let mut state = SessionState::default();
    state.create("a", None, T0);
    state.create("b", None, T0);
    assert_eq!(state.map["a"].name, "Session 1");
    assert_eq!(state.map["b"].name, "Session 2");

    state.create("c", Some("Named".to_string()), T0);
    assert_eq!(state.map["c"].name, "Named");

    state.remove("a");
    state.create("d", None, T1);
    assert_eq!(state.map["d"].name, "Session 3");
}

#[test]
fn create_selects_the_new_session() {
    let mut state = SessionState::default();
    state.create("a", None, T0);
    state.create("b", None, T0);
    assert_eq!(state.current_id.as_deref(), Some("b"));

    // Colliding id re-selects without duplicating the order entry.
    state.create("a", None, T1);
    assert_eq!(state.current_id.as_deref(), Some("a"));
    assert_eq!(state.order, vec!["a", "b"]);
    assert_invariants(&state);
}

#[test]
fn push_message_on_unknown_id_is_a_noop() {
    let mut state = SessionState::default();
    state.create("a", None, T0);
    let before = state.clone();

    let changed = state.push_message("missing", message("m1", MessageRole::User, "hi", T1), T1);
    assert!(!changed);
    assert_eq!(state, before);
}

#[test]
fn select_on_unknown_id_is_a_noop() {
    let mut state = SessionState::default();
    state.create("a", None, T0);
    let before = state.clone();

    assert!(!state.select("missing"));
    assert_eq!(state, before);
}

#[test]
fn deleting_current_selects_first_remaining() {
    let mut state = SessionState::default();
    state.create("a", None, T0);
    state.create("b", None, T0);
    state.create("c", None, T0);
    assert!(state.select("b"));

    assert!(state.remove("b"));
    assert_eq!(state.current_id.as_deref(), Some("a"));

    state.remove("a");
    state.remove("c");
    assert!(state.current_id.is_none());
}

#[test]
fn deleting_a_non_current_session_keeps_selection() {
    let mut state = SessionState::default();
    state.create("a", None, T0);
    state.create("b", None, T0);
    assert!(state.remove("a"));
    assert_eq!(state.current_id.as_deref(), Some("b"));
}

#[test]
fn rename_bumps_updated_at_only_on_change() {
    let mut state = SessionState::default();
    state.create("a", None, T0);

    assert!(!state.rename("a", "Session 1", T1));
    assert_eq!(state.map["a"].updated_at, T0);

    assert!(state.rename("a", "Renamed", T1));
    assert_eq!(state.map["a"].name, "Renamed");
    assert_eq!(state.map["a"].updated_at, T1);

    assert!(!state.rename("missing", "Renamed", T2));
}

#[test]
fn conversation_appends_in_order_and_bumps_updated_at() {
    let mut state = SessionState::default();
    state.create("a", None, T0);

    assert!(state.push_message("a", message("m1", MessageRole::User, "Hello", T1), T1));
    assert!(state.push_message("a", message("m2", MessageRole::Assistant, "Hi there", T2), T2));

    let session = &state.map["a"];
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].content, "Hello");
    assert_eq!(session.messages[1].content, "Hi there");
    assert!(session.updated_at > session.created_at);
}

#[test]
fn empty_batches_are_strict_noops() {
    let mut state = SessionState::default();
    state.create("a", None, T0);
    let before = state.clone();

    assert!(!state.push_tool_logs("a", Vec::new(), T1));
    assert!(!state.push_log_entries("a", Vec::new(), T1));
    assert_eq!(state, before);
}

#[test]
fn tool_and_log_batches_append_and_bump() {
    let mut state = SessionState::default();
    state.create("a", None, T0);

    let logs = vec![tool_log("t1", "search", T1), tool_log("t2", "fetch", T1)];
    assert!(state.push_tool_logs("a", logs, T1));
    assert_eq!(state.map["a"].tools.len(), 2);
    assert_eq!(state.map["a"].updated_at, T1);

    let entries = vec![SessionLogEntry {
        id: "l1".into(),
        message: "resolved provider".into(),
        timestamp: T2.into(),
    }];
    assert!(state.push_log_entries("a", entries, T2));
    assert_eq!(state.map["a"].logs.len(), 1);
    assert_eq!(state.map["a"].updated_at, T2);

    assert!(!state.push_tool_logs("missing", vec![tool_log("t3", "search", T2)], T2));
}

#[test]
fn ensure_adopts_unknown_ids_without_selecting() {
    let mut state = SessionState::default();
    state.create("a", None, T0);

    assert!(state.ensure("srv-1", T1));
    assert_eq!(state.current_id.as_deref(), Some("a"));
    assert_eq!(state.order, vec!["a", "srv-1"]);
    assert_invariants(&state);

    assert!(!state.ensure("srv-1", T2));
    assert!(!state.ensure("", T2));
    assert_invariants(&state);
}

#[test]
fn server_assigned_session_id_wins_and_orphans_the_provisional_one() {
    let mut state = SessionState::default();

    // One chat turn where the gateway answers under its own session id.
    state.create("local-1", None, T0);
    assert!(state.push_message("local-1", message("m1", MessageRole::User, "Hello", T0), T0));

    state.ensure("srv-99", T1);
    assert!(state.push_message(
        "srv-99",
        message("m2", MessageRole::Assistant, "Hi there", T1),
        T1,
    ));
    assert!(state.select("srv-99"));

    assert_eq!(state.current_id.as_deref(), Some("srv-99"));
    let orphan = &state.map["local-1"];
    assert_eq!(orphan.messages.len(), 1);
    assert_eq!(orphan.messages[0].role, MessageRole::User);
    let adopted = &state.map["srv-99"];
    assert_eq!(adopted.messages.len(), 1);
    assert_eq!(adopted.messages[0].role, MessageRole::Assistant);
    assert_invariants(&state);
}

#[test]
fn clear_destroys_everything() {
    let mut state = SessionState::default();
    state.create("a", None, T0);
    state.create("b", None, T0);
    state.push_message("a", message("m1", MessageRole::User, "hi", T1), T1);

    state.clear();
    assert_eq!(state, SessionState::default());
}

#[test]
fn derived_views_follow_order_and_selection() {
    let mut state = SessionState::default();
    assert!(state.sessions().is_empty());
    assert!(state.current().is_none());

    state.create("a", None, T0);
    state.create("b", None, T0);
    state.select("a");

    let names: Vec<_> = state.sessions().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Session 1", "Session 2"]);
    assert_eq!(state.current().map(|s| s.id.as_str()), Some("a"));
}
