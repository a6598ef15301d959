use mcp_playground::state::SessionState;
use mcp_playground::storage::{decode, encode};
use mcp_playground::types::{MessageAttachment, MessageRole, SessionMessage};
use serde_json::json;

const T0: &str = "2026-08-04T10:00:00.000Z";
const T1: &str = "2026-08-04T10:00:01.000Z";

fn session_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Session {id}"),
        "createdAt": T0,
        "updatedAt": T0,
        "messages": [],
        "tools": [],
        "logs": [],
    })
}

#[test]
fn decode_recovers_empty_state_from_garbage() {
    for raw in ["{}", "null", "not json at all", r#"{"map":"not-an-object"}"#] {
        let state = decode(raw);
        assert_eq!(state, SessionState::default(), "input: {raw}");
    }
}

#[test]
fn decode_defaults_each_top_level_field_independently() {
    let raw = json!({
        "map": {"a": session_json("a")},
        "order": "not-a-list",
        "currentId": 42,
    })
    .to_string();

    let state = decode(&raw);
    // The mistyped order degrades to empty, then reconciliation re-appends
    // the surviving session; the mistyped current id degrades to none.
    assert_eq!(state.order, vec!["a"]);
    assert!(state.current_id.is_none());
    assert_eq!(state.map.len(), 1);
}

#[test]
fn round_trip_preserves_well_formed_state() {
    let mut state = SessionState::default();
    state.create("a", Some("First".to_string()), T0);
    state.create("b", None, T0);
    state.push_message(
        "a",
        SessionMessage {
            id: "m1".into(),
            role: MessageRole::User,
            content: "Hello".into(),
            timestamp: T1.into(),
            attachments: Some(vec![MessageAttachment {
                id: "att-1".into(),
                filename: "notes.txt".into(),
                mime_type: "text/plain".into(),
                data: "aGVsbG8=".into(),
            }]),
        },
        T1,
    );
    state.select("a");

    let decoded = decode(&encode(&state));
    assert_eq!(decoded, state);
}

#[test]
fn non_array_list_fields_normalize_to_empty() {
    let raw = json!({
        "map": {
            "a": {
                "id": "a",
                "name": "Damaged",
                "createdAt": T0,
                "updatedAt": T0,
                "messages": "nope",
                "tools": 42,
                "logs": {"oops": true},
            }
        },
        "order": ["a"],
        "currentId": "a",
    })
    .to_string();

    let state = decode(&raw);
    let session = &state.map["a"];
    assert!(session.messages.is_empty());
    assert!(session.tools.is_empty());
    assert!(session.logs.is_empty());
    assert_eq!(state.current_id.as_deref(), Some("a"));
}

#[test]
fn unparseable_list_elements_are_dropped() {
    let raw = json!({
        "map": {
            "a": {
                "id": "a",
                "name": "Mixed",
                "createdAt": T0,
                "updatedAt": T0,
                "messages": [
                    {"id": "m1", "role": "user", "content": "hi", "timestamp": T1},
                    "garbage",
                    {"role": 12},
                ],
                "tools": [],
                "logs": [],
            }
        },
        "order": ["a"],
        "currentId": "a",
    })
    .to_string();

    let state = decode(&raw);
    let session = &state.map["a"];
    assert_eq!(session.messages.len(), 1);
    assert_eq!(session.messages[0].content, "hi");
}

#[test]
fn bad_attachment_lists_degrade_to_absent() {
    let raw = json!({
        "map": {
            "a": {
                "id": "a",
                "name": "Attachments",
                "createdAt": T0,
                "updatedAt": T0,
                "messages": [
                    {
                        "id": "m1",
                        "role": "user",
                        "content": "hi",
                        "timestamp": T1,
                        "attachments": "not-a-list",
                    },
                ],
                "tools": [],
                "logs": [],
            }
        },
        "order": ["a"],
        "currentId": null,
    })
    .to_string();

    let state = decode(&raw);
    assert!(state.map["a"].messages[0].attachments.is_none());
}

#[test]
fn reconciliation_repairs_order_and_current_id() {
    let raw = json!({
        "map": {
            "a": session_json("a"),
            "b": {
                "id": "b",
                "name": "Later",
                "createdAt": T1,
                "updatedAt": T1,
                "messages": [],
                "tools": [],
                "logs": [],
            },
        },
        // Duplicate entry, unknown id, and a session ("b") missing entirely.
        "order": ["a", "ghost", "a"],
        "currentId": "ghost",
    })
    .to_string();

    let state = decode(&raw);
    assert_eq!(state.order, vec!["a", "b"]);
    assert!(state.current_id.is_none());
}

#[test]
fn session_id_is_forced_to_its_map_key() {
    let raw = json!({
        "map": {"a": session_json("something-else")},
        "order": ["a"],
        "currentId": "a",
    })
    .to_string();

    let state = decode(&raw);
    assert_eq!(state.map["a"].id, "a");
}

#[test]
fn entries_without_a_session_shape_are_dropped() {
    let raw = json!({
        "map": {
            "a": session_json("a"),
            "b": null,
            "c": "just a string",
        },
        "order": ["a", "b", "c"],
        "currentId": "c",
    })
    .to_string();

    let state = decode(&raw);
    assert_eq!(state.map.len(), 1);
    assert_eq!(state.order, vec!["a"]);
    assert!(state.current_id.is_none());
}
