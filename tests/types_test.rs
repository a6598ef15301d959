use mcp_playground::types::{
    ChatRequest, MessageRole, ProviderModel, SessionMessage, SessionToolLog,
};
use serde_json::json;

#[test]
fn message_role_uses_lowercase_wire_names() {
    assert_eq!(serde_json::to_value(MessageRole::User).expect("serialize"), json!("user"));
    assert_eq!(
        serde_json::from_value::<MessageRole>(json!("assistant")).expect("deserialize"),
        MessageRole::Assistant
    );
    assert!(serde_json::from_value::<MessageRole>(json!("robot")).is_err());
}

#[test]
fn session_message_omits_absent_attachments() {
    let message = SessionMessage {
        id: "m1".into(),
        role: MessageRole::System,
        content: "Failed to send prompt: timeout".into(),
        timestamp: "2026-08-04T10:00:00.000Z".into(),
        attachments: None,
    };
    let value = serde_json::to_value(&message).expect("serialize");
    assert!(value.get("attachments").is_none());
    assert_eq!(value["role"], "system");
}

#[test]
fn tool_log_round_trips_opaque_payloads() {
    let log = SessionToolLog {
        id: "t1".into(),
        tool: "search".into(),
        success: true,
        message: None,
        input: json!({"q": "rust", "limit": 3}),
        output: json!([{"title": "The Book"}]),
        timestamp: "2026-08-04T10:00:00.000Z".into(),
    };
    let value = serde_json::to_value(&log).expect("serialize");
    let back: SessionToolLog = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, log);
}

#[test]
fn provider_model_label_falls_back_to_name() {
    let bare = ProviderModel { name: "gemma3:4b".into(), display_name: None };
    assert_eq!(bare.label(), "gemma3:4b");

    let named = ProviderModel {
        name: "gemma3:4b".into(),
        display_name: Some("Gemma 3 4B".into()),
    };
    assert_eq!(named.label(), "Gemma 3 4B");
}

#[test]
fn chat_request_omits_unset_optionals() {
    let request = ChatRequest {
        prompt: "hi".into(),
        session_id: "s1".into(),
        agent: true,
        max_tool_steps: None,
        provider: None,
        model: None,
    };
    let value = serde_json::to_value(&request).expect("serialize");
    assert_eq!(value["prompt"], "hi");
    assert_eq!(value["session_id"], "s1");
    assert_eq!(value["agent"], true);
    assert!(value.get("max_tool_steps").is_none());
    assert!(value.get("provider").is_none());
    assert!(value.get("model").is_none());
}
