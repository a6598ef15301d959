use mcp_playground::api::error_message;
use mcp_playground::types::{ChatResponse, ConfigFileResponse};
use serde_json::json;

#[test]
fn error_message_prefers_the_json_error_field() {
    let body = json!({"error": "model not found"});
    assert_eq!(error_message(Some(&body), "Bad Request"), "model not found");
}

#[test]
fn error_message_falls_back_to_status_text() {
    let body = json!({"detail": "something else"});
    assert_eq!(error_message(Some(&body), "Bad Request"), "Bad Request");
    assert_eq!(error_message(None, "Internal Server Error"), "Internal Server Error");
}

#[test]
fn error_message_ignores_blank_error_fields() {
    let body = json!({"error": ""});
    assert_eq!(error_message(Some(&body), "Bad Gateway"), "Bad Gateway");
}

#[test]
fn error_message_has_a_generic_last_resort() {
    assert_eq!(error_message(None, ""), "Request failed.");
}

#[test]
fn chat_response_fills_optional_fields_with_defaults() {
    let response: ChatResponse =
        serde_json::from_value(json!({"session_id": "srv-1", "content": "hello"}))
            .expect("deserialize ChatResponse");
    assert_eq!(response.session_id, "srv-1");
    assert_eq!(response.content, "hello");
    assert!(response.tool_steps.is_empty());
    assert!(response.provider.is_none());
    assert!(response.model.is_none());
    assert!(response.logs.is_empty());
}

#[test]
fn chat_response_requires_a_session_id() {
    let result = serde_json::from_value::<ChatResponse>(json!({"content": "hello"}));
    assert!(result.is_err());
}

#[test]
fn chat_response_parses_tool_steps_and_logs() {
    let response: ChatResponse = serde_json::from_value(json!({
        "session_id": "srv-1",
        "content": "done",
        "tool_steps": [
            {"tool": "search", "success": true, "input": {"q": "rust"}, "output": {"hits": 3}},
            {"tool": "fetch", "success": false, "message": "timed out"},
        ],
        "provider": "ollama",
        "model": "gemma3:4b",
        "logs": ["resolving provider", "calling model"],
    }))
    .expect("deserialize ChatResponse");

    assert_eq!(response.tool_steps.len(), 2);
    assert_eq!(response.tool_steps[0].tool, "search");
    assert!(response.tool_steps[0].success);
    assert_eq!(response.tool_steps[1].message.as_deref(), Some("timed out"));
    assert_eq!(response.provider.as_deref(), Some("ollama"));
    assert_eq!(response.logs.len(), 2);
}

#[test]
fn config_response_tolerates_missing_fields() {
    let config: ConfigFileResponse =
        serde_json::from_value(json!({"model": "gemma3:4b"})).expect("deserialize config");
    assert_eq!(config.model, "gemma3:4b");
    assert!(config.system_prompt.is_none());
    assert!(config.providers.is_empty());
    assert!(config.tools.is_empty());
    assert!(config.raw.is_empty());
}
