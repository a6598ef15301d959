use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Role of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: String,
    #[serde(
        default,
        deserialize_with = "attachments_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub attachments: Option<Vec<MessageAttachment>>,
}

/// File payload carried by a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttachment {
    pub id: String,
    pub filename: String,
    pub mime_type: String,
    pub data: String,
}

/// Record of one tool invocation made while producing a reply. The payloads
/// are server-defined and open-ended, so they stay untyped JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToolLog {
    pub id: String,
    pub tool: String,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub output: Value,
    pub timestamp: String,
}

/// Free-form diagnostic line emitted by the gateway during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub id: String,
    pub message: String,
    pub timestamp: String,
}

/// One persisted conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    // The map key is canonical; a stored blob missing this field still loads.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub messages: Vec<SessionMessage>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub tools: Vec<SessionToolLog>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub logs: Vec<SessionLogEntry>,
}

/// Tool advertised by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One tool invocation reported inside a chat response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentToolStep {
    pub tool: String,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub output: Value,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub prompt: String,
    pub session_id: String,
    pub agent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tool_steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Reply of `POST /chat`. The echoed `session_id` (and provider/model, when
/// present) are authoritative over whatever the request asked for.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tool_steps: Vec<AgentToolStep>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub logs: Vec<String>,
}

/// Model offered by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderModel {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ProviderModel {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Provider entry from the gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDefinition {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub models: Vec<ProviderModel>,
}

/// Reply of `GET` and `PUT /config-file`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFileResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub default_provider: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub prompt_template: String,
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
    #[serde(default)]
    pub providers: Vec<ProviderDefinition>,
    #[serde(default)]
    pub raw: String,
}

/// Body of `PUT /config-file`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateConfigPayload {
    pub model: String,
    pub default_provider: String,
    pub system_prompt: Option<String>,
    pub prompt_template: String,
}

/// Lenient list field: anything that is not a JSON array becomes empty, and
/// elements that do not parse are dropped instead of poisoning the blob.
pub(crate) fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn attachments_or_none<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<MessageAttachment>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

/// Lenient session map: non-objects become empty, entries that do not look
/// like a session are dropped, and a surviving session's id is forced to its
/// map key so the two can never disagree.
pub(crate) fn map_or_empty<'de, D>(
    deserializer: D,
) -> Result<std::collections::HashMap<String, Session>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(entries) = value else {
        return Ok(std::collections::HashMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(key, entry)| {
            let mut session: Session = serde_json::from_value(entry).ok()?;
            session.id = key.clone();
            Some((key, session))
        })
        .collect())
}

pub(crate) fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(id) => Ok(Some(id)),
        _ => Ok(None),
    }
}
