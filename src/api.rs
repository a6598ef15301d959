use gloo_net::http::{Request, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{
    AgentToolStep, ChatRequest, ChatResponse, ConfigFileResponse, SessionToolLog, ToolDefinition,
    UpdateConfigPayload,
};
use crate::util;

const UNSUPPORTED_FORMAT: &str = "Unsupported response format.";

/// Gateway base URL: compile-time override, else the page origin, with any
/// trailing slash stripped.
pub fn base_url() -> String {
    if let Some(explicit) = option_env!("MCP_PLAYGROUND_BASE_URL") {
        return explicit.trim_end_matches('/').to_string();
    }
    let origin = web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default();
    origin.trim_end_matches('/').to_string()
}

fn endpoint(path: &str) -> String {
    format!("{}{}", base_url(), path)
}

/// List the tools the gateway currently exposes.
pub async fn fetch_tools() -> Result<Vec<ToolDefinition>, String> {
    #[derive(Debug, Default, serde::Deserialize)]
    struct ToolListing {
        #[serde(default)]
        tools: Vec<ToolDefinition>,
    }

    let value = get(&endpoint("/tools")).await?;
    let listing: ToolListing = parse(value)?;
    Ok(listing.tools)
}

/// Run one chat turn against the gateway.
pub async fn send_chat(request: &ChatRequest) -> Result<ChatResponse, String> {
    let value = send_json(Request::post(&endpoint("/chat")), request).await?;
    parse(value)
}

pub async fn load_config() -> Result<ConfigFileResponse, String> {
    let value = get(&endpoint("/config-file")).await?;
    parse(value)
}

pub async fn save_config(payload: &UpdateConfigPayload) -> Result<ConfigFileResponse, String> {
    let value = send_json(Request::put(&endpoint("/config-file")), payload).await?;
    parse(value)
}

/// Tag raw tool steps with fresh ids and the capture-time timestamp so they
/// can live in a session's tool history.
pub fn to_tool_logs(steps: Vec<AgentToolStep>) -> Vec<SessionToolLog> {
    let timestamp = util::now_iso();
    steps
        .into_iter()
        .map(|step| SessionToolLog {
            id: util::generate_id(&step.tool),
            tool: step.tool,
            success: step.success,
            message: step.message,
            input: step.input,
            output: step.output,
            timestamp: timestamp.clone(),
        })
        .collect()
}

/// Pick the most descriptive error text out of a failed response: the JSON
/// `error` field when the server sent one, else the HTTP status text.
pub fn error_message(body: Option<&Value>, status_text: &str) -> String {
    if let Some(message) = body
        .and_then(|body| body.get("error"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
    {
        return message.to_string();
    }
    if status_text.is_empty() {
        "Request failed.".to_string()
    } else {
        status_text.to_string()
    }
}

async fn get(url: &str) -> Result<Value, String> {
    let request = Request::get(url)
        .header("Content-Type", "application/json")
        .build()
        .map_err(|err| format!("Failed to build request: {err}"))?;
    dispatch(request).await
}

async fn send_json(builder: RequestBuilder, body: &impl Serialize) -> Result<Value, String> {
    let request = builder
        .json(body)
        .map_err(|err| format!("Failed to encode request: {err}"))?;
    dispatch(request).await
}

/// One outcome-normalizing wrapper around fetch. Transport failures,
/// non-2xx statuses, and non-JSON bodies all collapse into a readable
/// error string; `204 No Content` resolves to JSON null instead of failing.
async fn dispatch(request: Request) -> Result<Value, String> {
    let response = request
        .send()
        .await
        .map_err(|err| format!("Could not reach the server: {err}"))?;

    let is_json = response
        .headers()
        .get("content-type")
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);

    if !response.ok() {
        let body = if is_json {
            response.json::<Value>().await.ok()
        } else {
            None
        };
        let message = error_message(body.as_ref(), &response.status_text());
        log::debug!("request failed with status {}: {message}", response.status());
        return Err(message);
    }

    if response.status() == 204 {
        return Ok(Value::Null);
    }
    if !is_json {
        return Err(UNSUPPORTED_FORMAT.to_string());
    }
    response
        .json::<Value>()
        .await
        .map_err(|_| UNSUPPORTED_FORMAT.to_string())
}

fn parse<T: DeserializeOwned + Default>(value: Value) -> Result<T, String> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|_| UNSUPPORTED_FORMAT.to_string())
}
