use leptos::prelude::*;

use crate::types::SessionToolLog;
use crate::util;

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Card for one tool invocation, with the opaque input/output payloads
/// tucked behind a disclosure.
#[component]
pub fn ToolLogCard(log: SessionToolLog) -> impl IntoView {
    let class = if log.success {
        "tool-log tool-log-ok"
    } else {
        "tool-log tool-log-failed"
    };
    let time = util::format_time(&log.timestamp);
    let input = pretty(&log.input);
    let output = pretty(&log.output);
    let note = log.message.clone().filter(|note| !note.is_empty());

    view! {
        <article class=class>
            <header class="tool-log-meta">
                <span class="tool-log-name">{log.tool.clone()}</span>
                <span class="tool-log-time">{time}</span>
            </header>
            {note.map(|note| view! { <p class="tool-log-note">{note}</p> })}
            <details class="tool-log-details">
                <summary>"Input / output"</summary>
                <p class="tool-log-label">"Input"</p>
                <pre class="tool-log-payload">{input}</pre>
                <p class="tool-log-label">"Output"</p>
                <pre class="tool-log-payload">{output}</pre>
            </details>
        </article>
    }
}
