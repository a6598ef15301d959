use leptos::prelude::*;

use crate::markdown;
use crate::types::{MessageRole, SessionMessage};
use crate::util;

#[component]
pub fn MessageBubble(message: SessionMessage) -> impl IntoView {
    let class = match message.role {
        MessageRole::User => "message message-user",
        MessageRole::Assistant => "message message-assistant",
        MessageRole::System => "message message-system",
    };
    let label = match message.role {
        MessageRole::User => "User",
        MessageRole::Assistant => "Assistant",
        MessageRole::System => "System",
    };
    let time = util::format_time(&message.timestamp);

    // Assistant replies render as markdown; user and system text stays
    // verbatim.
    let content_view = match message.role {
        MessageRole::Assistant => {
            let html = markdown::render(&message.content);
            view! { <div class="message-content" inner_html=html></div> }.into_any()
        }
        _ => {
            let text = message.content.clone();
            view! { <div class="message-content message-plain">{text}</div> }.into_any()
        }
    };

    view! {
        <article class=class>
            <header class="message-meta">
                <span class="message-role">{label}</span>
                <span class="message-time">{time}</span>
            </header>
            {content_view}
        </article>
    }
}
