use leptos::prelude::*;

use crate::api;
use crate::components::message::MessageBubble;
use crate::components::tool_log::ToolLogCard;
use crate::state::SessionStore;
use crate::types::{
    ChatRequest, MessageRole, ProviderDefinition, SessionLogEntry, SessionMessage, ToolDefinition,
};
use crate::util;

const DEFAULT_MAX_STEPS: u32 = 8;

/// Diagnostic lines arrive from the gateway as bare strings. Each one gets
/// a synthetic sequential timestamp derived from a single capture instant,
/// so their order survives persistence.
fn to_log_entries(session_id: &str, lines: Vec<String>) -> Vec<SessionLogEntry> {
    let base = util::now_millis();
    lines
        .into_iter()
        .enumerate()
        .map(|(index, message)| {
            let at = base + index as f64;
            SessionLogEntry {
                id: format!("{session_id}-log-{}-{}", at as u64, util::random_suffix()),
                message,
                timestamp: util::iso_from_millis(at),
            }
        })
        .collect()
}

fn confirm(question: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(question).ok())
        .unwrap_or(false)
}

#[component]
pub fn PlaygroundPage() -> impl IntoView {
    let store = use_context::<SessionStore>().expect("SessionStore in context");

    let prompt = RwSignal::new(String::new());
    let max_steps = RwSignal::new(DEFAULT_MAX_STEPS);
    let tools = RwSignal::new(Vec::<ToolDefinition>::new());
    let providers = RwSignal::new(Vec::<ProviderDefinition>::new());
    let selected_provider = RwSignal::new(String::new());
    let selected_model = RwSignal::new(String::new());
    let is_loading = RwSignal::new(true);
    let is_sending = RwSignal::new(false);
    let status = RwSignal::new(Option::<String>::None);

    // Fetch the tool list and the gateway config together on mount.
    wasm_bindgen_futures::spawn_local(async move {
        match futures::join!(api::fetch_tools(), api::load_config()) {
            (Ok(tool_list), Ok(config)) => {
                tools.set(tool_list);
                let provider_id = if config.default_provider.is_empty() {
                    config
                        .providers
                        .first()
                        .map(|provider| provider.id.clone())
                        .unwrap_or_default()
                } else {
                    config.default_provider.clone()
                };
                let entry = config
                    .providers
                    .iter()
                    .find(|provider| provider.id == provider_id);
                let model = entry
                    .and_then(|provider| {
                        provider.models.iter().find(|model| model.name == config.model)
                    })
                    .or_else(|| entry.and_then(|provider| provider.models.first()))
                    .map(|model| model.name.clone())
                    .unwrap_or_else(|| config.model.clone());
                providers.set(config.providers);
                selected_provider.set(provider_id);
                selected_model.set(model);
            }
            (Err(error), _) | (_, Err(error)) => {
                log::warn!("initial load failed: {error}");
                status.set(Some(error));
            }
        }
        is_loading.set(false);
    });

    // Keep the provider/model pair valid whenever the provider list or the
    // selection changes.
    Effect::new(move |_| {
        let list = providers.get();
        if list.is_empty() {
            if !selected_provider.get_untracked().is_empty() {
                selected_provider.set(String::new());
            }
            if !selected_model.get_untracked().is_empty() {
                selected_model.set(String::new());
            }
            return;
        }
        let provider_id = selected_provider.get();
        let Some(entry) = list.iter().find(|provider| provider.id == provider_id) else {
            selected_provider.set(list[0].id.clone());
            return;
        };
        let model = selected_model.get();
        if !entry.models.iter().any(|candidate| candidate.name == model) {
            selected_model.set(
                entry
                    .models
                    .first()
                    .map(|candidate| candidate.name.clone())
                    .unwrap_or_default(),
            );
        }
    });

    let available_models = move || {
        let provider_id = selected_provider.get();
        providers
            .get()
            .into_iter()
            .find(|provider| provider.id == provider_id)
            .map(|provider| provider.models)
            .unwrap_or_default()
    };

    // Distinct tool names already invoked in the current session, in first
    // use order.
    let used_tools = move || {
        let mut names = Vec::<String>::new();
        if let Some(session) = store.current_session() {
            for log in &session.tools {
                if !names.contains(&log.tool) {
                    names.push(log.tool.clone());
                }
            }
        }
        names
    };

    let on_send = move || {
        let text = prompt.get_untracked().trim().to_string();
        if text.is_empty() {
            status.set(Some("Prompt must not be empty.".to_string()));
            return;
        }
        let provider = selected_provider.get_untracked();
        let model = selected_model.get_untracked();
        if provider.is_empty() || model.is_empty() {
            status.set(Some("Select a provider and a model first.".to_string()));
            return;
        }
        if is_sending.get_untracked() {
            return;
        }

        // Sending with nothing selected implicitly starts a session.
        let session_id = match store.current_id() {
            Some(id) => id,
            None => store.create_session(None),
        };
        status.set(Some(format!("Sending request ({provider} / {model})...")));
        is_sending.set(true);

        let user_message = SessionMessage {
            id: util::generate_id(&format!("{session_id}-user")),
            role: MessageRole::User,
            content: text.clone(),
            timestamp: util::now_iso(),
            attachments: None,
        };
        store.append_message(&session_id, user_message);

        wasm_bindgen_futures::spawn_local(async move {
            let request = ChatRequest {
                prompt: text,
                session_id: session_id.clone(),
                agent: true,
                max_tool_steps: Some(max_steps.get_untracked()),
                provider: Some(provider.clone()),
                model: Some(model.clone()),
            };
            match api::send_chat(&request).await {
                Ok(response) => {
                    // The gateway may answer under a session id of its own
                    // choosing; that id wins. Adopt it if this store has
                    // never seen it, then bind everything from this turn to
                    // it. The provisional session keeps the user message.
                    let server_id = response.session_id;
                    store.adopt_session(&server_id);
                    let assistant = SessionMessage {
                        id: util::generate_id(&format!("{server_id}-assistant")),
                        role: MessageRole::Assistant,
                        content: response.content,
                        timestamp: util::now_iso(),
                        attachments: None,
                    };
                    store.append_message(&server_id, assistant);
                    store.append_tool_logs(&server_id, api::to_tool_logs(response.tool_steps));
                    if !response.logs.is_empty() {
                        store.append_logs(&server_id, to_log_entries(&server_id, response.logs));
                    }
                    store.select_session(&server_id);
                    if let Some(echoed) = response.provider.clone() {
                        selected_provider.set(echoed);
                    }
                    if let Some(echoed) = response.model.clone() {
                        selected_model.set(echoed);
                    }
                    let resolved_provider = response.provider.unwrap_or(provider);
                    let resolved_model = response.model.unwrap_or(model);
                    status.set(Some(format!(
                        "Response received ({resolved_provider} / {resolved_model})."
                    )));
                }
                Err(error) => {
                    let failure = SessionMessage {
                        id: util::generate_id(&format!("{session_id}-error")),
                        role: MessageRole::System,
                        content: format!("Failed to send prompt: {error}"),
                        timestamp: util::now_iso(),
                        attachments: None,
                    };
                    store.append_message(&session_id, failure);
                    status.set(Some(error));
                }
            }
            prompt.set(String::new());
            is_sending.set(false);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_send();
    };

    let on_prompt_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            if !is_sending.get_untracked() {
                on_send();
            }
        }
    };

    let on_new_session = move |_| {
        store.create_session(None);
        status.set(Some("New session ready.".to_string()));
    };

    let on_delete_session = move |_| {
        let Some(id) = store.current_id() else {
            return;
        };
        if confirm("Delete this session?") {
            store.delete_session(&id);
            status.set(Some("Session deleted.".to_string()));
        }
    };

    let on_reset_sessions = move |_| {
        if confirm("Reset all sessions?") {
            store.reset_sessions();
            status.set(Some("All sessions were reset.".to_string()));
        }
    };

    // Auto-scroll the conversation when it grows, unless the user has
    // scrolled up to read history.
    let conversation_ref: NodeRef<leptos::html::Div> = NodeRef::new();
    let user_scrolled_up = RwSignal::new(false);

    Effect::new(move |_| {
        let _current = store.current_session();
        if user_scrolled_up.get() {
            return;
        }
        if let Some(el) = conversation_ref.get() {
            let el: &web_sys::Element = &el;
            el.set_scroll_top(el.scroll_height());
        }
    });

    let on_scroll = move |_| {
        if let Some(el) = conversation_ref.get() {
            let el: &web_sys::Element = &el;
            let at_bottom = el.scroll_height() - el.scroll_top() - el.client_height() < 40;
            user_scrolled_up.set(!at_bottom);
        }
    };

    let form_disabled = move || is_loading.get() || is_sending.get();

    view! {
        <div class="playground">
            <aside class="playground-sidebar">
                <section class="panel">
                    <header class="panel-header">
                        <h3>"Sessions"</h3>
                        <button class="button button-primary" on:click=on_new_session>
                            "New session"
                        </button>
                    </header>
                    <select
                        class="field-select"
                        on:change:target=move |ev| store.select_session(&ev.target().value())
                    >
                        <option
                            value=""
                            disabled=true
                            prop:selected=move || store.current_id().is_none()
                        >
                            "Select a session"
                        </option>
                        {move || {
                            store
                                .sessions()
                                .into_iter()
                                .map(|session| {
                                    let id = session.id.clone();
                                    view! {
                                        <option
                                            value=session.id.clone()
                                            prop:selected=move || {
                                                store.current_id().as_deref() == Some(id.as_str())
                                            }
                                        >
                                            {session.name.clone()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                    <div class="button-row">
                        <button class="button" on:click=on_delete_session>
                            "Delete"
                        </button>
                        <button class="button button-danger" on:click=on_reset_sessions>
                            "Reset"
                        </button>
                    </div>
                </section>

                <section class="panel">
                    <header class="panel-header">
                        <h3>"Available tools"</h3>
                    </header>
                    {move || {
                        if is_loading.get() {
                            view! { <p class="panel-hint">"Loading tools..."</p> }.into_any()
                        } else if tools.get().is_empty() {
                            view! {
                                <p class="panel-hint">"No tools configured on the server."</p>
                            }
                                .into_any()
                        } else {
                            view! {
                                <ul class="tool-list">
                                    {tools
                                        .get()
                                        .into_iter()
                                        .map(|tool| {
                                            let description = tool
                                                .description
                                                .unwrap_or_else(|| "No description.".to_string());
                                            view! {
                                                <li class="tool-item">
                                                    <p class="tool-name">{tool.name}</p>
                                                    <p class="tool-description">{description}</p>
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            }
                                .into_any()
                        }
                    }}
                </section>

                <section class="panel">
                    <header class="panel-header">
                        <h3>"Tools used"</h3>
                    </header>
                    {move || {
                        let names = used_tools();
                        if names.is_empty() {
                            view! { <p class="panel-hint">"No tool calls yet."</p> }.into_any()
                        } else {
                            view! {
                                <ul class="tool-list">
                                    {names
                                        .into_iter()
                                        .map(|name| {
                                            view! { <li class="tool-item tool-name">{name}</li> }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            }
                                .into_any()
                        }
                    }}
                </section>
            </aside>

            <section class="playground-main">
                <section class="panel">
                    <header class="panel-header">
                        <h2>"Conversation"</h2>
                        <p class="panel-hint">
                            {move || {
                                store
                                    .current_session()
                                    .map(|session| util::format_date_time(&session.updated_at))
                                    .unwrap_or_else(|| "No session yet".to_string())
                            }}
                        </p>
                    </header>
                    <div class="message-list" node_ref=conversation_ref on:scroll=on_scroll>
                        {move || {
                            store
                                .current_session()
                                .map(|session| session.messages)
                                .unwrap_or_default()
                                .into_iter()
                                .map(|message| view! { <MessageBubble message=message/> })
                                .collect::<Vec<_>>()
                        }}
                        {move || {
                            let empty = store
                                .current_session()
                                .map(|session| session.messages.is_empty())
                                .unwrap_or(true);
                            empty
                                .then(|| {
                                    view! {
                                        <div class="empty-panel">
                                            "No conversation yet. Pick or create a session, then send your first prompt."
                                        </div>
                                    }
                                })
                        }}
                    </div>
                </section>

                <form class="panel" on:submit=on_submit>
                    <header class="panel-header">
                        <h3>"Send a prompt"</h3>
                    </header>
                    <div class="field-grid">
                        <label class="field">
                            <span class="field-label">"Provider"</span>
                            <select
                                class="field-select"
                                prop:disabled=move || form_disabled() || providers.get().is_empty()
                                on:change:target=move |ev| selected_provider.set(ev.target().value())
                            >
                                {move || {
                                    let list = providers.get();
                                    if list.is_empty() {
                                        view! { <option value="">"No providers available"</option> }
                                            .into_any()
                                    } else {
                                        list.into_iter()
                                            .map(|provider| {
                                                let id = provider.id.clone();
                                                let label = format!(
                                                    "{} ({})",
                                                    provider.id,
                                                    provider.kind,
                                                );
                                                view! {
                                                    <option
                                                        value=provider.id.clone()
                                                        prop:selected=move || {
                                                            selected_provider.get() == id
                                                        }
                                                    >
                                                        {label}
                                                    </option>
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                            .into_any()
                                    }
                                }}
                            </select>
                            <span class="field-hint">"Model source from the gateway config."</span>
                        </label>
                        <label class="field">
                            <span class="field-label">"Model"</span>
                            <select
                                class="field-select"
                                prop:disabled=move || {
                                    form_disabled() || available_models().is_empty()
                                }
                                on:change:target=move |ev| selected_model.set(ev.target().value())
                            >
                                {move || {
                                    let models = available_models();
                                    if models.is_empty() {
                                        view! {
                                            <option value="">"No models for this provider"</option>
                                        }
                                            .into_any()
                                    } else {
                                        models
                                            .into_iter()
                                            .map(|model| {
                                                let name = model.name.clone();
                                                let label = model.label().to_string();
                                                view! {
                                                    <option
                                                        value=model.name.clone()
                                                        prop:selected=move || {
                                                            selected_model.get() == name
                                                        }
                                                    >
                                                        {label}
                                                    </option>
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                            .into_any()
                                    }
                                }}
                            </select>
                            <span class="field-hint">"Used for the next request."</span>
                        </label>
                    </div>
                    <textarea
                        class="prompt-input"
                        placeholder="Type a prompt... (Enter to send, Shift+Enter for newline)"
                        prop:value=move || prompt.get()
                        prop:disabled=form_disabled
                        on:input:target=move |ev| prompt.set(ev.target().value())
                        on:keydown=on_prompt_keydown
                    ></textarea>
                    <div class="form-footer">
                        <label class="field steps-field">
                            <input
                                class="field-input steps-input"
                                type="number"
                                min="1"
                                prop:value=move || max_steps.get().to_string()
                                prop:disabled=move || is_loading.get()
                                on:input:target=move |ev| {
                                    let parsed = ev
                                        .target()
                                        .value()
                                        .parse::<u32>()
                                        .ok()
                                        .filter(|steps| *steps > 0);
                                    max_steps.set(parsed.unwrap_or(DEFAULT_MAX_STEPS));
                                }
                            />
                            <span class="field-hint">"Tool interaction limit per request"</span>
                        </label>
                        <button
                            class="button button-primary"
                            type="submit"
                            prop:disabled=move || {
                                form_disabled() || selected_provider.get().is_empty()
                                    || selected_model.get().is_empty()
                            }
                        >
                            {move || if is_sending.get() { "Sending..." } else { "Send" }}
                        </button>
                    </div>
                    {move || {
                        status.get().map(|line| view! { <p class="status-line">{line}</p> })
                    }}
                </form>

                <section class="panel">
                    <header class="panel-header">
                        <h3>"Tool log"</h3>
                    </header>
                    <div class="log-list">
                        {move || {
                            let mut logs = store
                                .current_session()
                                .map(|session| session.tools)
                                .unwrap_or_default();
                            logs.reverse();
                            logs.into_iter()
                                .map(|log| view! { <ToolLogCard log=log/> })
                                .collect::<Vec<_>>()
                        }}
                        {move || {
                            let empty = store
                                .current_session()
                                .map(|session| session.tools.is_empty())
                                .unwrap_or(true);
                            empty
                                .then(|| {
                                    view! {
                                        <div class="empty-panel">
                                            "No tool activity for this session."
                                        </div>
                                    }
                                })
                        }}
                    </div>
                </section>

                <section class="panel">
                    <header class="panel-header">
                        <h3>"Gateway log"</h3>
                    </header>
                    <div class="log-list">
                        {move || {
                            let mut entries = store
                                .current_session()
                                .map(|session| session.logs)
                                .unwrap_or_default();
                            entries.reverse();
                            entries
                                .into_iter()
                                .map(|entry| {
                                    let time = util::format_time(&entry.timestamp);
                                    view! {
                                        <article class="log-entry">
                                            <header class="log-entry-meta">
                                                <span>"Log"</span>
                                                <span>{time}</span>
                                            </header>
                                            <p class="log-entry-message">{entry.message}</p>
                                        </article>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                        {move || {
                            let empty = store
                                .current_session()
                                .map(|session| session.logs.is_empty())
                                .unwrap_or(true);
                            empty
                                .then(|| {
                                    view! {
                                        <div class="empty-panel">
                                            "No gateway log lines for this session."
                                        </div>
                                    }
                                })
                        }}
                    </div>
                </section>
            </section>
        </div>
    }
}
