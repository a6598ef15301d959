use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::SessionStore;
use crate::types::Session;
use crate::util;

#[component]
pub fn SessionsPage() -> impl IntoView {
    let store = use_context::<SessionStore>().expect("SessionStore in context");
    let navigate = use_navigate();
    let selected_id = RwSignal::new(Option::<String>::None);

    // Most recently updated first.
    let ordered = move || {
        let mut sessions = store.sessions();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sessions
    };

    // Self-healing local selection: fall back to the newest session when the
    // selected one disappears or nothing is selected yet.
    Effect::new(move |_| {
        let sessions = ordered();
        match selected_id.get_untracked() {
            Some(id) if sessions.iter().any(|session| session.id == id) => {}
            _ => selected_id.set(sessions.first().map(|session| session.id.clone())),
        }
    });

    let selected_session = move || -> Option<Session> {
        let id = selected_id.get()?;
        store.session(&id)
    };

    let open_in_playground = move |id: String| {
        store.select_session(&id);
        navigate("/", NavigateOptions::default());
    };

    view! {
        <div class="sessions-page">
            <div class="sessions-list">
                <header class="page-header">
                    <h1>"Session monitor"</h1>
                    <p class="page-subtitle">
                        "Review every stored conversation along with its tool history."
                    </p>
                </header>
                {move || {
                    let sessions = ordered();
                    if sessions.is_empty() {
                        return view! {
                            <div class="empty-panel">
                                "No stored sessions. Start a conversation in the playground to create one."
                            </div>
                        }
                            .into_any();
                    }
                    sessions
                        .into_iter()
                        .map(|session| {
                            let id = session.id.clone();
                            let is_active = {
                                let id = id.clone();
                                move || selected_id.get().as_deref() == Some(id.as_str())
                            };
                            let updated = util::format_date_time(&session.updated_at);
                            let summary = format!(
                                "{} messages / {} tool logs",
                                session.messages.len(),
                                session.tools.len(),
                            );
                            let on_view = {
                                let id = id.clone();
                                move |_| selected_id.set(Some(id.clone()))
                            };
                            let on_open = {
                                let open = open_in_playground.clone();
                                let id = id.clone();
                                move |_| open(id.clone())
                            };
                            view! {
                                <article class="session-card" class=("session-card-active", is_active)>
                                    <div class="session-card-body">
                                        <h2 class="session-card-name">{session.name.clone()}</h2>
                                        <p class="session-card-meta">
                                            {format!("Last updated {updated}")}
                                        </p>
                                        <p class="session-card-meta">{summary}</p>
                                    </div>
                                    <div class="session-card-actions">
                                        <button class="button" on:click=on_view>
                                            "View details"
                                        </button>
                                        <button class="button" on:click=on_open>
                                            "Open in playground"
                                        </button>
                                    </div>
                                </article>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>

            <section class="panel session-detail">
                {move || {
                    let Some(session) = selected_session() else {
                        return view! {
                            <div class="empty-panel">"Select a session to inspect it."</div>
                        }
                            .into_any();
                    };
                    let created = util::format_date_time(&session.created_at);
                    let updated = util::format_date_time(&session.updated_at);
                    let messages = session.messages.clone();
                    let tools = session.tools.clone();
                    let logs = session.logs.clone();
                    view! {
                        <div class="session-detail-body">
                            <header class="session-detail-header">
                                <h2>{session.name.clone()}</h2>
                                <p class="panel-hint">
                                    {format!("Created {created} / last updated {updated}")}
                                </p>
                            </header>

                            <section>
                                <h3 class="detail-title">"Conversation history"</h3>
                                <div class="detail-scroll">
                                    {if messages.is_empty() {
                                        view! {
                                            <p class="panel-hint">"No messages in this session."</p>
                                        }
                                            .into_any()
                                    } else {
                                        messages
                                            .into_iter()
                                            .map(|message| {
                                                let role = match message.role {
                                                    crate::types::MessageRole::User => "User",
                                                    crate::types::MessageRole::Assistant => "Assistant",
                                                    crate::types::MessageRole::System => "System",
                                                };
                                                let time = util::format_time(&message.timestamp);
                                                view! {
                                                    <div class="detail-item">
                                                        <header class="detail-item-meta">
                                                            <span class="detail-item-role">{role}</span>
                                                            <span>{time}</span>
                                                        </header>
                                                        <p class="detail-item-text">{message.content}</p>
                                                    </div>
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                            .into_any()
                                    }}
                                </div>
                            </section>

                            <section>
                                <h3 class="detail-title">"Tool history"</h3>
                                <div class="detail-scroll">
                                    {if tools.is_empty() {
                                        view! {
                                            <p class="panel-hint">
                                                "No tools were used in this session."
                                            </p>
                                        }
                                            .into_any()
                                    } else {
                                        tools
                                            .into_iter()
                                            .map(|log| {
                                                let class = if log.success {
                                                    "detail-item detail-item-ok"
                                                } else {
                                                    "detail-item detail-item-failed"
                                                };
                                                let time = util::format_time(&log.timestamp);
                                                let note = log
                                                    .message
                                                    .filter(|note| !note.is_empty());
                                                view! {
                                                    <div class=class>
                                                        <header class="detail-item-meta">
                                                            <span class="detail-item-role">{log.tool}</span>
                                                            <span>{time}</span>
                                                        </header>
                                                        {note
                                                            .map(|note| {
                                                                view! { <p class="detail-item-text">{note}</p> }
                                                            })}
                                                    </div>
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                            .into_any()
                                    }}
                                </div>
                            </section>

                            <section>
                                <h3 class="detail-title">"Gateway log"</h3>
                                <div class="detail-scroll">
                                    {if logs.is_empty() {
                                        view! {
                                            <p class="panel-hint">
                                                "No gateway log lines for this session."
                                            </p>
                                        }
                                            .into_any()
                                    } else {
                                        logs
                                            .into_iter()
                                            .map(|entry| {
                                                let time = util::format_time(&entry.timestamp);
                                                view! {
                                                    <div class="detail-item">
                                                        <header class="detail-item-meta">
                                                            <span class="detail-item-role">"Log"</span>
                                                            <span>{time}</span>
                                                        </header>
                                                        <p class="detail-item-text">{entry.message}</p>
                                                    </div>
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                            .into_any()
                                    }}
                                </div>
                            </section>
                        </div>
                    }
                        .into_any()
                }}
            </section>
        </div>
    }
}
