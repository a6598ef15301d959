use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{A, Route, Router, Routes};
use leptos_router::path;

use crate::pages::config::ConfigPage;
use crate::pages::playground::PlaygroundPage;
use crate::pages::sessions::SessionsPage;
use crate::state::SessionStore;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // One store per app instance, rehydrated from local storage and handed
    // to every page through context.
    let store = SessionStore::load();
    provide_context(store);

    view! {
        <style>{STYLES}</style>
        <Title text="MCP Playground"/>
        <Router>
            <div class="app">
                <header class="app-header">
                    <h1>"mcp playground"</h1>
                    <nav class="app-nav">
                        <A href="/">"Playground"</A>
                        <A href="/sessions">"Sessions"</A>
                        <A href="/config">"Config"</A>
                    </nav>
                </header>
                <main class="app-body">
                    <Routes fallback=|| view! { <p class="empty-panel">"Page not found."</p> }>
                        <Route path=path!("/") view=PlaygroundPage/>
                        <Route path=path!("/sessions") view=SessionsPage/>
                        <Route path=path!("/config") view=ConfigPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

const STYLES: &str = r#"
    * {
        margin: 0;
        padding: 0;
        box-sizing: border-box;
    }

    body {
        background: #1a1a2e;
        color: #e0e0e0;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
        min-height: 100vh;
    }

    .app {
        display: flex;
        flex-direction: column;
        min-height: 100vh;
        max-width: 1200px;
        margin: 0 auto;
    }

    .app-header {
        display: flex;
        align-items: center;
        justify-content: space-between;
        padding: 12px 16px;
        border-bottom: 1px solid #2a2a4a;
    }

    .app-header h1 {
        font-size: 1.1rem;
        font-weight: 600;
        color: #8888cc;
    }

    .app-nav {
        display: flex;
        gap: 16px;
    }

    .app-nav a {
        color: #9a9ac0;
        text-decoration: none;
        font-size: 0.9rem;
    }

    .app-nav a:hover,
    .app-nav a[aria-current="page"] {
        color: #e0e8ff;
    }

    .app-body {
        flex: 1;
        padding: 16px;
    }

    .playground {
        display: grid;
        grid-template-columns: 300px 1fr;
        gap: 16px;
        align-items: start;
    }

    .playground-sidebar,
    .playground-main {
        display: flex;
        flex-direction: column;
        gap: 16px;
    }

    .panel {
        background: #222240;
        border: 1px solid #3a3a5a;
        border-radius: 12px;
        padding: 16px;
        display: flex;
        flex-direction: column;
        gap: 12px;
    }

    .panel-header {
        display: flex;
        align-items: center;
        justify-content: space-between;
        gap: 8px;
    }

    .panel-header h2,
    .panel-header h3 {
        font-size: 1rem;
        font-weight: 600;
        color: #aaaadd;
    }

    .panel-hint {
        color: #888;
        font-size: 0.85rem;
    }

    .page-header h1 {
        font-size: 1.2rem;
        color: #aaaadd;
    }

    .page-subtitle {
        margin-top: 4px;
        color: #888;
        font-size: 0.9rem;
    }

    .button {
        background: #2a2a4a;
        color: #d0d0e0;
        border: 1px solid #3a3a5a;
        border-radius: 8px;
        padding: 8px 14px;
        font-size: 0.9rem;
        cursor: pointer;
    }

    .button:hover:not(:disabled) {
        background: #34345a;
    }

    .button:disabled {
        opacity: 0.4;
        cursor: not-allowed;
    }

    .button-primary {
        background: #3a5aaa;
        border-color: #3a5aaa;
        color: #e0e8ff;
    }

    .button-primary:hover:not(:disabled) {
        background: #4a6abb;
    }

    .button-danger {
        background: #4a1a1a;
        border-color: #5a2a2a;
        color: #ff9999;
    }

    .button-row {
        display: flex;
        align-items: center;
        gap: 8px;
        flex-wrap: wrap;
    }

    .field {
        display: flex;
        flex-direction: column;
        gap: 6px;
        font-size: 0.9rem;
    }

    .field-label {
        color: #c0c0e0;
        font-weight: 500;
    }

    .field-hint {
        color: #666688;
        font-size: 0.75rem;
    }

    .field-grid {
        display: grid;
        grid-template-columns: 1fr 1fr;
        gap: 12px;
    }

    .field-select,
    .field-input,
    .field-textarea,
    .prompt-input {
        background: #1a1a2e;
        color: #e0e0e0;
        border: 1px solid #3a3a5a;
        border-radius: 8px;
        padding: 9px 12px;
        font-family: inherit;
        font-size: 0.9rem;
        outline: none;
        width: 100%;
    }

    .field-select:focus,
    .field-input:focus,
    .field-textarea:focus,
    .prompt-input:focus {
        border-color: #5a5a8a;
    }

    .field-select:disabled,
    .field-input:disabled,
    .field-textarea:disabled,
    .prompt-input:disabled {
        opacity: 0.5;
        cursor: not-allowed;
    }

    .field-textarea {
        min-height: 110px;
        resize: vertical;
    }

    .field-textarea-tall {
        min-height: 220px;
    }

    .prompt-input {
        min-height: 110px;
        resize: vertical;
    }

    .steps-field {
        flex-direction: row;
        align-items: center;
        gap: 10px;
    }

    .steps-input {
        width: 90px;
    }

    .form-footer {
        display: flex;
        align-items: center;
        justify-content: space-between;
        gap: 12px;
        flex-wrap: wrap;
    }

    .status-line {
        color: #888;
        font-size: 0.8rem;
    }

    .message-list {
        display: flex;
        flex-direction: column;
        gap: 12px;
        max-height: 480px;
        overflow-y: auto;
        padding-right: 6px;
    }

    .message-list::-webkit-scrollbar,
    .log-list::-webkit-scrollbar,
    .detail-scroll::-webkit-scrollbar {
        width: 6px;
    }

    .message-list::-webkit-scrollbar-thumb,
    .log-list::-webkit-scrollbar-thumb,
    .detail-scroll::-webkit-scrollbar-thumb {
        background: #3a3a5a;
        border-radius: 3px;
    }

    .message {
        max-width: 80%;
        padding: 10px 14px;
        border-radius: 12px;
        line-height: 1.5;
        word-wrap: break-word;
    }

    .message-user {
        align-self: flex-end;
        background: #2a4a8a;
        color: #e0e8ff;
        border-bottom-right-radius: 4px;
    }

    .message-assistant {
        align-self: flex-start;
        background: #2a2a3e;
        color: #d0d0e0;
        border-bottom-left-radius: 4px;
    }

    .message-system {
        align-self: center;
        background: #4a3a1a;
        color: #ffcc88;
        border-radius: 8px;
        font-size: 0.9em;
    }

    .message-meta {
        display: flex;
        align-items: center;
        gap: 8px;
        font-size: 0.7rem;
        text-transform: uppercase;
        letter-spacing: 0.04em;
        color: #9a9ac0;
        margin-bottom: 4px;
    }

    .message-time {
        color: #666688;
    }

    .message-plain {
        white-space: pre-wrap;
    }

    .message-content p {
        margin: 0.4em 0;
    }

    .message-content p:first-child {
        margin-top: 0;
    }

    .message-content p:last-child {
        margin-bottom: 0;
    }

    .message-content pre {
        background: #111122;
        padding: 10px;
        border-radius: 6px;
        overflow-x: auto;
        margin: 0.5em 0;
    }

    .message-content code {
        font-family: "JetBrains Mono", "Fira Code", monospace;
        font-size: 0.9em;
        background: #111122;
        padding: 2px 5px;
        border-radius: 3px;
    }

    .message-content pre code {
        background: none;
        padding: 0;
    }

    .empty-panel {
        border: 1px dashed #3a3a5a;
        border-radius: 10px;
        padding: 20px;
        text-align: center;
        color: #888;
        font-size: 0.9rem;
    }

    .tool-list {
        list-style: none;
        display: flex;
        flex-direction: column;
        gap: 8px;
    }

    .tool-item {
        background: #1a1a2e;
        border-radius: 8px;
        padding: 8px 12px;
    }

    .tool-name {
        color: #d0d0e0;
        font-weight: 500;
        font-size: 0.9rem;
    }

    .tool-description {
        color: #888;
        font-size: 0.8rem;
        margin-top: 2px;
    }

    .log-list {
        display: flex;
        flex-direction: column;
        gap: 10px;
        max-height: 280px;
        overflow-y: auto;
        padding-right: 6px;
    }

    .tool-log {
        border: 1px solid #3a3a5a;
        border-radius: 10px;
        padding: 10px 14px;
        font-size: 0.85rem;
    }

    .tool-log-ok {
        border-color: #2a5a3a;
        background: #1a2e22;
        color: #aaddbb;
    }

    .tool-log-failed {
        border-color: #5a2a2a;
        background: #2e1a1a;
        color: #ffaaaa;
    }

    .tool-log-meta,
    .log-entry-meta,
    .detail-item-meta {
        display: flex;
        align-items: center;
        justify-content: space-between;
        font-size: 0.7rem;
        text-transform: uppercase;
        letter-spacing: 0.04em;
        color: #9a9ac0;
    }

    .tool-log-name {
        font-weight: 600;
    }

    .tool-log-note {
        margin-top: 6px;
        line-height: 1.4;
    }

    .tool-log-details {
        margin-top: 6px;
        font-size: 0.78rem;
    }

    .tool-log-details summary {
        cursor: pointer;
        color: #9a9ac0;
    }

    .tool-log-label {
        margin-top: 6px;
        font-weight: 600;
        color: #c0c0e0;
    }

    .tool-log-payload {
        margin-top: 4px;
        max-height: 160px;
        overflow: auto;
        background: #111122;
        border: 1px solid #2a2a4a;
        border-radius: 6px;
        padding: 8px 10px;
        font-size: 0.72rem;
        color: #d0d0e0;
    }

    .log-entry {
        border: 1px solid #2a2a4a;
        border-radius: 10px;
        background: #1a1a2e;
        padding: 10px 14px;
        font-size: 0.85rem;
    }

    .log-entry-message {
        margin-top: 6px;
        line-height: 1.4;
        color: #d0d0e0;
    }

    .sessions-page {
        display: grid;
        grid-template-columns: 340px 1fr;
        gap: 16px;
        align-items: start;
    }

    .sessions-list {
        display: flex;
        flex-direction: column;
        gap: 12px;
    }

    .session-card {
        background: #222240;
        border: 1px solid #3a3a5a;
        border-radius: 12px;
        padding: 14px;
        display: flex;
        justify-content: space-between;
        gap: 10px;
    }

    .session-card-active {
        border-color: #3a5aaa;
        background: #24294a;
    }

    .session-card-name {
        font-size: 0.95rem;
        color: #d0d0e0;
    }

    .session-card-meta {
        margin-top: 4px;
        color: #888;
        font-size: 0.78rem;
    }

    .session-card-actions {
        display: flex;
        flex-direction: column;
        gap: 6px;
    }

    .session-detail-header h2 {
        font-size: 1.05rem;
        color: #d0d0e0;
    }

    .session-detail-body {
        display: flex;
        flex-direction: column;
        gap: 16px;
    }

    .detail-title {
        font-size: 0.9rem;
        color: #aaaadd;
        margin-bottom: 6px;
    }

    .detail-scroll {
        display: flex;
        flex-direction: column;
        gap: 8px;
        max-height: 260px;
        overflow-y: auto;
        background: #1a1a2e;
        border: 1px solid #2a2a4a;
        border-radius: 10px;
        padding: 10px 12px;
    }

    .detail-item {
        background: #222240;
        border-radius: 8px;
        padding: 8px 12px;
        font-size: 0.85rem;
    }

    .detail-item-ok {
        background: #1a2e22;
        color: #aaddbb;
    }

    .detail-item-failed {
        background: #2e1a1a;
        color: #ffaaaa;
    }

    .detail-item-role {
        font-weight: 600;
    }

    .detail-item-text {
        margin-top: 4px;
        line-height: 1.4;
        white-space: pre-wrap;
    }

    .config-page {
        display: flex;
        flex-direction: column;
        gap: 16px;
    }

    .config-form {
        gap: 14px;
    }

    .config-columns {
        display: grid;
        grid-template-columns: 1fr 1fr;
        gap: 16px;
        align-items: start;
    }

    .config-preview {
        background: #111122;
        border: 1px solid #2a2a4a;
        border-radius: 10px;
        padding: 12px 14px;
        font-size: 0.75rem;
        color: #d0d0e0;
        max-height: 400px;
        overflow: auto;
        white-space: pre-wrap;
    }

    @media (max-width: 900px) {
        .playground,
        .sessions-page,
        .config-columns,
        .field-grid {
            grid-template-columns: 1fr;
        }
    }
"#;
