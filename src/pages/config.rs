use leptos::prelude::*;

use crate::api;
use crate::types::{ConfigFileResponse, ProviderDefinition, ToolDefinition, UpdateConfigPayload};

#[component]
pub fn ConfigPage() -> impl IntoView {
    let model = RwSignal::new(String::new());
    let default_provider = RwSignal::new(String::new());
    let providers = RwSignal::new(Vec::<ProviderDefinition>::new());
    let system_prompt = RwSignal::new(String::new());
    let prompt_template = RwSignal::new(String::new());
    let tools = RwSignal::new(Vec::<ToolDefinition>::new());
    let raw_preview = RwSignal::new(String::new());
    let status = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);
    let is_saving = RwSignal::new(false);

    let apply = move |config: ConfigFileResponse| {
        model.set(config.model);
        default_provider.set(config.default_provider);
        providers.set(config.providers);
        system_prompt.set(config.system_prompt.unwrap_or_default());
        prompt_template.set(config.prompt_template);
        tools.set(config.tools);
        raw_preview.set(config.raw);
    };

    let fetch_config = move || {
        is_loading.set(true);
        status.set(Some("Loading configuration...".to_string()));
        wasm_bindgen_futures::spawn_local(async move {
            match api::load_config().await {
                Ok(config) => {
                    apply(config);
                    status.set(Some("Configuration loaded.".to_string()));
                }
                Err(error) => {
                    status.set(Some(format!("Failed to load configuration: {error}")));
                }
            }
            is_loading.set(false);
        });
    };
    fetch_config();

    // The default provider must stay resolvable against the provider list.
    Effect::new(move |_| {
        let list = providers.get();
        if list.is_empty() {
            if !default_provider.get_untracked().is_empty() {
                default_provider.set(String::new());
            }
            return;
        }
        let selected = default_provider.get();
        if !list.iter().any(|provider| provider.id == selected) {
            default_provider.set(list[0].id.clone());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let model_value = model.get_untracked().trim().to_string();
        if model_value.is_empty() {
            status.set(Some("Model must not be empty.".to_string()));
            return;
        }
        let template = prompt_template.get_untracked();
        if template.trim().is_empty() {
            status.set(Some("Prompt template must not be empty.".to_string()));
            return;
        }
        let resolved_provider = {
            let selected = default_provider.get_untracked();
            if selected.is_empty() {
                providers
                    .get_untracked()
                    .first()
                    .map(|provider| provider.id.clone())
                    .unwrap_or_default()
            } else {
                selected
            }
        };
        if resolved_provider.is_empty() {
            status.set(Some(
                "At least one provider must be available as the default.".to_string(),
            ));
            return;
        }

        is_saving.set(true);
        status.set(Some("Saving configuration...".to_string()));
        wasm_bindgen_futures::spawn_local(async move {
            let system = system_prompt.get_untracked();
            let payload = UpdateConfigPayload {
                model: model_value,
                default_provider: resolved_provider,
                system_prompt: if system.trim().is_empty() {
                    None
                } else {
                    Some(system)
                },
                prompt_template: template,
            };
            match api::save_config(&payload).await {
                Ok(config) => {
                    apply(config);
                    status.set(Some("Configuration updated.".to_string()));
                }
                Err(error) => {
                    status.set(Some(format!("Failed to save configuration: {error}")));
                }
            }
            is_saving.set(false);
        });
    };

    view! {
        <div class="config-page">
            <header class="page-header">
                <h1>"Gateway configuration"</h1>
                <p class="page-subtitle">
                    "Edit the model, system prompt, and prompt template of the config file."
                </p>
            </header>

            <form class="panel config-form" on:submit=on_submit>
                <label class="field">
                    <span class="field-label">"Default provider"</span>
                    <select
                        class="field-select"
                        prop:disabled=move || is_loading.get() || providers.get().is_empty()
                        on:change:target=move |ev| default_provider.set(ev.target().value())
                    >
                        {move || {
                            let list = providers.get();
                            if list.is_empty() {
                                view! { <option value="">"No providers configured"</option> }
                                    .into_any()
                            } else {
                                list.into_iter()
                                    .map(|provider| {
                                        let id = provider.id.clone();
                                        let label = format!("{} ({})", provider.id, provider.kind);
                                        view! {
                                            <option
                                                value=provider.id.clone()
                                                prop:selected=move || {
                                                    default_provider.get() == id
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
                    <span class="field-hint">
                        "Used as the default when a request names no provider."
                    </span>
                </label>

                <label class="field">
                    <span class="field-label">"Model"</span>
                    <input
                        class="field-input"
                        placeholder="e.g. gemma3:4b"
                        prop:value=move || model.get()
                        prop:disabled=move || is_loading.get()
                        on:input:target=move |ev| model.set(ev.target().value())
                    />
                </label>

                <label class="field">
                    <span class="field-label">"System prompt (optional)"</span>
                    <textarea
                        class="field-textarea"
                        placeholder="Extra instructions for the model..."
                        prop:value=move || system_prompt.get()
                        prop:disabled=move || is_loading.get()
                        on:input:target=move |ev| system_prompt.set(ev.target().value())
                    ></textarea>
                </label>

                <label class="field">
                    <span class="field-label">"Prompt template"</span>
                    <textarea
                        class="field-textarea field-textarea-tall"
                        placeholder="Main prompt template..."
                        prop:value=move || prompt_template.get()
                        prop:disabled=move || is_loading.get()
                        on:input:target=move |ev| prompt_template.set(ev.target().value())
                    ></textarea>
                </label>

                <div class="button-row">
                    <button
                        class="button button-primary"
                        type="submit"
                        prop:disabled=move || is_loading.get() || is_saving.get()
                    >
                        {move || if is_saving.get() { "Saving..." } else { "Save changes" }}
                    </button>
                    <button
                        class="button"
                        type="button"
                        prop:disabled=move || is_loading.get() || is_saving.get()
                        on:click=move |_| fetch_config()
                    >
                        "Reload"
                    </button>
                    {move || {
                        status.get().map(|line| view! { <span class="status-line">{line}</span> })
                    }}
                </div>
            </form>

            <div class="config-columns">
                <section class="panel">
                    <header class="panel-header">
                        <h2>"Providers and tools from the config"</h2>
                    </header>
                    <section>
                        <h3 class="detail-title">"Providers"</h3>
                        {move || {
                            let list = providers.get();
                            if list.is_empty() {
                                view! { <p class="panel-hint">"No providers registered."</p> }
                                    .into_any()
                            } else {
                                view! {
                                    <ul class="tool-list">
                                        {list
                                            .into_iter()
                                            .map(|provider| {
                                                let models = if provider.models.is_empty() {
                                                    "No models for this provider.".to_string()
                                                } else {
                                                    let names: Vec<&str> = provider
                                                        .models
                                                        .iter()
                                                        .map(|model| model.label())
                                                        .collect();
                                                    format!("Models: {}", names.join(", "))
                                                };
                                                let title = format!(
                                                    "{} ({})",
                                                    provider.id,
                                                    provider.kind,
                                                );
                                                view! {
                                                    <li class="tool-item">
                                                        <p class="tool-name">{title}</p>
                                                        <p class="tool-description">{models}</p>
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
                    <section>
                        <h3 class="detail-title">"Tools"</h3>
                        {move || {
                            let list = tools.get();
                            if list.is_empty() {
                                view! { <p class="panel-hint">"No tools configured."</p> }
                                    .into_any()
                            } else {
                                view! {
                                    <ul class="tool-list">
                                        {list
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
                </section>

                <section class="panel">
                    <header class="panel-header">
                        <h2>"Raw config preview"</h2>
                    </header>
                    <pre class="config-preview">
                        {move || {
                            let raw = raw_preview.get();
                            if raw.is_empty() { "(empty configuration)".to_string() } else { raw }
                        }}
                    </pre>
                </section>
            </div>
        </div>
    }
}
