//! UI Components for the playground.

use ottl_playground::{ConfigExample, EvaluatorInfo, OtlpType, RunResult, escape_html, pretty_json};
use yew::prelude::*;

/// Top bar: title, evaluator picker, share and run buttons.
#[derive(Properties, PartialEq)]
pub struct ControlsProps {
    pub title: String,
    pub evaluator: String,
    pub evaluators: Vec<EvaluatorInfo>,
    pub hide_evaluators: bool,
    pub hide_run_button: bool,
    pub hide_copy_link_button: bool,
    /// The evaluator module is still loading.
    pub loading: bool,
    pub run_disabled: bool,
    pub on_evaluator_change: Callback<String>,
    pub on_copy_link: Callback<()>,
    pub on_run: Callback<()>,
}

#[function_component(PlaygroundControls)]
pub fn playground_controls(props: &ControlsProps) -> Html {
    let on_select = {
        let on_evaluator_change = props.on_evaluator_change.clone();
        Callback::from(move |e: Event| {
            let target: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_evaluator_change.emit(target.value());
        })
    };

    let on_copy_click = {
        let on_copy_link = props.on_copy_link.clone();
        Callback::from(move |_| on_copy_link.emit(()))
    };

    let on_run_click = {
        let on_run = props.on_run.clone();
        Callback::from(move |_| on_run.emit(()))
    };

    // Until the module lists its evaluators, show the configured one.
    let options: Vec<(String, String)> = if props.evaluators.is_empty() {
        vec![(props.evaluator.clone(), props.evaluator.clone())]
    } else {
        props
            .evaluators
            .iter()
            .map(|e| (e.id.clone(), e.label().to_string()))
            .collect()
    };

    html! {
        <header class="header playground-controls">
            <div class="header-left">
                <h1>{ &props.title }</h1>
            </div>
            <div class="header-right button-group">
                if !props.hide_evaluators {
                    <select
                        class="evaluator-select"
                        onchange={on_select}
                        disabled={props.loading}
                    >
                        { for options.into_iter().map(|(id, label)| {
                            let selected = id == props.evaluator;
                            html! { <option value={id} selected={selected}>{ label }</option> }
                        })}
                    </select>
                }
                if !props.hide_copy_link_button {
                    <button class="copy-link-button" onclick={on_copy_click}>
                        { "Copy link" }
                    </button>
                }
                if !props.hide_run_button {
                    <button
                        class="run-button"
                        onclick={on_run_click}
                        disabled={props.run_disabled}
                    >
                        { if props.loading { "Loading..." } else { "Run" } }
                    </button>
                }
            </div>
        </header>
    }
}

/// Config editor with the example picker.
#[derive(Properties, PartialEq)]
pub struct ConfigPanelProps {
    pub config: String,
    pub examples: &'static [ConfigExample],
    pub docs_url: Option<String>,
    pub on_change: Callback<String>,
    /// Emits the example name.
    pub on_example_select: Callback<String>,
}

#[function_component(ConfigPanel)]
pub fn config_panel(props: &ConfigPanelProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(target.value());
        })
    };

    let on_example = {
        let on_example_select = props.on_example_select.clone();
        Callback::from(move |e: Event| {
            let target: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let name = target.value();
            if !name.is_empty() {
                on_example_select.emit(name);
            }
            target.set_value("");
        })
    };

    html! {
        <div class="panel config-panel">
            <div class="panel-header">
                <h2>{ "Configuration" }</h2>
                <div class="button-group">
                    if let Some(url) = &props.docs_url {
                        <a class="docs-link" href={url.clone()} target="_blank">{ "Docs" }</a>
                    }
                    <select class="example-select" onchange={on_example}>
                        <option value="" selected=true>{ "Examples" }</option>
                        { for props.examples.iter().map(|example| html! {
                            <option value={example.name}>{ example.name }</option>
                        })}
                    </select>
                </div>
            </div>
            <div class="panel-content">
                <textarea
                    class="config-input"
                    value={props.config.clone()}
                    oninput={on_input}
                    spellcheck="false"
                    placeholder="Enter the processor configuration..."
                />
            </div>
        </div>
    }
}

/// OTLP payload editor.
#[derive(Properties, PartialEq)]
pub struct PayloadPanelProps {
    pub payload: String,
    /// Signal of the sample payload last loaded from an example.
    pub selected_example: Option<OtlpType>,
    pub on_change: Callback<String>,
}

#[function_component(PayloadPanel)]
pub fn payload_panel(props: &PayloadPanelProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(target.value());
        })
    };

    html! {
        <div class="panel payload-panel">
            <div class="panel-header">
                <h2>{ "OTLP Payload" }</h2>
                if let Some(otlp_type) = props.selected_example {
                    <span class="hint">{ format!("{} example", otlp_type) }</span>
                }
            </div>
            <div class="panel-content">
                <textarea
                    class="payload-input"
                    value={props.payload.clone()}
                    oninput={on_input}
                    spellcheck="false"
                />
            </div>
        </div>
    }
}

const LOG_LEVELS: [&str; 5] = ["debug", "info", "warn", "error", "fatal"];

/// Render console-encoded collector logs as markup with the level
/// highlighted. Every field is escaped.
pub fn render_log_lines(logs: &str) -> String {
    let mut html = String::new();
    for line in logs.lines() {
        html.push_str("<div class=\"log-line\">");
        for (i, field) in line.split('\t').enumerate() {
            if i > 0 {
                html.push(' ');
            }
            let level = field.trim().to_ascii_lowercase();
            if LOG_LEVELS.contains(&level.as_str()) {
                html.push_str(&format!(
                    "<span class=\"log-level log-{}\">{}</span>",
                    level,
                    escape_html(field)
                ));
            } else {
                html.push_str(&escape_html(field));
            }
        }
        html.push_str("</div>");
    }
    html
}

/// Run output, evaluator logs, and errors.
#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub result: Option<RunResult>,
    /// Rejected run (bad payload).
    pub run_error: Option<String>,
    /// Evaluator module failed to load.
    pub wasm_error: Option<String>,
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    let error = props
        .wasm_error
        .as_ref()
        .map(|e| format!("Unable to load the evaluator: {}", e))
        .or_else(|| props.run_error.clone())
        .or_else(|| {
            props
                .result
                .as_ref()
                .filter(|r| r.is_error())
                .map(|r| r.error().unwrap_or("unknown error").to_string())
        });

    let output = props
        .result
        .as_ref()
        .and_then(RunResult::value)
        .filter(|v| !v.is_empty())
        .map(|v| pretty_json(v).unwrap_or_else(|_| v.to_string()));

    let logs = props
        .result
        .as_ref()
        .and_then(RunResult::logs)
        .filter(|l| !l.is_empty())
        .map(|l| Html::from_html_unchecked(AttrValue::from(render_log_lines(l))));

    html! {
        <div class="panel result-panel">
            <div class="panel-header">
                <h2>{ "Result" }</h2>
            </div>
            <div class="panel-content">
                if let Some(error) = error {
                    <div class="error">{ error }</div>
                }
                if let Some(output) = output {
                    <pre class="result-output">{ output }</pre>
                } else if props.result.is_none() {
                    <p class="hint">{ "Run the configuration to see the result." }</p>
                }
                if let Some(logs) = logs {
                    <details class="result-logs" open=true>
                        <summary>{ "Logs" }</summary>
                        <div class="log-lines">{ logs }</div>
                    </details>
                }
            </div>
        </div>
    }
}
