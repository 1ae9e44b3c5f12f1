//! Integration with the embedding page: attributes, location, DOM events.

use gloo::console;
use ottl_playground::{DEFAULT_TITLE, PlaygroundEvent, PlaygroundOptions};
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit, Element, EventTarget, Window};

/// Tag name the playground mounts on.
pub const HOST_TAG: &str = "playground-stage";
/// Fired on `window` once the evaluator module is ready.
pub const WASM_READY_EVENT: &str = "playground-wasm-ready";
/// Fired on the host element after every run.
pub const RUN_RESULT_EVENT: &str = "playground-run-result";

/// Read playground settings from the host element's attributes.
///
/// Boolean settings are on when the attribute is present.
pub fn options_from_element(element: &Element) -> PlaygroundOptions {
    PlaygroundOptions {
        title: element
            .get_attribute("title")
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        config: element.get_attribute("config"),
        payload: element.get_attribute("payload"),
        evaluator: element.get_attribute("evaluator"),
        hide_evaluators: element.has_attribute("hide-evaluators"),
        hide_run_button: element.has_attribute("hide-run-button"),
        disable_share_link: element.has_attribute("disable-share-link"),
        base_url: element.get_attribute("base-url").unwrap_or_default(),
    }
}

/// The outermost window we are allowed to read, for iframe embeds.
fn top_window() -> Option<Window> {
    let window = web_sys::window()?;
    match window.top() {
        Ok(Some(top)) if top.location().href().is_ok() => Some(top),
        _ => Some(window),
    }
}

/// Current URL fragment without the `#`, if any.
pub fn location_hash() -> Option<String> {
    let hash = top_window()?.location().hash().ok()?;
    let hash = hash.trim_start_matches('#');
    (!hash.is_empty()).then(|| hash.to_string())
}

/// Full address of the (top-level) page.
pub fn page_href() -> Option<String> {
    top_window()?.location().href().ok()
}

/// Point the page fragment at `token` without reloading.
///
/// Writes the same window [`location_hash`] reads.
pub fn set_location_hash(token: &str) -> Result<(), JsValue> {
    let window = top_window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.location().set_hash(token)
}

fn custom_event(name: &str, detail: Option<&JsValue>) -> Result<CustomEvent, JsValue> {
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_composed(true);
    init.set_cancelable(true);
    if let Some(detail) = detail {
        init.set_detail(detail);
    }
    CustomEvent::new_with_event_init_dict(name, &init)
}

fn dispatch(target: &EventTarget, name: &str, detail: Option<&JsValue>) -> Result<(), JsValue> {
    let event = custom_event(name, detail)?;
    target.dispatch_event(&event)?;
    Ok(())
}

/// Forward controller events to the page as DOM `CustomEvent`s.
///
/// Run results go to `host` (or `window` when there is none), with
/// `{state, result, error}` as the detail.
pub fn dom_event_bridge(host: Option<Element>) -> impl Fn(&PlaygroundEvent) + 'static {
    move |event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let outcome = match event {
            PlaygroundEvent::WasmReady => dispatch(&window, WASM_READY_EVENT, None),
            PlaygroundEvent::RunCompleted(done) => {
                let target: &EventTarget = match &host {
                    Some(host) => host,
                    None => &window,
                };
                serde_json::to_string(done)
                    .map_err(|e| JsValue::from_str(&e.to_string()))
                    .and_then(|text| js_sys::JSON::parse(&text))
                    .and_then(|detail| dispatch(target, RUN_RESULT_EVENT, Some(&detail)))
            }
        };
        if let Err(e) = outcome {
            console::warn!("failed to dispatch playground event", e);
        }
    }
}
