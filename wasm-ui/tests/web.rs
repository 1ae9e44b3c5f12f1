//! Browser tests for the host integration and the JS evaluator bridge.

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::{Function, Reflect};
use ottl_playground::{
    OtlpType, PlaygroundEvent, PlaygroundState, RunCompleted, RunResult, StatementsExecutor,
    share_url,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use wasm_ui::clipboard::copy_with_selection;
use wasm_ui::host::{
    RUN_RESULT_EVENT, WASM_READY_EVENT, dom_event_bridge, location_hash, options_from_element,
    page_href, set_location_hash,
};
use wasm_ui::wasm::{JsStatementsExecutor, module_url};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_global(name: &str, value: &JsValue) {
    Reflect::set(&js_sys::global(), &JsValue::from_str(name), value).unwrap();
}

#[wasm_bindgen_test]
fn test_options_from_attributes() {
    let element = document().create_element("playground-stage").unwrap();
    element.set_attribute("title", "Custom").unwrap();
    element.set_attribute("evaluator", "filter_processor").unwrap();
    element.set_attribute("hide-run-button", "").unwrap();
    element.set_attribute("base-url", "https://cdn.example/assets/").unwrap();

    let options = options_from_element(&element);
    assert_eq!(options.title, "Custom");
    assert_eq!(options.evaluator.as_deref(), Some("filter_processor"));
    assert!(options.hide_run_button);
    assert!(!options.hide_evaluators);
    assert!(!options.disable_share_link);
    assert_eq!(options.config, None);
    assert_eq!(options.base_url, "https://cdn.example/assets/");
}

#[wasm_bindgen_test]
fn test_module_url() {
    assert_eq!(module_url("").unwrap(), "ottlplayground.wasm");
    assert_eq!(
        module_url("https://cdn.example/assets/").unwrap(),
        "https://cdn.example/assets/ottlplayground.wasm"
    );
}

#[wasm_bindgen_test]
fn test_executor_without_module() {
    Reflect::delete_property(&js_sys::global(), &JsValue::from_str("statementsExecutors")).unwrap();
    let err = JsStatementsExecutor.list_evaluators().unwrap_err();
    assert!(err.to_string().contains("statementsExecutors is not defined"));
}

#[wasm_bindgen_test]
fn test_executor_calls_module_globals() {
    set_global(
        "statementsExecutors",
        &Function::new_no_args(
            "return [{id: 'transform_processor', docsURL: 'https://docs'}, {id: 'filter_processor', docsURL: null}];",
        ),
    );
    set_global(
        "executeStatements",
        &Function::new_with_args(
            "config, type, payload, id",
            "if (id === 'bad') { return {value: '', logs: '', error: 'unsupported evaluator ' + id}; } \
             return {value: payload, logs: type + ':' + config};",
        ),
    );

    let evaluators = JsStatementsExecutor.list_evaluators().unwrap();
    assert_eq!(evaluators.len(), 2);
    assert_eq!(evaluators[0].docs_url.as_deref(), Some("https://docs"));

    let ok = JsStatementsExecutor
        .execute("cfg", OtlpType::Logs, "{}", "transform_processor")
        .unwrap();
    assert!(!ok.is_error());
    assert_eq!(ok.logs(), Some("logs:cfg"));

    let failed = JsStatementsExecutor
        .execute("cfg", OtlpType::Traces, "{}", "bad")
        .unwrap();
    assert_eq!(failed.error(), Some("unsupported evaluator bad"));
}

#[wasm_bindgen_test]
fn test_bridge_dispatches_wasm_ready_on_window() {
    let fired = Rc::new(Cell::new(false));
    let window = web_sys::window().unwrap();
    let _listener = {
        let fired = fired.clone();
        EventListener::new(&window, WASM_READY_EVENT, move |_| fired.set(true))
    };

    dom_event_bridge(None)(&PlaygroundEvent::WasmReady);
    assert!(fired.get());
}

#[wasm_bindgen_test]
fn test_bridge_dispatches_run_result_on_host() {
    let host = document().create_element("playground-stage").unwrap();
    let detail_error = Rc::new(Cell::new(None));
    let _listener = {
        let detail_error = detail_error.clone();
        EventListener::new(&host, RUN_RESULT_EVENT, move |event| {
            let event: &web_sys::CustomEvent = wasm_bindgen::JsCast::unchecked_ref(event);
            let error = Reflect::get(&event.detail(), &JsValue::from_str("error"))
                .ok()
                .and_then(|v| v.as_bool());
            detail_error.set(error);
        })
    };

    let bridge = dom_event_bridge(Some(host.clone()));
    bridge(&PlaygroundEvent::RunCompleted(RunCompleted {
        state: PlaygroundState::default(),
        result: RunResult::from_error("boom"),
        error: true,
    }));
    assert_eq!(detail_error.get(), Some(true));
}

#[wasm_bindgen_test]
fn test_location_hash_holds_share_token() {
    let state = PlaygroundState {
        config: "log_statements:\n  - set(body, \"x\")".to_string(),
        payload: r#"{"resourceLogs":[]}"#.to_string(),
        evaluator: "filter_processor".to_string(),
    };
    let token = state.encode();

    set_location_hash(&token).unwrap();
    let hash = location_hash().unwrap();
    assert_eq!(hash, token);
    assert!(!hash.starts_with('#'));

    let restored = PlaygroundState::decode(&hash).unwrap();
    assert_eq!(restored.config, state.config);
    assert_eq!(restored.evaluator, state.evaluator);

    let href = page_href().unwrap();
    assert!(share_url(&href, &token).ends_with(&format!("#{}", token)));

    set_location_hash("").unwrap();
}

#[wasm_bindgen_test]
fn test_empty_location_hash_is_none() {
    set_location_hash("").unwrap();
    assert_eq!(location_hash(), None);
}

#[wasm_bindgen_test]
fn test_copy_fallback_removes_textarea() {
    let window = web_sys::window().unwrap();
    let body = document().body().unwrap();
    let before = body.query_selector_all("textarea").unwrap().length();

    // Headless browsers may refuse execCommand("copy"); only cleanup matters here.
    let _ = copy_with_selection(&window, "copied text");

    assert_eq!(body.query_selector_all("textarea").unwrap().length(), before);
}
