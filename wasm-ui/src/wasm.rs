//! Loading and calling the compiled evaluator module.
//!
//! The evaluator is a Go program built for `GOOS=js GOARCH=wasm`. Once
//! started it registers two globals:
//!
//! - `statementsExecutors()` returns `[{id, name, path, docsURL, version}]`
//! - `executeStatements(config, otlpType, payload, evaluatorId)` returns
//!   `{value, logs, error?}`
//!
//! The page must include Go's `wasm_exec.js`, which defines the `Go` class.

use js_sys::{Array, Function, Object, Reflect, WebAssembly};
use ottl_playground::{
    EvaluatorInfo, OtlpType, PlaygroundError, Result, RunResult, StatementsExecutor,
    WASM_FILE_NAME,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Render a thrown JS value as an evaluator error.
pub fn js_error(value: JsValue) -> PlaygroundError {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
    };
    PlaygroundError::Evaluator(message)
}

fn global_function(name: &str) -> Result<Function> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .map_err(js_error)?
        .dyn_into::<Function>()
        .map_err(|_| PlaygroundError::Evaluator(format!("{} is not defined", name)))
}

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T> {
    let text = js_sys::JSON::stringify(value)
        .map_err(js_error)?
        .as_string()
        .unwrap_or_else(|| "null".to_string());
    serde_json::from_str(&text).map_err(|e| PlaygroundError::Evaluator(e.to_string()))
}

/// Evaluator backed by the globals the Go module registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsStatementsExecutor;

impl StatementsExecutor for JsStatementsExecutor {
    fn list_evaluators(&self) -> Result<Vec<EvaluatorInfo>> {
        let listed = global_function("statementsExecutors")?
            .call0(&JsValue::NULL)
            .map_err(js_error)?;
        from_js(&listed)
    }

    fn execute(
        &self,
        config: &str,
        payload_type: OtlpType,
        payload: &str,
        evaluator_id: &str,
    ) -> Result<RunResult> {
        let args = Array::of4(
            &JsValue::from_str(config),
            &JsValue::from_str(payload_type.as_str()),
            &JsValue::from_str(payload),
            &JsValue::from_str(evaluator_id),
        );
        let result = global_function("executeStatements")?
            .apply(&JsValue::NULL, &args)
            .map_err(js_error)?;
        Ok(RunResult(from_js(&result)?))
    }
}

/// Where to fetch the module from.
pub fn module_url(base_url: &str) -> Result<String> {
    if base_url.is_empty() {
        return Ok(WASM_FILE_NAME.to_string());
    }
    web_sys::Url::new_with_base(WASM_FILE_NAME, base_url)
        .map(|url| url.href())
        .map_err(js_error)
}

/// Fetch, instantiate and start the evaluator module.
///
/// Returns once the module has registered its globals.
pub async fn load_evaluator_module(base_url: &str) -> Result<()> {
    let window = web_sys::window()
        .ok_or_else(|| PlaygroundError::Evaluator("no window".to_string()))?;
    let url = module_url(base_url)?;

    let go_class = global_function("Go")?;
    let go = Reflect::construct(&go_class, &Array::new()).map_err(js_error)?;
    let imports: Object = Reflect::get(&go, &JsValue::from_str("importObject"))
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    let response = window.fetch_with_str(&url);
    let instantiated = JsFuture::from(WebAssembly::instantiate_streaming(&response, &imports))
        .await
        .map_err(js_error)?;
    let instance = Reflect::get(&instantiated, &JsValue::from_str("instance")).map_err(js_error)?;

    // run() resolves only when the Go program exits; globals exist as soon
    // as it returns.
    let run: Function = Reflect::get(&go, &JsValue::from_str("run"))
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    run.call1(&go, &instance).map_err(js_error)?;
    Ok(())
}
