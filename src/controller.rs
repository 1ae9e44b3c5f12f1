//! Playground controller.
//!
//! Owns the editable state and the last run result, and drives the
//! lifecycle:
//!
//! ```text
//!  new() ──> Loading ──first_rendered()──> Ready
//!
//!  wasm:  Idle ──first_rendered()──> Loading ──wasm_loaded()──> Loaded
//!                                            └─wasm_failed()──> Failed
//! ```
//!
//! Panels never touch the state directly; they call the setters here and
//! re-render from the getters.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{PlaygroundError, Result};
use crate::evaluator::{EvaluatorInfo, RunResult, StatementsExecutor, docs_urls};
use crate::events::{EventBus, PlaygroundEvent, RunCompleted};
use crate::examples::{ConfigExample, payload_example_for};
use crate::options::PlaygroundOptions;
use crate::payload::{OtlpType, classify_payload, pretty_json};
use crate::state::PlaygroundState;

/// Whether the shell has finished its first render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// Progress of the evaluator module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WasmStatus {
    Idle,
    Loading,
    Loaded,
    /// Load failed; the message is shown until the page is reloaded.
    Failed(String),
}

/// Coordinates panels, the evaluator, and host notifications.
pub struct PlaygroundController<E> {
    options: PlaygroundOptions,
    executor: E,
    state: PlaygroundState,
    phase: Phase,
    wasm: WasmStatus,
    evaluators: Vec<EvaluatorInfo>,
    docs_urls: HashMap<String, Option<String>>,
    result: Option<RunResult>,
    run_error: Option<String>,
    selected_payload_example: Option<OtlpType>,
    events: EventBus,
}

impl<E: StatementsExecutor> PlaygroundController<E> {
    pub fn new(options: PlaygroundOptions, executor: E) -> Self {
        let state = options.initial_state();
        Self {
            options,
            executor,
            state,
            phase: Phase::Loading,
            wasm: WasmStatus::Idle,
            evaluators: Vec::new(),
            docs_urls: HashMap::new(),
            result: None,
            run_error: None,
            selected_payload_example: None,
            events: EventBus::new(),
        }
    }

    /// Register a host listener.
    pub fn subscribe(&mut self, listener: impl Fn(&PlaygroundEvent) + 'static) {
        self.events.subscribe(listener);
    }

    /// The first render is on screen.
    ///
    /// Moves to `Ready`, marks the evaluator module as loading, and applies
    /// the share link in `location_hash` if there is a valid one.
    pub fn first_rendered(&mut self, location_hash: Option<&str>) {
        self.phase = Phase::Ready;
        self.wasm = WasmStatus::Loading;

        if self.options.disable_share_link {
            return;
        }
        if let Some(shared) = location_hash.and_then(PlaygroundState::decode) {
            debug!(evaluator = %shared.evaluator, "restoring state from share link");
            self.set_state(shared);
        }
    }

    /// The evaluator module is running; list its evaluators.
    pub fn wasm_loaded(&mut self) {
        match self.executor.list_evaluators() {
            Ok(evaluators) => {
                debug!(count = evaluators.len(), "evaluator module ready");
                self.docs_urls = docs_urls(&evaluators);
                self.evaluators = evaluators;
                let first_load = self.wasm != WasmStatus::Loaded;
                self.wasm = WasmStatus::Loaded;
                if first_load {
                    self.events.publish(&PlaygroundEvent::WasmReady);
                }
            }
            Err(e) => self.wasm_failed(e.to_string()),
        }
    }

    /// The evaluator module could not be fetched or started.
    pub fn wasm_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "evaluator module failed to load");
        self.wasm = WasmStatus::Failed(message);
    }

    /// Run the config against the payload.
    ///
    /// An unparseable payload is reported through [`Self::run_error`] and
    /// leaves both the state and the previous result untouched. Evaluator
    /// failures end up inside the returned result.
    pub fn run(&mut self) -> Result<&RunResult> {
        if self.wasm != WasmStatus::Loaded {
            return Err(PlaygroundError::EvaluatorNotLoaded);
        }

        let payload_type = match classify_payload(&self.state.payload) {
            Ok(payload_type) => payload_type,
            Err(e) => {
                self.run_error = Some(format!("Invalid OTLP JSON payload: {}", e));
                return Err(e);
            }
        };

        let state = self.state.clone();
        let result = self
            .executor
            .execute(&state.config, payload_type, &state.payload, &state.evaluator)
            .unwrap_or_else(|e| RunResult::from_error(e.to_string()));
        let error = result.is_error();
        debug!(evaluator = %state.evaluator, %payload_type, error, "run completed");

        self.events
            .publish(&PlaygroundEvent::RunCompleted(RunCompleted {
                state,
                result: result.clone(),
                error,
            }));
        self.run_error = None;
        Ok(&*self.result.insert(result))
    }

    /// Replace the whole state, e.g. from a share link.
    pub fn set_state(&mut self, state: PlaygroundState) {
        self.state = state;
        self.selected_payload_example = None;
    }

    pub fn set_config(&mut self, config: impl Into<String>) {
        self.state.config = config.into();
    }

    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.state.payload = payload.into();
    }

    /// Select another evaluator. Does not rerun.
    pub fn set_evaluator(&mut self, evaluator: impl Into<String>) {
        self.state.evaluator = evaluator.into();
    }

    /// Load an example: its config, and the sample payload for its signal.
    ///
    /// Whatever payload the user had typed is overwritten.
    pub fn select_config_example(&mut self, example: &ConfigExample) {
        let sample = payload_example_for(example.otlp_type);
        self.state.config = example.config.to_string();
        self.state.payload = pretty_json(sample).unwrap_or_else(|_| sample.to_string());
        self.selected_payload_example = Some(example.otlp_type);
    }

    /// Share-link token for the current state, unless sharing is disabled.
    pub fn share_token(&self) -> Option<String> {
        if self.options.disable_share_link {
            None
        } else {
            Some(self.state.encode())
        }
    }

    /// True when the run action should be enabled.
    pub fn can_run(&self) -> bool {
        self.phase == Phase::Ready
            && self.wasm == WasmStatus::Loaded
            && !self.state.evaluator.is_empty()
    }

    pub fn state(&self) -> &PlaygroundState {
        &self.state
    }

    pub fn options(&self) -> &PlaygroundOptions {
        &self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn wasm_status(&self) -> &WasmStatus {
        &self.wasm
    }

    pub fn is_wasm_loading(&self) -> bool {
        self.wasm == WasmStatus::Loading
    }

    pub fn evaluators(&self) -> &[EvaluatorInfo] {
        &self.evaluators
    }

    /// Docs URL of the selected evaluator, if the module provides one.
    pub fn docs_url(&self) -> Option<&str> {
        self.docs_urls
            .get(&self.state.evaluator)
            .and_then(|url| url.as_deref())
    }

    pub fn result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    /// Message from the last rejected run, cleared by the next good one.
    pub fn run_error(&self) -> Option<&str> {
        self.run_error.as_deref()
    }

    pub fn selected_payload_example(&self) -> Option<OtlpType> {
        self.selected_payload_example
    }
}
