//! Host-supplied playground settings.

use crate::state::{DEFAULT_EVALUATOR, DEFAULT_PAYLOAD, PlaygroundState};

/// Title shown when the host does not set one.
pub const DEFAULT_TITLE: &str = "OTTL Playground";
/// File name of the evaluator module, relative to the base URL.
pub const WASM_FILE_NAME: &str = "ottlplayground.wasm";

/// What an embedding page can configure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundOptions {
    pub title: String,
    pub config: Option<String>,
    pub payload: Option<String>,
    pub evaluator: Option<String>,
    pub hide_evaluators: bool,
    pub hide_run_button: bool,
    pub disable_share_link: bool,
    /// Base URL the evaluator module is resolved against. Empty means
    /// relative to the page.
    pub base_url: String,
}

impl Default for PlaygroundOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            config: None,
            payload: None,
            evaluator: None,
            hide_evaluators: false,
            hide_run_button: false,
            disable_share_link: false,
            base_url: String::new(),
        }
    }
}

impl PlaygroundOptions {
    /// Initial state, with defaults for anything the host left out.
    pub fn initial_state(&self) -> PlaygroundState {
        PlaygroundState {
            config: self.config.clone().unwrap_or_default(),
            payload: self
                .payload
                .clone()
                .unwrap_or_else(|| DEFAULT_PAYLOAD.to_string()),
            evaluator: self
                .evaluator
                .clone()
                .unwrap_or_else(|| DEFAULT_EVALUATOR.to_string()),
        }
    }
}
