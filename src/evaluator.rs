//! The boundary to the compiled OTTL evaluator.
//!
//! The evaluator itself lives in a separate WebAssembly module. The
//! playground only sees it through [`StatementsExecutor`], which the host
//! supplies when it builds the controller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::payload::OtlpType;

/// Metadata for one evaluator exposed by the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, rename = "docsURL")]
    pub docs_url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl EvaluatorInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            path: None,
            docs_url: None,
            version: None,
        }
    }

    /// Human-readable label, falling back to the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Map evaluator ids to their documentation URLs.
pub fn docs_urls(evaluators: &[EvaluatorInfo]) -> HashMap<String, Option<String>> {
    evaluators
        .iter()
        .map(|e| (e.id.clone(), e.docs_url.clone()))
        .collect()
}

/// Whatever the evaluator returned for one run.
///
/// The value is opaque to the playground except for three conventional
/// members: `value` (output JSON), `logs` and `error`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunResult(pub Value);

impl RunResult {
    /// A result that carries only an error message.
    pub fn from_error(message: impl Into<String>) -> Self {
        let mut object = serde_json::Map::new();
        object.insert("value".to_string(), Value::String(String::new()));
        object.insert("logs".to_string(), Value::String(String::new()));
        object.insert("error".to_string(), Value::String(message.into()));
        RunResult(Value::Object(object))
    }

    /// True if the result has an `error` member, whatever its value.
    pub fn is_error(&self) -> bool {
        self.0.as_object().is_some_and(|o| o.contains_key("error"))
    }

    pub fn error(&self) -> Option<&str> {
        self.member("error")
    }

    pub fn value(&self) -> Option<&str> {
        self.member("value")
    }

    pub fn logs(&self) -> Option<&str> {
        self.member("logs")
    }

    fn member(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// The two operations the evaluator module exports.
pub trait StatementsExecutor {
    /// Evaluators available in the loaded module.
    fn list_evaluators(&self) -> Result<Vec<EvaluatorInfo>>;

    /// Run `config` against `payload` with the given evaluator.
    fn execute(
        &self,
        config: &str,
        payload_type: OtlpType,
        payload: &str,
        evaluator_id: &str,
    ) -> Result<RunResult>;
}

impl<T: StatementsExecutor + ?Sized> StatementsExecutor for Box<T> {
    fn list_evaluators(&self) -> Result<Vec<EvaluatorInfo>> {
        (**self).list_evaluators()
    }

    fn execute(
        &self,
        config: &str,
        payload_type: OtlpType,
        payload: &str,
        evaluator_id: &str,
    ) -> Result<RunResult> {
        (**self).execute(config, payload_type, payload, evaluator_id)
    }
}
