//! OTLP JSON payload helpers.
//!
//! The evaluator needs to know which signal a payload carries before it can
//! unmarshal it. OTLP/JSON documents identify themselves by their single
//! top-level key:
//!
//! ```text
//! {"resourceLogs": [...]}     -> logs
//! {"resourceSpans": [...]}    -> traces
//! {"resourceMetrics": [...]}  -> metrics
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlaygroundError, Result};

/// The telemetry signal carried by an OTLP payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtlpType {
    Logs,
    Traces,
    Metrics,
}

impl OtlpType {
    /// All signal kinds, in catalog order.
    pub const ALL: [OtlpType; 3] = [OtlpType::Logs, OtlpType::Traces, OtlpType::Metrics];

    /// Name passed to the evaluator.
    pub fn as_str(self) -> &'static str {
        match self {
            OtlpType::Logs => "logs",
            OtlpType::Traces => "traces",
            OtlpType::Metrics => "metrics",
        }
    }

    /// Top-level OTLP/JSON key that identifies this signal.
    pub fn root_key(self) -> &'static str {
        match self {
            OtlpType::Logs => "resourceLogs",
            OtlpType::Traces => "resourceSpans",
            OtlpType::Metrics => "resourceMetrics",
        }
    }
}

impl fmt::Display for OtlpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtlpType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OtlpType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown OTLP data type '{}'", s))
    }
}

/// Classify a payload by its top-level OTLP key.
///
/// Fails if the text is not JSON, or if no known key is present.
pub fn classify_payload(text: &str) -> Result<OtlpType> {
    let value: Value = serde_json::from_str(text)?;
    let object = value.as_object();

    OtlpType::ALL
        .into_iter()
        .find(|t| object.is_some_and(|o| o.contains_key(t.root_key())))
        .ok_or(PlaygroundError::UnknownPayloadType {
            expected: "resourceLogs, resourceSpans, resourceMetrics",
        })
}

/// Re-indent JSON text with two spaces.
pub fn pretty_json(text: &str) -> Result<String> {
    let value: Value = serde_json::from_str(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Strip all insignificant whitespace from JSON text.
pub fn compact_json(text: &str) -> Result<String> {
    let value: Value = serde_json::from_str(text)?;
    Ok(serde_json::to_string(&value)?)
}
