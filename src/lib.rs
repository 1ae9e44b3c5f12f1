//! # ottl-playground
//!
//! Core of a browser playground for the OpenTelemetry Transformation
//! Language (OTTL).
//!
//! The playground lets a user paste an OTLP JSON payload, write a transform
//! or filter processor config, run it through a WebAssembly build of the
//! collector processors, and look at the output. This crate holds the parts
//! that do not depend on a browser:
//!
//! - **Example catalog**: sample configs per evaluator, sample payloads per
//!   signal
//! - **Share links**: the whole editable state packed into a URL fragment
//! - **Controller**: lifecycle, runs, and host notifications
//! - **HTML escaping** for text rendered as raw markup
//!
//! The evaluator module is reached through [`StatementsExecutor`], so the
//! controller can be driven by a fake in tests.
//!
//! ## Example
//!
//! ```
//! use ottl_playground::PlaygroundState;
//!
//! let state = PlaygroundState {
//!     config: "log_statements: []".to_string(),
//!     payload: r#"{"resourceLogs":[]}"#.to_string(),
//!     evaluator: "transform_processor".to_string(),
//! };
//!
//! let token = state.encode();
//! let restored = PlaygroundState::decode(&token).unwrap();
//! assert_eq!(restored.config, state.config);
//! assert_eq!(restored.payload, "{\n  \"resourceLogs\": []\n}");
//! ```

pub mod controller;
pub mod error;
pub mod escape;
pub mod evaluator;
pub mod events;
pub mod examples;
pub mod options;
pub mod payload;
pub mod state;

pub use controller::{Phase, PlaygroundController, WasmStatus};
pub use error::{PlaygroundError, Result};
pub use escape::escape_html;
pub use evaluator::{EvaluatorInfo, RunResult, StatementsExecutor, docs_urls};
pub use events::{EventBus, PlaygroundEvent, RunCompleted};
pub use examples::{
    ConfigExample, FILTER_PROCESSOR_ID, TRANSFORM_PROCESSOR_ID, evaluator_ids, examples_for,
    find_example, payload_example_for,
};
pub use options::{DEFAULT_TITLE, PlaygroundOptions, WASM_FILE_NAME};
pub use payload::{OtlpType, classify_payload, compact_json, pretty_json};
pub use state::{DEFAULT_EVALUATOR, DEFAULT_PAYLOAD, PlaygroundState, share_url, token_from_link};
