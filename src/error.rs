//! Error type shared by the playground crates.

use thiserror::Error;

/// Errors surfaced by the playground core.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// The payload text is not valid JSON.
    #[error("{0}")]
    PayloadSyntax(#[from] serde_json::Error),

    /// The payload is JSON but has no recognizable OTLP top-level key.
    #[error("unable to infer the OTLP data type, expected one of: {expected}")]
    UnknownPayloadType { expected: &'static str },

    /// The share-link token could not be turned back into a state.
    #[error("invalid share link: {0}")]
    ShareLink(String),

    /// The evaluator module failed or returned something unusable.
    #[error("evaluator error: {0}")]
    Evaluator(String),

    /// A run was requested before the evaluator module finished loading.
    #[error("the evaluator module is not loaded")]
    EvaluatorNotLoaded,
}

/// Result alias for playground operations.
pub type Result<T> = std::result::Result<T, PlaygroundError>;
