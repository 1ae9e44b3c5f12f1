//! Playground state and its share-link encoding.
//!
//! A share link carries the whole editable state in the URL fragment:
//!
//! ```text
//! https://host/playground#eyJjb25maWciOiIiLCJwYXlsb2FkIjoie30iLC...
//!                         \_______ base64(UTF-8 JSON) _______/
//! ```
//!
//! The JSON object has exactly three string members, `config`, `payload`
//! and `evaluator`, in that order.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{PlaygroundError, Result};
use crate::examples::TRANSFORM_PROCESSOR_ID;
use crate::payload::{compact_json, pretty_json};

/// Evaluator selected when nothing else is configured.
pub const DEFAULT_EVALUATOR: &str = TRANSFORM_PROCESSOR_ID;

/// Payload shown when nothing else is configured.
pub const DEFAULT_PAYLOAD: &str = "{}";

/// Tokens may come from other encoders; padding is optional on decode.
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Everything the user edits, and everything a share link restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundState {
    /// Processor config in OTTL/YAML.
    pub config: String,
    /// OTLP JSON payload text.
    pub payload: String,
    /// Evaluator id, e.g. `transform_processor`.
    pub evaluator: String,
}

impl Default for PlaygroundState {
    fn default() -> Self {
        Self {
            config: String::new(),
            payload: DEFAULT_PAYLOAD.to_string(),
            evaluator: DEFAULT_EVALUATOR.to_string(),
        }
    }
}

/// Members of a decoded link. Old links may lack some of them.
#[derive(Deserialize)]
struct SharedFields {
    config: Option<String>,
    payload: Option<String>,
    evaluator: Option<String>,
}

impl PlaygroundState {
    /// Encode the state as a share-link token.
    ///
    /// The payload is compacted when it parses as JSON, to keep links short.
    /// Invalid payloads are carried verbatim.
    pub fn encode(&self) -> String {
        let payload = compact_json(&self.payload).unwrap_or_else(|_| self.payload.clone());
        let shared = json!({
            "config": self.config,
            "payload": payload,
            "evaluator": self.evaluator,
        });
        STANDARD.encode(shared.to_string())
    }

    /// Decode a share-link token, or `None` if it is not one.
    ///
    /// A JSON payload comes back indented for editing.
    pub fn decode(token: &str) -> Option<Self> {
        match Self::parse_token(token) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!(error = %e, "ignoring share link");
                None
            }
        }
    }

    /// Strict variant of [`PlaygroundState::decode`].
    pub fn parse_token(token: &str) -> Result<Self> {
        let token = token.trim().trim_start_matches('#');
        if token.is_empty() {
            return Err(PlaygroundError::ShareLink("empty token".to_string()));
        }

        let bytes = STANDARD_LENIENT
            .decode(token)
            .or_else(|_| URL_SAFE_LENIENT.decode(token))
            .map_err(|e| PlaygroundError::ShareLink(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| PlaygroundError::ShareLink(e.to_string()))?;
        let fields: SharedFields =
            serde_json::from_str(&text).map_err(|e| PlaygroundError::ShareLink(e.to_string()))?;

        let mut payload = fields.payload.unwrap_or_else(|| DEFAULT_PAYLOAD.to_string());
        if !payload.is_empty()
            && let Ok(pretty) = pretty_json(&payload)
        {
            payload = pretty;
        }

        Ok(Self {
            config: fields.config.unwrap_or_default(),
            payload,
            evaluator: fields
                .evaluator
                .unwrap_or_else(|| DEFAULT_EVALUATOR.to_string()),
        })
    }
}

/// Put `token` in the fragment of `href`, replacing any existing fragment.
pub fn share_url(href: &str, token: &str) -> String {
    let base = href.split_once('#').map_or(href, |(base, _)| base);
    format!("{}#{}", base, token)
}

/// Extract the token from either a bare token or a full share URL.
pub fn token_from_link(link: &str) -> &str {
    link.split_once('#').map_or(link, |(_, fragment)| fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> PlaygroundState {
        PlaygroundState {
            config: "log_statements:\n - context: log\n   statements:\n    - set(body, \"ünïcode\")"
                .to_string(),
            payload: "{\n  \"resourceLogs\": [],\n  \"extra\": 1\n}".to_string(),
            evaluator: "filter_processor".to_string(),
        }
    }

    #[test]
    fn test_default_state() {
        let state = PlaygroundState::default();
        assert_eq!(state.evaluator, "transform_processor");
        assert_eq!(state.payload, "{}");
        assert!(state.config.is_empty());
    }

    #[test]
    fn test_decode_restores_config_and_evaluator() {
        let state = sample_state();
        let decoded = PlaygroundState::decode(&state.encode()).unwrap();
        assert_eq!(decoded.config, state.config);
        assert_eq!(decoded.evaluator, state.evaluator);
        let original: serde_json::Value = serde_json::from_str(&state.payload).unwrap();
        let restored: serde_json::Value = serde_json::from_str(&decoded.payload).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_encode_compacts_payload() {
        let token = sample_state().encode();
        let text = String::from_utf8(STANDARD.decode(&token).unwrap()).unwrap();
        assert!(text.contains(r#""payload":"{\"resourceLogs\":[],\"extra\":1}""#));
        assert!(text.starts_with(r#"{"config":"#));
    }

    #[test]
    fn test_encode_keeps_invalid_payload_verbatim() {
        let state = PlaygroundState {
            payload: "{ not json".to_string(),
            ..PlaygroundState::default()
        };
        let decoded = PlaygroundState::decode(&state.encode()).unwrap();
        assert_eq!(decoded.payload, "{ not json");
    }

    #[test]
    fn test_decode_pretty_prints_payload() {
        let state = PlaygroundState {
            payload: r#"{"resourceSpans":[{"a":1}]}"#.to_string(),
            ..PlaygroundState::default()
        };
        let decoded = PlaygroundState::decode(&state.encode()).unwrap();
        assert_eq!(
            decoded.payload,
            "{\n  \"resourceSpans\": [\n    {\n      \"a\": 1\n    }\n  ]\n}"
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let state = sample_state();
        assert_eq!(state.encode(), state.encode());
    }

    #[test]
    fn test_decode_rejects_malformed_tokens() {
        assert!(PlaygroundState::decode("").is_none());
        assert!(PlaygroundState::decode("!!not base64!!").is_none());
        // Valid base64 of "hello", which is not JSON.
        assert!(PlaygroundState::decode("aGVsbG8=").is_none());
        // Valid base64 of invalid UTF-8.
        assert!(PlaygroundState::decode(&STANDARD.encode([0xff, 0xfe])).is_none());
    }

    #[test]
    fn test_decode_accepts_leading_hash() {
        let token = format!("#{}", sample_state().encode());
        assert!(PlaygroundState::decode(&token).is_some());
    }

    #[test]
    fn test_decode_fills_missing_fields() {
        let token = STANDARD.encode(r#"{"config":"x"}"#);
        let state = PlaygroundState::decode(&token).unwrap();
        assert_eq!(state.config, "x");
        assert_eq!(state.payload, "{}");
        assert_eq!(state.evaluator, DEFAULT_EVALUATOR);
    }

    #[test]
    fn test_decode_accepts_any_alphabet_and_padding() {
        use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};

        // "?>" in the config puts '/' or '_' into the encoded text.
        let json = r#"{"config":"a ?> b","payload":"{}","evaluator":"filter_processor"}"#;
        for token in [
            STANDARD.encode(json),
            STANDARD_NO_PAD.encode(json),
            URL_SAFE.encode(json),
            URL_SAFE_NO_PAD.encode(json),
        ] {
            let state = PlaygroundState::decode(&token)
                .unwrap_or_else(|| panic!("token {} was rejected", token));
            assert_eq!(state.config, "a ?> b");
            assert_eq!(state.evaluator, "filter_processor");
        }
    }

    #[test]
    fn test_share_url() {
        assert_eq!(share_url("https://a.b/p", "T"), "https://a.b/p#T");
        assert_eq!(share_url("https://a.b/p#old", "T"), "https://a.b/p#T");
    }

    #[test]
    fn test_token_from_link() {
        assert_eq!(token_from_link("https://a.b/p#abc"), "abc");
        assert_eq!(token_from_link("abc"), "abc");
    }
}
