//! Gemini `generateContent` client.
//!
//! One blocking POST per prompt:
//!
//! ```text
//! POST {base_url}/models/{model}:generateContent
//! x-goog-api-key: <credential>
//! {"contents":[{"parts":[{"text":"<prompt>"}]}]}
//! ```
//!
//! The completion is the concatenated text of the first candidate's parts.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use stackforge_core::{
    application::ports::{GenerationError, TextGenerator},
    error::{ForgeError, ForgeResult},
};
use tracing::{debug, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest error body echoed back in a status failure.
const MAX_ERROR_BODY: usize = 200;

// ── Credential ────────────────────────────────────────────────────────────────

/// Secret credential for the endpoint. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the credential from the environment variable `var`.
    pub fn from_env(var: &str) -> ForgeResult<Self> {
        Self::from_value(var, std::env::var(var).ok())
    }

    fn from_value(var: &str, value: Option<String>) -> ForgeResult<Self> {
        match value.map(|v| v.trim().to_string()) {
            Some(key) if !key.is_empty() => Ok(Self(key)),
            Some(_) => Err(ForgeError::configuration(format!(
                "{var} is set but empty"
            ))),
            None => Err(ForgeError::configuration(format!(
                "{var} is not set; export it or add it to a .env file"
            ))),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Defaults for everything but the credential.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, or `None` when it carries none.
    pub(crate) fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Human-readable reason from an error response body.
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// Production text generator backed by the Gemini REST API.
pub struct GeminiGenerator {
    http: reqwest::blocking::Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> ForgeResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("stackforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ForgeError::configuration(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

impl fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TextGenerator for GeminiGenerator {
    #[instrument(skip_all, fields(model = %self.config.model, prompt_len = prompt.len()))]
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(self.config.endpoint())
            .header("x-goog-api-key", self.config.api_key.expose())
            .json(&GenerateRequest::new(prompt))
            .send()
            .map_err(|e| GenerationError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = error_message(&body);
            warn!(status = status.as_u16(), %message, "Endpoint rejected request");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GenerationError::MalformedResponse(e.without_url().to_string()))?;

        let text = parsed.text().ok_or_else(|| {
            GenerationError::MalformedResponse("no text in first candidate".into())
        })?;

        debug!(bytes = text.len(), "Received completion");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn request_body_has_single_part() {
        let body = serde_json::to_value(GenerateRequest::new("hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn first_candidate_parts_are_joined() {
        let response = parse(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"from fastapi "},{"text":"import FastAPI"}],"role":"model"}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        );
        assert_eq!(response.text().as_deref(), Some("from fastapi import FastAPI"));
    }

    #[test]
    fn missing_candidates_yield_no_text() {
        assert_eq!(parse(r#"{}"#).text(), None);
        assert_eq!(parse(r#"{"candidates":[]}"#).text(), None);
        assert_eq!(
            parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).text(),
            None
        );
        assert_eq!(
            parse(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#).text(),
            None
        );
    }

    #[test]
    fn error_envelope_message_is_extracted() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(error_message(body), "Quota exceeded");
    }

    #[test]
    fn long_plain_error_body_is_truncated() {
        let body = "x".repeat(500);
        let message = error_message(&body);
        assert_eq!(message.len(), MAX_ERROR_BODY + 3);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let config = GeminiConfig::new(ApiKey::new("k"))
            .with_base_url("http://localhost:8080/v1beta/")
            .with_model("gemini-pro");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn api_key_is_redacted_in_debug() {
        let config = GeminiConfig::new(ApiKey::new("super-secret"));
        let shown = format!("{config:?}");
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("****"));
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = ApiKey::from_value("GEMINI_API_KEY", None).unwrap_err();
        assert!(matches!(err, ForgeError::Configuration { .. }));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(ApiKey::from_value("GEMINI_API_KEY", Some("  ".into())).is_err());
        let key = ApiKey::from_value("GEMINI_API_KEY", Some(" abc \n".into())).unwrap();
        assert_eq!(key.expose(), "abc");
    }
}
