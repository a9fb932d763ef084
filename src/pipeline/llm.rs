//! Completion invocation: submit the rendered prompt to a named model.
//!
//! This module is intentionally thin — all prompt engineering lives in
//! [`crate::prompts`] and [`crate::pipeline::prompt`], so request shaping
//! and error mapping can change without touching either.
//!
//! ## Request shaping
//!
//! Exactly one user message carries the full prompt: no system message, no
//! conversation history. Models that enforce a strict-JSON response mode get
//! `response_format: {"type": "json_object"}`; older models are sent a plain
//! free-text completion and the prompt's trailing "return valid JSON"
//! instruction is relied upon instead. Which models support the mode is a
//! capability lookup, not string-equality control flow — new models are
//! added by extending [`STRICT_JSON_MODELS`].

use crate::error::ExtractError;
use crate::output::Usage;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Models that accept the `json_object` response format.
pub static STRICT_JSON_MODELS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["gpt-4o", "gpt-4o-mini", "gpt-4-turbo", "gpt-4.1", "gpt-4.1-mini"])
});

/// Whether `model` supports the strict-JSON response mode.
pub fn supports_strict_json(model: &str) -> bool {
    STRICT_JSON_MODELS.contains(model)
}

/// One shaped completion request, ready for a [`CompletionApi`].
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub strict_json: bool,
}

impl CompletionRequest {
    /// Shape a request for `model`, deriving `strict_json` from the
    /// capability table.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        let model = model.into();
        let strict_json = supports_strict_json(&model);
        Self {
            prompt: prompt.into(),
            model,
            temperature,
            strict_json,
        }
    }
}

/// The raw outcome of one completion call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub raw_text: String,
    pub usage: Usage,
}

/// A hosted chat-completion backend.
///
/// The production implementation is [`OpenAiClient`]; tests inject stubs
/// through [`crate::config::ExtractionConfig::api`].
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Issue one synchronous completion call. No retry: transport, auth,
    /// and rate-limit failures propagate as
    /// [`ExtractError::CompletionRequest`].
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ExtractError>;
}

// ── OpenAI-compatible client ─────────────────────────────────────────────

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI chat completions API (and compatible endpoints).
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Client against the public OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read the credential from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, ExtractError> {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(ExtractError::MissingApiKey),
        }
    }

    /// Point the client at an OpenAI-compatible endpoint
    /// (e.g. a proxy or a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CompletionApi for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ExtractError> {
        let body = ChatRequest::from(request);
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %request.model, strict_json = request.strict_json, prompt_bytes = request.prompt.len(), "sending completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractError::CompletionRequest {
                model: request.model.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::CompletionRequest {
                model: request.model.clone(),
                message: format!("HTTP {status}: {}", truncate(&body, 512)),
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ExtractError::CompletionRequest {
                    model: request.model.clone(),
                    message: format!("undecodable response body: {e}"),
                })?;

        parsed.into_completion(&request.model)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl From<&CompletionRequest> for ChatRequest {
    fn from(req: &CompletionRequest) -> Self {
        Self {
            model: req.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: req.prompt.clone(),
            }],
            temperature: req.temperature,
            response_format: req
                .strict_json
                .then_some(ResponseFormat { kind: "json_object" }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

impl ChatResponse {
    fn into_completion(self, model: &str) -> Result<Completion, ExtractError> {
        let raw_text = self
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ExtractError::EmptyCompletion {
                model: model.to_string(),
            })?;

        Ok(Completion {
            raw_text,
            usage: Usage {
                prompt_tokens: self.usage.prompt_tokens,
                completion_tokens: self.usage.completion_tokens,
                total_tokens: self.usage.total_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_json_capability_lookup() {
        assert!(supports_strict_json("gpt-4o"));
        assert!(supports_strict_json("gpt-4o-mini"));
        assert!(!supports_strict_json("gpt-3.5-turbo-16k"));
        assert!(!supports_strict_json("some-future-model"));
    }

    #[test]
    fn strict_json_request_carries_response_format() {
        let req = CompletionRequest::new("prompt", "gpt-4o", 0.2);
        let body = serde_json::to_value(ChatRequest::from(&req)).unwrap();
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "prompt");
        let temp = body["temperature"].as_f64().unwrap();
        assert!((temp - 0.2).abs() < 1e-6);
    }

    #[test]
    fn free_text_request_omits_response_format() {
        let req = CompletionRequest::new("prompt", "gpt-3.5-turbo-16k", 0.2);
        let body = serde_json::to_value(ChatRequest::from(&req)).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn response_with_content_parses() {
        let raw = r#"{
            "choices": [{"message": {"content": "{\"a\":1}"}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 20, "total_tokens": 140}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let completion = parsed.into_completion("gpt-4o").unwrap();
        assert_eq!(completion.raw_text, "{\"a\":1}");
        assert_eq!(completion.usage.total_tokens, 140);
    }

    #[test]
    fn response_without_content_is_empty_completion() {
        let raw = r#"{"choices": [{"message": {"content": null}}], "usage": {}}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let err = parsed.into_completion("gpt-4o").unwrap_err();
        assert!(matches!(err, ExtractError::EmptyCompletion { ref model } if model == "gpt-4o"));
    }

    #[test]
    fn response_without_choices_is_empty_completion() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"usage": {}}"#).unwrap();
        assert!(parsed.into_completion("gpt-4o").is_err());
    }
}
