//! Error types for the text2json library.
//!
//! One enum covers every failure mode because every failure here is fatal
//! for the enclosing extraction call: there is no partial-success mode and
//! no internal retry. The variants are grouped so a caller can distinguish
//! "bad input document", "transport/provider failure", and "model produced
//! unparseable output" without string-matching messages.
//!
//! Pricing-table misses are deliberately NOT an error — cost accounting is
//! best-effort telemetry and degrades to the default model's prices (see
//! [`crate::pricing`]).

use thiserror::Error;

/// All errors returned by the text2json library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Document payload is not valid base64.
    #[error("Document '{name}' is not valid base64: {source}")]
    DocumentDecode {
        name: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Document bytes decoded fine but are not a parseable PDF.
    #[error("Document '{name}' is not a parseable PDF: {detail}")]
    DocumentParse { name: String, detail: String },

    /// The request carried no extractable content at all.
    ///
    /// Raised at the orchestrator boundary when `text` is empty and no PDF
    /// document is attached, instead of sending an effectively empty prompt
    /// to the completion API.
    #[error("Request has empty text and no PDF documents; nothing to extract from")]
    EmptyInput,

    // ── Completion API errors ─────────────────────────────────────────────
    /// No API client was injected and `OPENAI_API_KEY` is unset.
    #[error("Completion API is not configured.\nSet OPENAI_API_KEY or inject a client via ExtractionConfig::builder().api(..).")]
    MissingApiKey,

    /// The completion API request failed (transport, auth, rate limit, or
    /// an undecodable response body). Propagated, never retried.
    #[error("Completion request failed for model '{model}': {message}")]
    CompletionRequest { model: String, message: String },

    /// The completion API answered but returned no text content.
    #[error("Completion API returned no text content for model '{model}'")]
    EmptyCompletion { model: String },

    // ── Response errors ───────────────────────────────────────────────────
    /// The model's output is not valid JSON.
    ///
    /// Carries the raw offending text so callers can inspect what the model
    /// actually said.
    #[error("Model output is not valid JSON: {source}")]
    ResponseParse {
        raw_text: String,
        #[source]
        source: serde_json::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (e.g. a blocking task panicked).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// The raw model output attached to a [`ExtractError::ResponseParse`],
    /// if this is one.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            ExtractError::ResponseParse { raw_text, .. } => Some(raw_text),
            _ => None,
        }
    }
}
