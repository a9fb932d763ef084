//! Request-side types: attached documents and the extraction request.
//!
//! These are the wire shapes the upstream form/server layer ships as
//! camelCase JSON; serde renames keep the Rust field names idiomatic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mime type of documents that participate in normalization.
pub const PDF_MIME: &str = "application/pdf";

/// A transient in-memory document attached to an extraction request.
///
/// `content` is the base64-encoded file payload as received in transit;
/// nothing is ever written to durable storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDocument {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub content: String,
}

impl InputDocument {
    /// Whether this document is eligible for PDF normalization.
    ///
    /// Non-PDF attachments are skipped silently, not rejected.
    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }
}

/// One extraction call: source text, optional attachments, and the JSON
/// Schema describing the desired output shape.
///
/// `schema` is caller-owned and opaque — it is never mutated, only
/// pretty-printed into the prompt. Per-request `model` and
/// `prompt_override` take precedence over the corresponding
/// [`crate::config::ExtractionConfig`] fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub text: String,
    #[serde(default)]
    pub documents: Vec<InputDocument>,
    pub schema: Value,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub prompt_override: Option<String>,
}

impl ExtractionRequest {
    /// A request for plain text with no attachments.
    pub fn from_text(text: impl Into<String>, schema: Value) -> Self {
        Self {
            text: text.into(),
            documents: Vec::new(),
            schema,
            model: None,
            prompt_override: None,
        }
    }
}
