//! # text2json
//!
//! Extract structured data — shaped by a caller-supplied JSON Schema — from
//! unstructured text and attached PDF documents, using a hosted LLM chat
//! completion API as the extraction engine.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ExtractionRequest
//!  │
//!  ├─ 1. Filter     keep application/pdf attachments, skip the rest
//!  ├─ 2. Normalize  base64 → PDF → per-page text, order preserved
//!  ├─ 3. Prompt     render schema + text + documents into one template
//!  ├─ 4. Invoke     one user message, temperature 0.2, strict-JSON mode
//!  │                when the model supports it
//!  ├─ 5. Resolve    strict JSON parse of the raw model output
//!  └─ 6. Account    token usage × per-model price table
//! ```
//!
//! The first failing stage aborts the call; no partial results are returned.
//! Retry, streaming, timeouts, and schema validation of the model's output
//! are deliberately out of scope — they belong to the calling layer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use text2json::{extract, ExtractionConfig, ExtractionRequest};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read from OPENAI_API_KEY
//!     let config = ExtractionConfig::default();
//!     let request = ExtractionRequest::from_text(
//!         "Claim dated 2024-01-03, number AB-12.",
//!         json!({
//!             "type": "object",
//!             "properties": {
//!                 "claimDate": {"type": "string", "format": "date"},
//!                 "claimNumber": {"type": "string"}
//!             },
//!             "required": []
//!         }),
//!     );
//!     let output = extract(&request, &config).await?;
//!     println!("{}", output.result);
//!     eprintln!("tokens: {} (${:.4})", output.tokens_used, output.tokens_price);
//!     Ok(())
//! }
//! ```
//!
//! ## Choosing a Model
//!
//! | Model | $/1M tokens (in/out) | Strict-JSON mode |
//! |-------|---------------------|------------------|
//! | `gpt-4o` | $2.50/$10.00 | yes (default) |
//! | `gpt-4o-mini` | $0.15/$0.60 | yes |
//! | `gpt-4-turbo` | $10.00/$30.00 | yes |
//! | `gpt-3.5-turbo-16k` | $3.00/$4.00 | no — free-text + prompt instruction |
//!
//! Models without strict-JSON support still work: the prompt's trailing
//! "return valid JSON" instruction is relied upon, and a non-JSON reply
//! surfaces as [`ExtractError::ResponseParse`] with the raw text attached.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod pricing;
pub mod prompts;
pub mod request;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, PromptOverrideMode, DEFAULT_MODEL};
pub use error::ExtractError;
pub use extract::extract;
pub use output::{CostBreakdown, ExtractionResult, Usage};
pub use pipeline::llm::{Completion, CompletionApi, CompletionRequest, OpenAiClient};
pub use pricing::{compute_cost, ModelPrice, PriceTable, DEFAULT_PRICE_MODEL};
pub use request::{ExtractionRequest, InputDocument, PDF_MIME};
