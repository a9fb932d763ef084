//! Pipeline stages for schema-driven extraction.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. a different completion backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! document ──▶ prompt ──▶ llm ──▶ resolve
//! (PDF→text)  (template)  (API)   (JSON parse)
//! ```
//!
//! 1. [`document`] — decode base64 attachments and extract per-page PDF
//!    text; runs under `spawn_blocking` because PDF parsing is CPU-bound
//! 2. [`prompt`]   — render the extraction template with the schema and
//!    the combined source text
//! 3. [`llm`]      — drive the completion API call with model-dependent
//!    request shaping; the only stage with network I/O
//! 4. [`resolve`]  — strict JSON parse of the model's raw output
//!
//! Cost accounting lives outside the pipeline in [`crate::pricing`]; the
//! sequencing of all stages lives in [`crate::extract`].

pub mod document;
pub mod llm;
pub mod prompt;
pub mod resolve;
