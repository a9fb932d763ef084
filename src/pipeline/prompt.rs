//! Prompt rendering: schema + source text + template → single prompt string.
//!
//! Whatever the caller overrides, the rendered prompt always contains the
//! pretty-printed schema, the full source text, and any override guidance.
//! Extraction quality degrades silently when one of those goes missing, so
//! the builder enforces their presence rather than trusting the template.

use crate::config::PromptOverrideMode;
use crate::error::ExtractError;
use crate::prompts::{DEFAULT_GUIDANCE, DEFAULT_TEMPLATE, SCHEMA_PLACEHOLDER, TEXT_PLACEHOLDER};
use serde_json::Value;

/// Render the extraction prompt.
///
/// `{schema}` is replaced by the pretty-printed (2-space indent) JSON
/// Schema; `{text}` by the caller's text followed by the normalized
/// document texts, newline-joined in document order.
pub fn build_prompt(
    schema: &Value,
    text: &str,
    normalized_docs: &[String],
    prompt_override: Option<&str>,
    mode: PromptOverrideMode,
) -> Result<String, ExtractError> {
    let schema_json = serde_json::to_string_pretty(schema)
        .map_err(|e| ExtractError::Internal(format!("schema serialization failed: {e}")))?;
    let combined = combine_text(text, normalized_docs);

    let prompt = match (prompt_override, mode) {
        (Some(template), PromptOverrideMode::ReplaceTemplate) => {
            let mut rendered = render(template, &schema_json, &combined);
            // A replacement template that dropped a placeholder would send
            // the model off to extract from nothing. Re-attach whatever is
            // missing.
            if !rendered.contains(&schema_json) {
                rendered.push_str("\n\nJSON schema:\n");
                rendered.push_str(&schema_json);
            }
            if !rendered.contains(&combined) {
                rendered.push_str("\n\nText:\n");
                rendered.push_str(&combined);
            }
            rendered
        }
        (guidance, PromptOverrideMode::AppendGuidance) => {
            let mut rendered = render(DEFAULT_TEMPLATE, &schema_json, &combined);
            rendered.push_str("\n\n");
            rendered.push_str(guidance.unwrap_or(DEFAULT_GUIDANCE));
            rendered
        }
        (None, PromptOverrideMode::ReplaceTemplate) => {
            let mut rendered = render(DEFAULT_TEMPLATE, &schema_json, &combined);
            rendered.push_str("\n\n");
            rendered.push_str(DEFAULT_GUIDANCE);
            rendered
        }
    };

    Ok(prompt)
}

fn render(template: &str, schema_json: &str, combined_text: &str) -> String {
    template
        .replace(SCHEMA_PLACEHOLDER, schema_json)
        .replace(TEXT_PLACEHOLDER, combined_text)
}

fn combine_text(text: &str, normalized_docs: &[String]) -> String {
    if normalized_docs.is_empty() {
        return text.to_string();
    }
    let mut combined = String::from(text);
    for doc_text in normalized_docs {
        combined.push('\n');
        combined.push_str(doc_text);
    }
    combined
}
