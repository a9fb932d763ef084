//! Prompt templates for schema-driven extraction.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tweaking the extraction instructions
//!    requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can import and inspect the templates
//!    directly without calling a real completion API.
//!
//! Callers can override the defaults via
//! [`crate::config::ExtractionConfig::prompt_override`]; the constants here
//! are used only when no override is provided.

/// Placeholder replaced by the pretty-printed JSON Schema.
pub const SCHEMA_PLACEHOLDER: &str = "{schema}";

/// Placeholder replaced by the combined source text (caller text followed
/// by the normalized document texts, newline-joined).
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Default extraction prompt template.
///
/// `{schema}` and `{text}` are substituted by
/// [`crate::pipeline::prompt::build_prompt`].
pub const DEFAULT_TEMPLATE: &str = "Extract the following information from the given text according to this JSON schema:
{schema}

Text:
{text}

Provide the extracted information as a valid JSON object.";

/// Default trailing guidance appended after the rendered template.
///
/// Both hints measurably improve extraction on free-form documents: field
/// values in scanned letters and claim forms end at punctuation or a line
/// break, and the same fragment of source text almost never belongs under
/// two different schema keys.
pub const DEFAULT_GUIDANCE: &str = "Keep in mind that values are usually terminated by punctuation or a newline, \
and that a given piece of data is rarely reused across multiple keys.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_both_placeholders() {
        assert!(DEFAULT_TEMPLATE.contains(SCHEMA_PLACEHOLDER));
        assert!(DEFAULT_TEMPLATE.contains(TEXT_PLACEHOLDER));
    }

    #[test]
    fn template_asks_for_json() {
        assert!(DEFAULT_TEMPLATE.contains("valid JSON object"));
    }
}
