//! Response resolution: strict JSON parse of the model's raw output.
//!
//! No repair heuristics here. Fence-stripping, brace-hunting, and similar
//! salvage attempts hide model regressions behind silently-mangled data; a
//! parse failure is terminal for the call and the raw text travels with the
//! error so the caller can see exactly what the model said.

use crate::error::ExtractError;
use serde_json::Value;

/// Parse the model's raw text output into a JSON value.
///
/// # Errors
/// [`ExtractError::ResponseParse`] carrying `raw_text` when the output is
/// not syntactically valid JSON.
pub fn resolve(raw_text: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(raw_text).map_err(|source| ExtractError::ResponseParse {
        raw_text: raw_text.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_inverts_serialization() {
        let original = json!({
            "claimDate": "2024-01-03",
            "claimNumber": "AB-12",
            "nested": {"amounts": [12.5, null, true]}
        });
        let parsed = resolve(&serde_json::to_string(&original).unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn refusal_text_fails_with_raw_text_attached() {
        let err = resolve("Sorry, I cannot help.").unwrap_err();
        assert_eq!(err.raw_text(), Some("Sorry, I cannot help."));
    }

    #[test]
    fn fenced_json_is_not_repaired() {
        // Strictness is the contract: a fenced block is a parse failure.
        assert!(resolve("```json\n{\"a\": 1}\n```").is_err());
    }

    #[test]
    fn truncated_json_fails() {
        assert!(resolve("{\"claimDate\": \"2024-01-").is_err());
    }
}
