//! Output-side types: usage counters, cost breakdown, and the final result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token usage counters reported by the completion API for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Usage-derived cost for one call. See [`crate::pricing::compute_cost`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub tokens_used: u64,
    pub tokens_price: f64,
}

/// The outcome of one orchestrated extraction.
///
/// `result` is the model's parsed JSON output. Its shape is advisory: the
/// model was prompted with the caller's schema but the output is validated
/// only for JSON syntax, never against the schema itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub result: Value,
    pub tokens_used: u64,
    /// USD cost of the call, weighted per the configured price table.
    pub tokens_price: f64,
}
