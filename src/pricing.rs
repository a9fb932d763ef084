//! Per-model token pricing and cost accounting.
//!
//! Prices are authored as USD per **million** tokens — the unit every
//! provider publishes — and divided down to USD per single token at table
//! construction. Cost accounting is best-effort telemetry: an unknown model
//! degrades to the table's named default prices with a `warn!`, it never
//! aborts an extraction that already produced data.

use crate::output::{CostBreakdown, Usage};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

/// Fallback model whose prices are used when the requested model is absent
/// from the table.
pub const DEFAULT_PRICE_MODEL: &str = "gpt-4o";

/// USD prices for one single token of a given model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrice {
    pub input_token_price: f64,
    pub output_token_price: f64,
}

impl ModelPrice {
    /// Build from USD-per-million-token rates as published by providers.
    pub const fn per_million(input: f64, output: f64) -> Self {
        Self {
            input_token_price: input / 1_000_000.0,
            output_token_price: output / 1_000_000.0,
        }
    }
}

/// Read-only mapping from model identifier to [`ModelPrice`].
///
/// A process-wide default instance is available via [`PriceTable::default`];
/// callers with private pricing inject their own through
/// [`crate::config::ExtractionConfigBuilder::price_table`].
#[derive(Debug, Clone)]
pub struct PriceTable {
    prices: HashMap<String, ModelPrice>,
    default_model: String,
}

static DEFAULT_PRICES: Lazy<HashMap<String, ModelPrice>> = Lazy::new(|| {
    HashMap::from([
        ("gpt-4o".to_string(), ModelPrice::per_million(2.5, 10.0)),
        ("gpt-4o-mini".to_string(), ModelPrice::per_million(0.15, 0.6)),
        ("gpt-4-turbo".to_string(), ModelPrice::per_million(10.0, 30.0)),
        ("gpt-3.5-turbo-16k".to_string(), ModelPrice::per_million(3.0, 4.0)),
    ])
});

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            prices: DEFAULT_PRICES.clone(),
            default_model: DEFAULT_PRICE_MODEL.to_string(),
        }
    }
}

impl PriceTable {
    /// Build a table from explicit entries and a named fallback model.
    ///
    /// `default_model` should be a key of `prices`; when it is not, lookups
    /// for unknown models price at zero (and log a warning).
    pub fn new(
        prices: HashMap<String, ModelPrice>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            prices,
            default_model: default_model.into(),
        }
    }

    /// Price for `model`, falling back to the default model's entry.
    pub fn price_for(&self, model: &str) -> ModelPrice {
        if let Some(p) = self.prices.get(model) {
            return *p;
        }
        warn!(model, default = %self.default_model, "model not in price table, using default prices");
        self.prices
            .get(&self.default_model)
            .copied()
            .unwrap_or(ModelPrice {
                input_token_price: 0.0,
                output_token_price: 0.0,
            })
    }
}

/// Compute token usage and monetary cost for one completion.
///
/// `tokens_used` is the provider-reported total; `tokens_price` weighs
/// prompt and completion tokens by their respective per-token rates.
pub fn compute_cost(usage: &Usage, model: &str, table: &PriceTable) -> CostBreakdown {
    let price = table.price_for(model);
    CostBreakdown {
        tokens_used: usage.total_tokens,
        tokens_price: usage.prompt_tokens as f64 * price.input_token_price
            + usage.completion_tokens as f64 * price.output_token_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(prompt: u64, completion: u64) -> Usage {
        Usage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt + completion,
        }
    }

    #[test]
    fn gpt_4o_claim_scenario() {
        let cost = compute_cost(&usage(120, 20), "gpt-4o", &PriceTable::default());
        assert_eq!(cost.tokens_used, 140);
        assert!((cost.tokens_price - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn cost_is_linear_in_token_counts() {
        let table = PriceTable::default();
        let once = compute_cost(&usage(100, 50), "gpt-4o-mini", &table);
        let twice = compute_cost(&usage(200, 100), "gpt-4o-mini", &table);
        assert!((twice.tokens_price - 2.0 * once.tokens_price).abs() < 1e-12);
    }

    #[test]
    fn unknown_model_falls_back_to_default_prices() {
        let table = PriceTable::default();
        let unknown = compute_cost(&usage(10, 10), "some-future-model", &table);
        let default = compute_cost(&usage(10, 10), DEFAULT_PRICE_MODEL, &table);
        assert_eq!(unknown.tokens_price, default.tokens_price);
    }

    #[test]
    fn per_million_divides_down() {
        let p = ModelPrice::per_million(2.5, 10.0);
        assert_eq!(p.input_token_price, 2.5e-6);
        assert_eq!(p.output_token_price, 1e-5);
    }

    #[test]
    fn custom_table_without_default_entry_prices_at_zero() {
        let table = PriceTable::new(HashMap::new(), "missing");
        let cost = compute_cost(&usage(1000, 1000), "whatever", &table);
        assert_eq!(cost.tokens_price, 0.0);
        assert_eq!(cost.tokens_used, 2000);
    }
}
