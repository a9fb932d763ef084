//! The extraction orchestrator — the single entry point external callers use.
//!
//! Sequencing is a straight pipeline with early return: filter attachments →
//! normalize → build prompt → invoke → resolve → account. The first failing
//! stage aborts the whole call; there are no partial results. Retry,
//! timeout, and cancellation are caller concerns.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::output::ExtractionResult;
use crate::pipeline::llm::{CompletionApi, CompletionRequest, OpenAiClient};
use crate::pipeline::{document, prompt, resolve};
use crate::pricing::compute_cost;
use crate::request::{ExtractionRequest, InputDocument};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Extract schema-shaped data from the request's text and PDF attachments.
///
/// # Arguments
/// * `request` — source text, attachments, target schema, and per-request
///   overrides for model and prompt
/// * `config`  — pipeline configuration (model default, temperature, price
///   table, injected completion API)
///
/// # Errors
/// Any stage failure aborts the call; see [`ExtractError`] for the kinds.
/// An unknown model in the price table is NOT an error — cost accounting
/// degrades to the default model's prices.
///
/// # Precondition
/// `text` may be empty only when at least one PDF document is attached;
/// otherwise the call is rejected with [`ExtractError::EmptyInput`] rather
/// than sending an effectively empty prompt to the completion API.
pub async fn extract(
    request: &ExtractionRequest,
    config: &ExtractionConfig,
) -> Result<ExtractionResult, ExtractError> {
    // ── Step 1: Filter attachments to PDFs ───────────────────────────────
    let pdf_docs: Vec<&InputDocument> =
        request.documents.iter().filter(|d| d.is_pdf()).collect();
    if pdf_docs.len() < request.documents.len() {
        debug!(
            skipped = request.documents.len() - pdf_docs.len(),
            "skipping non-PDF attachments"
        );
    }

    if request.text.trim().is_empty() && pdf_docs.is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let model = request.model.as_deref().unwrap_or(&config.model);
    info!(model, documents = pdf_docs.len(), "starting extraction");

    // ── Step 2: Normalize documents ──────────────────────────────────────
    // Runs concurrently; try_join_all keeps results in attachment order,
    // which the prompt content (and therefore the extraction) depends on.
    let normalized: Vec<String> =
        try_join_all(pdf_docs.iter().map(|&d| document::normalize(d))).await?;

    // ── Step 3: Build prompt ─────────────────────────────────────────────
    let prompt_override = request
        .prompt_override
        .as_deref()
        .or(config.prompt_override.as_deref());
    let rendered = prompt::build_prompt(
        &request.schema,
        &request.text,
        &normalized,
        prompt_override,
        config.override_mode,
    )?;
    debug!(prompt_bytes = rendered.len(), "prompt built");

    // ── Step 4: Invoke completion API ────────────────────────────────────
    let api = resolve_api(config)?;
    let completion = api
        .complete(&CompletionRequest::new(rendered, model, config.temperature))
        .await?;

    // ── Step 5: Resolve response ─────────────────────────────────────────
    let result = resolve::resolve(&completion.raw_text)?;

    // ── Step 6: Account cost ─────────────────────────────────────────────
    let cost = compute_cost(&completion.usage, model, &config.price_table);
    info!(
        tokens_used = cost.tokens_used,
        tokens_price = cost.tokens_price,
        "extraction complete"
    );

    Ok(ExtractionResult {
        result,
        tokens_used: cost.tokens_used,
        tokens_price: cost.tokens_price,
    })
}

/// Resolve the completion API client: the injected one wins, otherwise an
/// [`OpenAiClient`] is built from `OPENAI_API_KEY`.
fn resolve_api(config: &ExtractionConfig) -> Result<Arc<dyn CompletionApi>, ExtractError> {
    if let Some(ref api) = config.api {
        return Ok(Arc::clone(api));
    }
    Ok(Arc::new(OpenAiClient::from_env()?))
}
