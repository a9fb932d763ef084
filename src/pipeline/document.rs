//! Document normalization: base64 PDF payload → plain text.
//!
//! PDF parsing is CPU-bound and the underlying parser is not async-aware,
//! so extraction runs under [`tokio::task::spawn_blocking`]. Page texts are
//! joined with newlines in page order; document order across multiple
//! attachments is preserved by the orchestrator, which matters because the
//! prompt content (and therefore the extraction) depends on it.

use crate::error::ExtractError;
use crate::request::InputDocument;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Normalize one PDF attachment into plain text.
///
/// Defined only for `application/pdf` documents; callers filter the
/// document set first (see [`crate::extract::extract`]).
///
/// # Errors
/// * [`ExtractError::DocumentDecode`] — payload is not valid base64
/// * [`ExtractError::DocumentParse`]  — bytes are not a parseable PDF
pub async fn normalize(doc: &InputDocument) -> Result<String, ExtractError> {
    let bytes = STANDARD
        .decode(doc.content.as_bytes())
        .map_err(|source| ExtractError::DocumentDecode {
            name: doc.name.clone(),
            source,
        })?;
    debug!(name = %doc.name, bytes = bytes.len(), "decoded document payload");

    let name = doc.name.clone();
    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    })
    .await
    .map_err(|e| ExtractError::Internal(format!("PDF extraction task failed: {e}")))?
    .map_err(|e| ExtractError::DocumentParse {
        name,
        detail: e.to_string(),
    })?;

    debug!(name = %doc.name, pages = pages.len(), "extracted PDF text");
    Ok(pages.join("\n"))
}
