//! Configuration for the extraction pipeline.
//!
//! All behaviour is controlled through [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]. The repeated ad hoc variants of this
//! pipeline (hard-coded model strings, diverging prompt templates, private
//! price tables) collapse into this one struct: model, prompt override, and
//! price table are injected configuration, not branches in control flow.

use crate::error::ExtractError;
use crate::pipeline::llm::CompletionApi;
use crate::pricing::PriceTable;
use std::fmt;
use std::sync::Arc;

/// Default model used when neither the config nor the request names one.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// How a caller-supplied prompt override is folded into the final prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptOverrideMode {
    /// The override replaces the default trailing guidance; the default
    /// template still renders the schema and source text. (default)
    #[default]
    AppendGuidance,
    /// The override replaces the whole template. `{schema}` and `{text}`
    /// placeholders are substituted; sections missing from the override are
    /// appended so schema and source text are always present in the prompt.
    ReplaceTemplate,
}

/// Configuration for an extraction call.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use text2json::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .model("gpt-4o-mini")
///     .temperature(0.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Model identifier sent to the completion API. Default: `"gpt-4o"`.
    ///
    /// A per-request `model` (see [`crate::request::ExtractionRequest`])
    /// takes precedence over this field.
    pub model: String,

    /// Sampling temperature. Default: 0.2.
    ///
    /// Low temperature biases the model toward deterministic extraction —
    /// the task is transcription into a schema, not generation. Raising it
    /// mostly adds variance between runs on identical input.
    pub temperature: f32,

    /// Custom prompt guidance or template. If None, the built-in default
    /// template and guidance from [`crate::prompts`] are used.
    pub prompt_override: Option<String>,

    /// How `prompt_override` is applied. Default: append as guidance.
    pub override_mode: PromptOverrideMode,

    /// Per-model token prices used for cost accounting.
    pub price_table: PriceTable,

    /// Pre-constructed completion API client. When None, the orchestrator
    /// builds an [`crate::pipeline::llm::OpenAiClient`] from `OPENAI_API_KEY`.
    ///
    /// This is also the test seam: integration tests inject a stub here so
    /// no network call is made.
    pub api: Option<Arc<dyn CompletionApi>>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            prompt_override: None,
            override_mode: PromptOverrideMode::default(),
            price_table: PriceTable::default(),
            api: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("prompt_override", &self.prompt_override)
            .field("override_mode", &self.override_mode)
            .field("api", &self.api.as_ref().map(|_| "<dyn CompletionApi>"))
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn prompt_override(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt_override = Some(prompt.into());
        self
    }

    pub fn override_mode(mut self, mode: PromptOverrideMode) -> Self {
        self.config.override_mode = mode;
        self
    }

    pub fn price_table(mut self, table: PriceTable) -> Self {
        self.config.price_table = table;
        self
    }

    pub fn api(mut self, api: Arc<dyn CompletionApi>) -> Self {
        self.config.api = Some(api);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "Model identifier must not be empty".into(),
            ));
        }
        if !(0.0..=2.0).contains(&c.temperature) {
            return Err(ExtractError::InvalidConfig(format!(
                "Temperature must be 0.0–2.0, got {}",
                c.temperature
            )));
        }
        Ok(self.config)
    }
}
