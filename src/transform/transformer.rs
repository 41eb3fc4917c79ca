use log::{debug, error, info};
use std::time::Instant;

use crate::errors::GenerationError;
use crate::providers::{ChatRequest, Provider};
use crate::transform::prompts::{PromptVariant, TransformKind};

// @module: Content transformer

/// Result of a transformation rendered for display.
///
/// Both arms carry display-worthy text; the arm itself tells success from
/// failure so callers never have to inspect the string.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    /// Text produced by the model
    Generated(String),
    /// Human-readable failure message
    Failed(String),
}

impl TransformOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Failed(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Sends subtitle text to an LLM with a fixed prompt per transformation kind
#[derive(Debug)]
pub struct ContentTransformer<P: Provider> {
    // @field: Injected provider client
    provider: P,
    // @field: Model identifier
    model: String,
    // @field: User-instruction variant
    variant: PromptVariant,
    // @field: Optional completion length cap
    max_tokens: Option<u32>,
}

impl<P: Provider> ContentTransformer<P> {
    /// Create a transformer using the standard prompt variant
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            variant: PromptVariant::default(),
            max_tokens: None,
        }
    }

    pub fn with_variant(mut self, variant: PromptVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn variant(&self) -> PromptVariant {
        self.variant
    }

    /// Build the chat request for a text and kind; temperature is always zero
    pub fn build_request(&self, text: &str, kind: TransformKind) -> ChatRequest {
        let request = ChatRequest::new(self.model.clone())
            .add_message("system", kind.system_prompt(self.variant))
            .add_message("user", self.variant.user_message(text))
            .temperature(0.0);

        match self.max_tokens {
            Some(max_tokens) => request.max_tokens(max_tokens),
            None => request,
        }
    }

    /// Run one transformation; a failure is final for this call
    pub async fn transform(&self, text: &str, kind: TransformKind) -> Result<String, GenerationError> {
        let request = self.build_request(text, kind);
        debug!("Requesting '{}' from {} ({} chars of input)", kind, self.model, text.chars().count());

        let start = Instant::now();
        let completion = self.provider.complete(request).await.map_err(|source| {
            error!("'{}' generation failed: {}", kind, source);
            GenerationError {
                kind: kind.to_string(),
                source,
            }
        })?;

        info!(
            "'{}' generated in {:.1}s ({} prompt / {} completion tokens)",
            kind,
            start.elapsed().as_secs_f64(),
            completion.prompt_tokens.map_or_else(|| "?".to_string(), |t| t.to_string()),
            completion.completion_tokens.map_or_else(|| "?".to_string(), |t| t.to_string()),
        );
        Ok(completion.text)
    }

    /// Run one transformation and render the result for display
    pub async fn transform_for_display(&self, text: &str, kind: TransformKind) -> TransformOutcome {
        match self.transform(text, kind).await {
            Ok(generated) => TransformOutcome::Generated(generated),
            Err(e) => TransformOutcome::Failed(e.user_message()),
        }
    }
}
