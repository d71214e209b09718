//! One-sentence promotional teasers written by the language model.

use std::sync::Arc;

use tracing::debug;

use crate::config::LlmConfig;
use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::metrics::LLM_TOKENS;

/// Themes passed to the prompt.
pub const TEASER_THEMES: usize = 3;

/// Builds the prompt and asks the model for a teaser.
pub struct TeaserGenerator {
    llm: Arc<dyn LlmClient>,
    temperature: f32,
    max_tokens: u32,
}

impl TeaserGenerator {
    /// Generator with the default sampling settings (temperature 0.7, 60 tokens).
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        let defaults = LlmConfig::default();
        Self {
            llm,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }

    pub fn from_config(llm: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            llm,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Generate a teaser for `title`, mentioning at most the first three themes.
    ///
    /// Failures are returned as-is; nothing is retried. A blank reply is
    /// an `EmptyResponse` error.
    pub async fn generate(&self, title: &str, themes: &[String]) -> Result<String, LlmError> {
        let themes = &themes[..themes.len().min(TEASER_THEMES)];
        let request = CompletionRequest::new(build_prompt(title, themes))
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        debug!(
            "Requesting teaser from {}/{} for '{}'",
            self.llm.provider(),
            self.llm.model(),
            title
        );

        let response = self.llm.complete(request).await?;

        LLM_TOKENS
            .with_label_values(&[self.llm.provider(), "input"])
            .inc_by(response.usage.input_tokens as u64);
        LLM_TOKENS
            .with_label_values(&[self.llm.provider(), "output"])
            .inc_by(response.usage.output_tokens as u64);

        let teaser = response.text.trim();
        if teaser.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(teaser.to_string())
    }
}

/// The teaser prompt for a title and its themes.
pub fn build_prompt(title: &str, themes: &[String]) -> String {
    format!(
        "You are a best-in-class book recommender. In a single upbeat sentence, \
         write a teaser.  Do not mention any negative or graphic elements\u{2014}focus on \
         what readers will love. Title: {}; Themes: {}.",
        title,
        themes.join(", ")
    )
}
