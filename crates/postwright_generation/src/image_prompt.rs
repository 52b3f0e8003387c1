//! Visual prompt derivation.

use crate::complete_text;
use crate::prompts::{IMAGE_PROMPT_TEMPLATE, fill};
use postwright_core::GenerateRequest;
use postwright_error::PostwrightResult;
use postwright_interface::PostwrightDriver;
use postwright_retry::RetryPolicy;
use std::sync::Arc;
use tracing::{info, instrument};

const SYSTEM_ROLE: &str = "You are an expert at creating visual image prompts.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 300;

/// Turns finished post text into an image generation prompt.
pub struct ImagePromptBuilder {
    text: Arc<dyn PostwrightDriver>,
    retry: RetryPolicy,
}

impl ImagePromptBuilder {
    /// Create a builder.
    pub fn new(text: Arc<dyn PostwrightDriver>, retry: RetryPolicy) -> Self {
        Self { text, retry }
    }

    /// The model's trimmed reply, used as-is.
    #[instrument(skip(self, content, topic))]
    pub async fn build(
        &self,
        content: &str,
        platform: &str,
        topic: &str,
    ) -> PostwrightResult<String> {
        let prompt = fill(
            IMAGE_PROMPT_TEMPLATE,
            &[("content", content), ("topic", topic), ("platform", platform)],
        );
        let request = GenerateRequest::chat(SYSTEM_ROLE, prompt, TEMPERATURE, MAX_TOKENS);

        let image_prompt = self
            .retry
            .run("create_image_prompt", || {
                complete_text(self.text.as_ref(), &request)
            })
            .await?;

        let preview: String = image_prompt.chars().take(100).collect();
        info!(preview = %preview, "Image prompt created");
        Ok(image_prompt)
    }
}
