//! Drafting and length fitting.

use crate::complete_text;
use crate::prompts::{PromptFormatter, SHORTEN_TEMPLATE, fill};
use postwright_core::{GenerateRequest, PlatformSpec};
use postwright_error::PostwrightResult;
use postwright_interface::PostwrightDriver;
use postwright_retry::RetryPolicy;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const DRAFT_SYSTEM_ROLE: &str = "You are an expert social media content creator.";
const DRAFT_MAX_TOKENS: u32 = 1000;
const SHORTEN_SYSTEM_ROLE: &str = "You are an expert at concise social media writing.";
const SHORTEN_MAX_TOKENS: u32 = 500;
const ELLIPSIS: &str = "...";

/// Drafts post bodies and keeps them within the platform's character limit.
///
/// A draft over the limit gets one shortening request. If the shortened
/// text is still over, it is truncated with an ellipsis. The whole sequence
/// runs inside one retry attempt.
pub struct ContentGenerator {
    text: Arc<dyn PostwrightDriver>,
    formatter: PromptFormatter,
    retry: RetryPolicy,
    temperature: f32,
}

impl ContentGenerator {
    /// Create a generator.
    pub fn new(
        text: Arc<dyn PostwrightDriver>,
        formatter: PromptFormatter,
        retry: RetryPolicy,
        temperature: f32,
    ) -> Self {
        Self {
            text,
            formatter,
            retry,
            temperature,
        }
    }

    /// Swap the prompt templates.
    pub fn with_formatter(mut self, formatter: PromptFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// The prompt templates in use.
    pub fn formatter(&self) -> &PromptFormatter {
        &self.formatter
    }

    /// Draft a body for `platform`, never longer than its `char_limit`.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` without any model call, or the last model error
    /// once retries are exhausted.
    #[instrument(skip(self, spec, context, brand_voice), fields(char_limit = spec.char_limit()))]
    pub async fn generate(
        &self,
        platform: &str,
        spec: &PlatformSpec,
        topic: &str,
        context: Option<&str>,
        brand_voice: &str,
    ) -> PostwrightResult<String> {
        let prompt = self.formatter.format(platform, topic, context, brand_voice)?;
        info!("Generating content");

        let content = self
            .retry
            .run("generate_content", || {
                self.draft_and_fit(platform, spec, &prompt, brand_voice)
            })
            .await?;

        info!(chars = content.chars().count(), "Generated content");
        Ok(content)
    }

    async fn draft_and_fit(
        &self,
        platform: &str,
        spec: &PlatformSpec,
        prompt: &str,
        brand_voice: &str,
    ) -> PostwrightResult<String> {
        let request =
            GenerateRequest::chat(DRAFT_SYSTEM_ROLE, prompt, self.temperature, DRAFT_MAX_TOKENS);
        let draft = complete_text(self.text.as_ref(), &request).await?;

        let limit = *spec.char_limit();
        let length = draft.chars().count();
        if length <= limit {
            return Ok(draft);
        }

        warn!(length, limit, "Content exceeds limit, requesting shorter version");
        self.shorten(platform, limit, &draft, brand_voice).await
    }

    async fn shorten(
        &self,
        platform: &str,
        limit: usize,
        draft: &str,
        brand_voice: &str,
    ) -> PostwrightResult<String> {
        let limit_text = limit.to_string();
        let prompt = fill(
            SHORTEN_TEMPLATE,
            &[
                ("platform", platform),
                ("char_limit", &limit_text),
                ("original_content", draft),
                ("brand_voice", brand_voice),
            ],
        );
        let request = GenerateRequest::chat(
            SHORTEN_SYSTEM_ROLE,
            prompt,
            self.temperature,
            SHORTEN_MAX_TOKENS,
        );
        let shorter = complete_text(self.text.as_ref(), &request).await?;

        let length = shorter.chars().count();
        if length <= limit {
            info!(length, "Shortened content fits");
            return Ok(shorter);
        }

        warn!(length, limit, "Content still exceeds limit after shortening, truncating");
        Ok(truncate_with_ellipsis(&shorter, limit))
    }
}

/// Cut `text` to at most `limit` characters, ending in `...` when cut.
///
/// Counts characters, not bytes, so multi-byte text is never split.
///
/// # Examples
///
/// ```
/// use postwright_generation::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("abcdefghij", 8), "abcde...");
/// assert_eq!(truncate_with_ellipsis("short", 8), "short");
/// ```
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let ellipsis_len = ELLIPSIS.chars().count();
    if limit < ellipsis_len {
        return text.chars().take(limit).collect();
    }
    let mut cut: String = text.chars().take(limit - ellipsis_len).collect();
    cut.push_str(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        let text = "é".repeat(300);
        let cut = truncate_with_ellipsis(&text, 280);
        assert_eq!(cut.chars().count(), 280);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with("ééé"));
    }

    #[test]
    fn test_truncate_exact_limit_untouched() {
        let text = "x".repeat(280);
        assert_eq!(truncate_with_ellipsis(&text, 280), text);
    }

    #[test]
    fn test_truncate_tiny_limit() {
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "ab");
    }
}
