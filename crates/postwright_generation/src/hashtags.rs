//! Hashtag generation.

use crate::complete_text;
use crate::prompts::{HASHTAG_TEMPLATE, fill};
use postwright_core::{GenerateRequest, HashtagStrategy, PlatformSpec};
use postwright_error::PostwrightResult;
use postwright_interface::PostwrightDriver;
use postwright_retry::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, info, instrument};

const SYSTEM_ROLE: &str = "You are an expert at social media hashtag strategy.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 150;

/// Asks the text model for a platform-sized list of hashtags.
pub struct HashtagGenerator {
    text: Arc<dyn PostwrightDriver>,
    retry: RetryPolicy,
}

impl HashtagGenerator {
    /// Create a generator.
    pub fn new(text: Arc<dyn PostwrightDriver>, retry: RetryPolicy) -> Self {
        Self { text, retry }
    }

    /// Bare hashtags (no `#`), at most `spec.max_hashtags()` of them.
    ///
    /// The model is asked for exactly the platform maximum; extra entries
    /// in its reply are dropped.
    #[instrument(skip(self, content, spec, topic, strategy), fields(max_hashtags = spec.max_hashtags()))]
    pub async fn generate(
        &self,
        content: &str,
        platform: &str,
        spec: &PlatformSpec,
        topic: &str,
        strategy: &HashtagStrategy,
    ) -> PostwrightResult<Vec<String>> {
        let max = *spec.max_hashtags();
        if max == 0 {
            return Ok(Vec::new());
        }

        let max_text = max.to_string();
        let preferred = strategy.preferred_categories.join(", ");
        let avoid = strategy.avoid.join(", ");
        let prompt = fill(
            HASHTAG_TEMPLATE,
            &[
                ("max_hashtags", &max_text),
                ("platform", platform),
                ("content", content),
                ("topic", topic),
                ("preferred", &preferred),
                ("avoid", &avoid),
            ],
        );
        let request = GenerateRequest::chat(SYSTEM_ROLE, prompt, TEMPERATURE, MAX_TOKENS);

        info!("Generating hashtags");
        let reply = self
            .retry
            .run("generate_hashtags", || {
                complete_text(self.text.as_ref(), &request)
            })
            .await?;
        debug!(reply = %reply, "Hashtag reply");

        let tags = parse_hashtags(&reply, max);
        info!(?tags, "Generated hashtags");
        Ok(tags)
    }
}

/// Parse a comma-separated reply into at most `max` bare hashtags.
///
/// Whitespace and `#` characters are stripped and empty entries dropped.
///
/// # Examples
///
/// ```
/// use postwright_generation::parse_hashtags;
///
/// let tags = parse_hashtags(" #AI, Teamwork ,, #Growth, Extra", 3);
/// assert_eq!(tags, vec!["AI", "Teamwork", "Growth"]);
/// ```
pub fn parse_hashtags(reply: &str, max: usize) -> Vec<String> {
    reply
        .split(',')
        .map(|tag| tag.replace('#', "").trim().to_string())
        .filter(|tag| !tag.is_empty())
        .take(max)
        .collect()
}
