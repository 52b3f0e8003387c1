//! User-facing generation request.

use serde::{Deserialize, Serialize};

/// One user invocation of the pipeline for a single platform.
///
/// Immutable for the duration of a pipeline run. The fan-out across all
/// platforms reuses one request as a template via [`GenerationRequest::with_platform`].
///
/// # Examples
///
/// ```
/// use postwright_core::GenerationRequest;
///
/// let request = GenerationRequest::new("New AI feature announcement", "twitter")
///     .with_context("Focus on productivity")
///     .with_include_hashtags(false);
///
/// assert_eq!(request.platform(), "twitter");
/// assert_eq!(request.context().as_deref(), Some("Focus on productivity"));
/// assert!(!request.include_hashtags());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_", into, strip_option)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// Subject of the post
    topic: String,
    /// Target platform key
    platform: String,
    /// Optional free-text context for the prompt
    #[builder(default, setter(into, strip_option))]
    context: Option<String>,
    /// Explicit brand voice; derived from guidelines when absent
    #[builder(default, setter(into, strip_option))]
    brand_voice: Option<String>,
    /// Whether to generate and append hashtags
    #[builder(default = "true")]
    #[getter(copy)]
    include_hashtags: bool,
}

impl GenerationRequest {
    /// Request with hashtags enabled and no context or explicit voice.
    pub fn new(topic: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            platform: platform.into(),
            context: None,
            brand_voice: None,
            include_hashtags: true,
        }
    }

    /// Creates a new request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_hashtags_on() {
        let request = GenerationRequest::builder()
            .topic("Launch")
            .platform("linkedin")
            .build()
            .unwrap();
        assert!(request.include_hashtags());
        assert!(request.context().is_none());
        assert!(request.brand_voice().is_none());
    }

    #[test]
    fn test_with_platform_keeps_other_fields() {
        let template = GenerationRequest::new("Launch", "")
            .with_brand_voice("playful")
            .with_include_hashtags(false);
        let request = template.clone().with_platform("facebook");
        assert_eq!(request.platform(), "facebook");
        assert_eq!(request.brand_voice().as_deref(), Some("playful"));
        assert_eq!(request.topic(), template.topic());
    }
}
