//! Post assembly across stages and platforms.

use crate::{
    BrandVoice, ContentGenerator, HashtagGenerator, ImageGenerator, ImagePromptBuilder,
    PromptFormatter, format_hashtags,
};
use chrono::Utc;
use postwright_config::{Credentials, PostwrightConfig};
use postwright_core::{
    GeneratedPost, GenerationRequest, PlatformRegistry, PlatformSpec, PostMetadata,
    RegeneratedImage,
};
use postwright_error::{GenerationError, GenerationErrorKind, PostwrightResult};
use postwright_interface::PostwrightDriver;
use postwright_models::{GeminiImageClient, OpenAiClient};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Characters of post content used as the topic when regenerating an image
/// without the original topic.
const REGENERATE_TOPIC_CHARS: usize = 100;

/// Runs the full pipeline for one platform or every configured platform.
///
/// # Examples
///
/// ```no_run
/// use postwright_config::PostwrightConfig;
/// use postwright_core::GenerationRequest;
/// use postwright_generation::SocialMediaGenerator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PostwrightConfig::load()?;
/// let generator = SocialMediaGenerator::from_config(&config)?;
///
/// let request = GenerationRequest::new("Our new collaboration feature", "linkedin");
/// let post = generator.generate_post(&request).await?;
/// println!("{}", post.content());
/// # Ok(())
/// # }
/// ```
pub struct SocialMediaGenerator {
    platforms: PlatformRegistry,
    brand_voice: BrandVoice,
    text: Arc<dyn PostwrightDriver>,
    content: ContentGenerator,
    hashtags: HashtagGenerator,
    image_prompts: ImagePromptBuilder,
    images: ImageGenerator,
}

impl SocialMediaGenerator {
    /// Wire the stages from configuration and two model drivers.
    pub fn new(
        config: &PostwrightConfig,
        brand_voice: BrandVoice,
        text: Arc<dyn PostwrightDriver>,
        image: Arc<dyn PostwrightDriver>,
    ) -> Self {
        let text_retry = config.retry().text().clone();
        Self {
            platforms: config.platforms().clone(),
            brand_voice,
            content: ContentGenerator::new(
                Arc::clone(&text),
                PromptFormatter::standard(),
                text_retry.clone(),
                *config.text_model().temperature(),
            ),
            hashtags: HashtagGenerator::new(Arc::clone(&text), text_retry.clone()),
            image_prompts: ImagePromptBuilder::new(Arc::clone(&text), text_retry),
            images: ImageGenerator::new(
                image,
                config.retry().image().clone(),
                *config.image_model().temperature(),
                config.output().image_dir().clone(),
            ),
            text,
        }
    }

    /// Build real model clients from the environment and load the brand
    /// guidelines named in `config`.
    ///
    /// # Errors
    ///
    /// Fails before any generation if an API key is missing or the brand
    /// guidelines cannot be loaded.
    #[instrument(skip_all)]
    pub fn from_config(config: &PostwrightConfig) -> PostwrightResult<Self> {
        let credentials = Credentials::from_env()?;
        let brand_voice = BrandVoice::load(config.brand().guidelines_path())?;
        let text = Arc::new(OpenAiClient::from_settings(config.text_model(), &credentials)?);
        let image = Arc::new(GeminiImageClient::from_settings(
            config.image_model(),
            &credentials,
        )?);
        info!("Generator initialized");
        Ok(Self::new(config, brand_voice, text, image))
    }

    /// Replace the drafting templates, e.g. to add a platform.
    pub fn with_formatter(mut self, formatter: PromptFormatter) -> Self {
        self.content = self.content.with_formatter(formatter);
        self
    }

    /// Configured platforms.
    pub fn platforms(&self) -> &PlatformRegistry {
        &self.platforms
    }

    /// Loaded brand guidelines.
    pub fn brand_voice(&self) -> &BrandVoice {
        &self.brand_voice
    }

    /// The text model driver, shared with quality checks.
    pub fn text_driver(&self) -> Arc<dyn PostwrightDriver> {
        Arc::clone(&self.text)
    }

    fn spec(&self, platform: &str) -> Result<&PlatformSpec, GenerationError> {
        self.platforms.get(platform).ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::UnsupportedPlatform(platform.to_string()))
        })
    }

    /// Generate one complete post.
    ///
    /// # Errors
    ///
    /// `UnsupportedPlatform` before any model call; otherwise the first
    /// text-stage error after its retries. Image failures are absorbed by
    /// the placeholder fallback.
    #[instrument(skip(self, request), fields(platform = %request.platform()))]
    pub async fn generate_post(&self, request: &GenerationRequest) -> PostwrightResult<GeneratedPost> {
        let platform = request.platform().as_str();
        let spec = self.spec(platform)?;

        let brand_voice = match request.brand_voice() {
            Some(voice) => voice.clone(),
            None => {
                let voice = self.brand_voice.voice_for(platform);
                info!(voice = %voice, "Using brand voice from guidelines");
                voice
            }
        };

        let body = self
            .content
            .generate(
                platform,
                spec,
                request.topic(),
                request.context().as_deref(),
                &brand_voice,
            )
            .await?;

        let (content, hashtags) = if request.include_hashtags() {
            let mut tags = self
                .hashtags
                .generate(
                    &body,
                    platform,
                    spec,
                    request.topic(),
                    self.brand_voice.hashtag_strategy(),
                )
                .await?;
            if tags.is_empty() {
                tags = self
                    .brand_voice
                    .keyword_hashtags(&self.platforms, platform, request.topic(), None);
                info!(?tags, "Model reply had no hashtags, using topic keywords");
            }
            attach_hashtags(body, tags, *spec.char_limit())
        } else {
            (body, Vec::new())
        };

        let image_prompt = self
            .image_prompts
            .build(&content, platform, request.topic())
            .await?;
        let image_path = self
            .images
            .generate(&image_prompt, platform, spec.dimensions())
            .await?;

        let metadata = PostMetadata::builder()
            .char_count(content.chars().count())
            .char_limit(*spec.char_limit())
            .image_dimensions(spec.dimensions())
            .brand_voice_used(brand_voice)
            .generated_at(Utc::now())
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Builder(e.to_string())))?;

        let post = GeneratedPost::builder()
            .content(content)
            .hashtags(hashtags)
            .image_path(image_path)
            .image_prompt(image_prompt)
            .platform(platform)
            .metadata(metadata)
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Builder(e.to_string())))?;

        info!(chars = post.char_count(), "Post generated");
        Ok(post)
    }

    /// Generate a post for every configured platform, in name order.
    ///
    /// The template's platform is ignored. A failure is recorded for its
    /// platform only; the remaining platforms still run.
    #[instrument(skip_all, fields(platforms = self.platforms.len()))]
    pub async fn generate_all_platforms(
        &self,
        template: &GenerationRequest,
    ) -> BTreeMap<String, PostwrightResult<GeneratedPost>> {
        let mut posts = BTreeMap::new();

        for platform in self.platforms.names() {
            let request = template.clone().with_platform(platform.clone());
            let result = self.generate_post(&request).await;
            if let Err(e) = &result {
                error!(platform = %platform, error = %e, "Error generating post");
            }
            posts.insert(platform, result);
        }

        let succeeded = posts.values().filter(|r| r.is_ok()).count();
        info!(succeeded, total = posts.len(), "Finished generating posts");
        posts
    }

    /// Render a fresh image for existing post content.
    ///
    /// `topic` is the post's original topic; without it the first 100
    /// characters of the content stand in. A new image prompt is always
    /// built.
    #[instrument(skip(self, content, topic))]
    pub async fn regenerate_image(
        &self,
        content: &str,
        platform: &str,
        topic: Option<&str>,
    ) -> PostwrightResult<RegeneratedImage> {
        let spec = self.spec(platform)?;
        let topic = match topic {
            Some(topic) => topic.to_string(),
            None => content.chars().take(REGENERATE_TOPIC_CHARS).collect(),
        };

        let image_prompt = self.image_prompts.build(content, platform, &topic).await?;
        let image_path = self
            .images
            .generate(&image_prompt, platform, spec.dimensions())
            .await?;

        Ok(RegeneratedImage {
            image_path,
            image_prompt,
        })
    }
}

/// Append as many hashtags as fit within `limit`.
///
/// Trailing tags are dropped one at a time until `"{body}\n\n{tags}"` fits.
/// Returns the final content and the tags actually appended.
pub(crate) fn attach_hashtags(
    body: String,
    mut tags: Vec<String>,
    limit: usize,
) -> (String, Vec<String>) {
    while !tags.is_empty() {
        let candidate = format!("{}\n\n{}", body, format_hashtags(&tags));
        if candidate.chars().count() <= limit {
            return (candidate, tags);
        }
        tags.pop();
    }
    (body, tags)
}
