//! Generated post and its metadata.

use crate::ImageDimensions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Facts recorded about a post when the pipeline produced it.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct PostMetadata {
    /// Final content length in characters
    char_count: usize,
    /// Platform character limit at generation time
    char_limit: usize,
    /// Target image size for the platform
    image_dimensions: ImageDimensions,
    /// Brand voice the content was written in
    brand_voice_used: String,
    /// When the pipeline finished
    generated_at: DateTime<Utc>,
}

impl PostMetadata {
    /// Creates a new metadata builder.
    pub fn builder() -> PostMetadataBuilder {
        PostMetadataBuilder::default()
    }
}

/// A complete post for one platform.
///
/// Content and hashtags may be overwritten by a reviewer through
/// [`GeneratedPost::apply_edit`]; every other field is fixed once produced.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use postwright_core::{GeneratedPost, ImageDimensions, PostMetadata};
///
/// let metadata = PostMetadata::builder()
///     .char_count(5usize)
///     .char_limit(280usize)
///     .image_dimensions(ImageDimensions::new(1200, 675))
///     .brand_voice_used("friendly")
///     .generated_at(Utc::now())
///     .build()
///     .unwrap();
///
/// let mut post = GeneratedPost::builder()
///     .content("Hello")
///     .hashtags(vec!["Launch".to_string()])
///     .image_path("generated_images/twitter.png")
///     .image_prompt("A rocket")
///     .platform("twitter")
///     .metadata(metadata)
///     .build()
///     .unwrap();
///
/// post.apply_edit("Hello, world", vec!["#Launch".to_string()]);
/// assert_eq!(post.content(), "Hello, world");
/// assert_eq!(post.hashtags(), &vec!["Launch".to_string()]);
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GeneratedPost {
    /// Post text, including appended hashtags
    content: String,
    /// Bare hashtags (no `#`) in generation order
    hashtags: Vec<String>,
    /// Location of the generated or placeholder image
    image_path: PathBuf,
    /// Prompt the image was generated from
    image_prompt: String,
    /// Platform key
    platform: String,
    /// Generation facts
    metadata: PostMetadata,
}

impl GeneratedPost {
    /// Creates a new post builder.
    pub fn builder() -> GeneratedPostBuilder {
        GeneratedPostBuilder::default()
    }

    /// Overwrite content and hashtags with a reviewer's edit.
    ///
    /// Leading `#` marks are stripped from the hashtags and blanks dropped.
    pub fn apply_edit(&mut self, content: impl Into<String>, hashtags: Vec<String>) {
        self.content = content.into();
        self.hashtags = hashtags
            .into_iter()
            .map(|tag| tag.trim().trim_start_matches('#').to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
    }

    /// Replace the image after a regeneration.
    pub fn replace_image(&mut self, image: RegeneratedImage) {
        self.image_path = image.image_path;
        self.image_prompt = image.image_prompt;
    }

    /// Content length in characters as it stands now (after any edit).
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Result of regenerating only the image of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegeneratedImage {
    /// Location of the new image
    pub image_path: PathBuf,
    /// Prompt used for the new image
    pub image_prompt: String,
}
