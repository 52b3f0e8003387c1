//! Social post generation pipeline.
//!
//! A post is produced in stages, each behind its own type:
//!
//! 1. [`PromptFormatter`] fills the platform template
//! 2. [`ContentGenerator`] drafts the body and fits it to the character limit
//! 3. [`HashtagGenerator`] asks for a capped list of hashtags
//! 4. [`ImagePromptBuilder`] derives a visual prompt from the finished text
//! 5. [`ImageGenerator`] renders the image, falling back to a placeholder
//!
//! [`SocialMediaGenerator`] sequences the stages for one platform or for
//! every configured platform. [`QualityChecker`] and [`ReviewSession`] sit
//! downstream of generation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod brand_voice;
mod content;
mod hashtags;
mod image;
mod image_prompt;
mod prompts;
mod quality;
mod review;

pub use assembler::SocialMediaGenerator;
pub use brand_voice::{BrandVoice, format_hashtags};
pub use content::{ContentGenerator, truncate_with_ellipsis};
pub use hashtags::{HashtagGenerator, parse_hashtags};
pub use image::ImageGenerator;
pub use image_prompt::ImagePromptBuilder;
pub use prompts::PromptFormatter;
pub use quality::{
    AppropriatenessResult, BrandAlignmentResult, EngagementResult, GrammarResult,
    QualityChecker, QualityReport, extract_json_object,
};
pub use review::{ReviewSession, parse_hashtag_input};

use postwright_core::GenerateRequest;
use postwright_error::{ModelsError, ModelsErrorKind, PostwrightResult};
use postwright_interface::PostwrightDriver;

/// Send a chat request and return its trimmed text.
///
/// A reply without text is an `EmptyResponse` error, which retry treats as
/// transient.
pub(crate) async fn complete_text(
    driver: &dyn PostwrightDriver,
    request: &GenerateRequest,
) -> PostwrightResult<String> {
    let response = driver.generate(request).await?;
    response
        .text()
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse).into())
}
