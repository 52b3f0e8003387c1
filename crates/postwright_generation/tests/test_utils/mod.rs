//! Test utilities for the generation pipeline.
//!
//! Mock drivers plus helpers that wire a generator around them.

#![allow(dead_code)]

pub mod mock_driver;

pub use mock_driver::{MockDriver, MockResponse};

use image::{ImageFormat, Rgb, RgbImage};
use postwright_config::PostwrightConfig;
use postwright_core::{GenerateRequest, Role};
use postwright_generation::{BrandVoice, SocialMediaGenerator};
use postwright_retry::RetryPolicy;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Retry policy with millisecond delays.
pub fn fast_retry(max_retries: usize) -> RetryPolicy {
    RetryPolicy::new(max_retries, 0.001, 2.0).expect("Valid retry policy")
}

/// Bundled configuration writing images into `image_dir`, with fast retries.
pub fn test_config(image_dir: &Path) -> PostwrightConfig {
    PostwrightConfig::bundled()
        .expect("Bundled config parses")
        .with_image_dir(image_dir)
        .with_retry(fast_retry(3), fast_retry(3))
}

/// A generator around the two mocks with default brand guidelines.
pub fn generator(text: &MockDriver, image: &MockDriver, image_dir: &Path) -> SocialMediaGenerator {
    SocialMediaGenerator::new(
        &test_config(image_dir),
        BrandVoice::default(),
        Arc::new(text.clone()),
        Arc::new(image.clone()),
    )
}

/// The system message of a chat request, or "" for prompt-only requests.
pub fn system_role(req: &GenerateRequest) -> &str {
    req.messages
        .iter()
        .find(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}

/// The user message of a request.
pub fn user_prompt(req: &GenerateRequest) -> &str {
    req.messages
        .iter()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}

/// Which pipeline stage sent a text request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Draft,
    Shorten,
    Hashtags,
    ImagePrompt,
    Other,
}

/// Classify a request by its system role.
pub fn stage(req: &GenerateRequest) -> Stage {
    let role = system_role(req);
    if role.contains("social media content creator") {
        Stage::Draft
    } else if role.contains("concise") {
        Stage::Shorten
    } else if role.contains("hashtag") {
        Stage::Hashtags
    } else if role.contains("visual image prompts") {
        Stage::ImagePrompt
    } else {
        Stage::Other
    }
}

/// A text mock answering every stage, with a fixed draft.
pub fn pipeline_text(draft: impl Into<String>, hashtags: impl Into<String>) -> MockDriver {
    let draft = draft.into();
    let hashtags = hashtags.into();
    MockDriver::routed(move |req, _| match stage(req) {
        Stage::Draft | Stage::Shorten => MockResponse::Text(draft.clone()),
        Stage::Hashtags => MockResponse::Text(hashtags.clone()),
        Stage::ImagePrompt => MockResponse::Text("A bright, modern workspace".to_string()),
        Stage::Other => MockResponse::Text("ok".to_string()),
    })
}

/// PNG bytes of a solid image.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(width, height, Rgb([30, 90, 160]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Encode test PNG");
    bytes
}
