//! Core data types for Postwright.
//!
//! This crate provides the types shared by every other crate in the workspace:
//! model request/response shapes, platform specifications, generation requests
//! and results, brand guidelines, and the records persisted by review.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brand;
mod generation;
mod message;
mod output;
mod platform;
mod post;
mod records;
mod request;
mod review;
mod role;

pub use brand::{
    Avoidances, BrandGuidelines, CtaPreferences, HashtagStrategy, PlatformPreference,
    VoiceGuidelines,
};
pub use generation::{GenerationRequest, GenerationRequestBuilder};
pub use message::Message;
pub use output::Output;
pub use platform::{ImageDimensions, PlatformRegistry, PlatformSpec, PlatformSpecBuilder};
pub use post::{GeneratedPost, PostMetadata, RegeneratedImage};
pub use records::{
    AnalyticsRange, NewFeedback, NewPerformanceMetrics, NewPost, NewPublishingAttempt,
    NewQualityCheck, PlatformAnalytics, PostFilter, PostPerformance, PostRecord,
};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use review::{CharStatus, FeedbackType, PostStatus, PublishStatus, QualityCheckType};
pub use role::Role;
