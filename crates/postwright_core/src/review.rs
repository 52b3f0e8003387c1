//! Review lifecycle enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a saved post.
///
/// # Examples
///
/// ```
/// use postwright_core::PostStatus;
/// use std::str::FromStr;
///
/// assert_eq!(PostStatus::from_str("approved").unwrap(), PostStatus::Approved);
/// assert_eq!(PostStatus::Draft.to_string(), "draft");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PostStatus {
    /// Generated, not yet reviewed
    #[default]
    #[display("draft")]
    Draft,
    /// Approved by a reviewer
    #[display("approved")]
    Approved,
    /// Rejected by a reviewer
    #[display("rejected")]
    Rejected,
    /// Queued for publishing
    #[display("scheduled")]
    Scheduled,
    /// Live on the platform
    #[display("published")]
    Published,
}

/// Kind of reviewer feedback on a post.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedbackType {
    /// Approved without changes
    #[display("approved_as_is")]
    ApprovedAsIs,
    /// Approved after editing
    #[display("edited")]
    Edited,
    /// Rejected with a reason
    #[display("rejected")]
    Rejected,
    /// Regenerated by the reviewer
    #[display("regenerated")]
    Regenerated,
}

/// Automated quality check categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QualityCheckType {
    /// Match against brand voice and values
    #[display("brand_alignment")]
    BrandAlignment,
    /// Safety and appropriateness
    #[display("appropriateness")]
    Appropriateness,
    /// Grammar and spelling
    #[display("grammar")]
    Grammar,
    /// Predicted engagement
    #[display("engagement")]
    Engagement,
}

/// Outcome of a publishing attempt.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PublishStatus {
    /// Attempt in progress
    #[display("pending")]
    Pending,
    /// Post went live
    #[display("success")]
    Success,
    /// Attempt failed
    #[display("failed")]
    Failed,
}

/// How close a post is to its platform's character limit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
pub enum CharStatus {
    /// At or under 90% of the limit
    #[display("ok")]
    Ok,
    /// Over 90% of the limit but within it
    #[display("warning")]
    Warning,
    /// Over the limit
    #[display("over")]
    Over,
}

impl CharStatus {
    /// Classify a character count against a limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use postwright_core::CharStatus;
    ///
    /// assert_eq!(CharStatus::classify(200, 280), CharStatus::Ok);
    /// assert_eq!(CharStatus::classify(260, 280), CharStatus::Warning);
    /// assert_eq!(CharStatus::classify(280, 280), CharStatus::Warning);
    /// assert_eq!(CharStatus::classify(281, 280), CharStatus::Over);
    /// ```
    pub fn classify(count: usize, limit: usize) -> Self {
        if count > limit {
            CharStatus::Over
        } else if count * 10 > limit * 9 {
            CharStatus::Warning
        } else {
            CharStatus::Ok
        }
    }
}
