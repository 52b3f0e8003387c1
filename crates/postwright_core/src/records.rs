//! Records exchanged with the post repository.

use crate::{FeedbackType, PostStatus, PublishStatus, QualityCheckType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A saved post as stored by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Row ID
    pub id: i32,
    /// Topic the user asked for
    pub user_prompt: String,
    /// Platform key
    pub platform: String,
    /// Content as the pipeline produced it
    pub generated_content: String,
    /// Content after review
    pub final_content: Option<String>,
    /// Image location
    pub image_url: Option<String>,
    /// Prompt the image came from
    pub image_prompt: Option<String>,
    /// Review status
    pub status: PostStatus,
    /// JSON description of reviewer edits
    pub human_edits: Option<serde_json::Value>,
    /// External tracker key
    pub jira_issue_key: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl PostRecord {
    /// Whether the reviewed content differs from what was generated.
    pub fn was_edited(&self) -> bool {
        self.final_content
            .as_ref()
            .is_some_and(|content| content != &self.generated_content)
    }
}

/// Fields for a new post row.
///
/// # Examples
///
/// ```
/// use postwright_core::{NewPost, PostStatus};
///
/// let post = NewPost::new("Launch day", "twitter", "Edited text")
///     .with_generated_content("Original text")
///     .with_status(PostStatus::Approved);
///
/// assert_eq!(post.final_content.as_deref(), Some("Edited text"));
/// assert_eq!(post.generated_content, "Original text");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct NewPost {
    /// Topic the user asked for
    pub user_prompt: String,
    /// Platform key
    pub platform: String,
    /// Content as the pipeline produced it
    pub generated_content: String,
    /// Content after review
    pub final_content: Option<String>,
    /// Image location
    pub image_url: Option<String>,
    /// Prompt the image came from
    pub image_prompt: Option<String>,
    /// Review status
    pub status: PostStatus,
    /// JSON description of reviewer edits
    pub human_edits: Option<serde_json::Value>,
    /// External tracker key
    pub jira_issue_key: Option<String>,
}

impl NewPost {
    /// A draft whose generated and final content are both `content`.
    pub fn new(
        user_prompt: impl Into<String>,
        platform: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            user_prompt: user_prompt.into(),
            platform: platform.into(),
            generated_content: content.clone(),
            final_content: Some(content),
            image_url: None,
            image_prompt: None,
            status: PostStatus::Draft,
            human_edits: None,
            jira_issue_key: None,
        }
    }
}

/// Filters for listing posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct PostFilter {
    /// Only this platform
    pub platform: Option<String>,
    /// Only this status
    pub status: Option<PostStatus>,
    /// Maximum rows returned
    pub limit: i64,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            platform: None,
            status: None,
            limit: 50,
        }
    }
}

/// Reviewer feedback on a saved post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct NewFeedback {
    /// Post the feedback is about
    pub post_id: i32,
    /// Kind of feedback
    pub feedback_type: FeedbackType,
    /// JSON description of edits
    pub edit_details: Option<serde_json::Value>,
    /// Why the post was rejected
    pub rejection_reason: Option<String>,
    /// Who gave the feedback
    pub created_by: String,
}

impl NewFeedback {
    /// Feedback attributed to `system`.
    pub fn new(post_id: i32, feedback_type: FeedbackType) -> Self {
        Self {
            post_id,
            feedback_type,
            edit_details: None,
            rejection_reason: None,
            created_by: "system".to_string(),
        }
    }
}

/// Engagement numbers reported by a platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewPerformanceMetrics {
    /// Post the metrics belong to
    pub post_id: i32,
    /// Platform key
    pub platform: String,
    /// Likes
    pub likes: i32,
    /// Comments
    pub comments: i32,
    /// Shares
    pub shares: i32,
    /// Impressions
    pub impressions: i32,
    /// Clicks
    pub clicks: i32,
    /// Engagement rate
    pub engagement_rate: f64,
}

/// A published post with its engagement numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPerformance {
    /// The post
    pub post: PostRecord,
    /// Engagement rate
    pub engagement_rate: f64,
    /// Likes
    pub likes: i32,
    /// Comments
    pub comments: i32,
    /// Shares
    pub shares: i32,
}

/// Time window for analytics, both ends inclusive and optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyticsRange {
    /// Earliest creation time
    pub start: Option<DateTime<Utc>>,
    /// Latest creation time
    pub end: Option<DateTime<Utc>>,
}

impl AnalyticsRange {
    /// Whether a timestamp falls in the window.
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| *at >= start) && self.end.is_none_or(|end| *at <= end)
    }
}

/// Per-platform review summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAnalytics {
    /// Platform key
    pub platform: String,
    /// Posts saved
    pub total_posts: i64,
    /// Posts published
    pub published: i64,
    /// Posts approved
    pub approved: i64,
    /// Posts rejected
    pub rejected: i64,
    /// Share of posts whose final content differs from the generated content
    pub edit_rate: f64,
}

impl PlatformAnalytics {
    /// Group posts by platform and count them, in platform name order.
    pub fn summarize<'a>(posts: impl IntoIterator<Item = &'a PostRecord>) -> Vec<Self> {
        let mut groups: BTreeMap<&str, Vec<&PostRecord>> = BTreeMap::new();
        for post in posts {
            groups.entry(post.platform.as_str()).or_default().push(post);
        }

        groups
            .into_iter()
            .map(|(platform, posts)| {
                let count =
                    |status: PostStatus| posts.iter().filter(|p| p.status == status).count() as i64;
                let edited = posts.iter().filter(|p| p.was_edited()).count();
                Self {
                    platform: platform.to_string(),
                    total_posts: posts.len() as i64,
                    published: count(PostStatus::Published),
                    approved: count(PostStatus::Approved),
                    rejected: count(PostStatus::Rejected),
                    edit_rate: edited as f64 / posts.len() as f64,
                }
            })
            .collect()
    }
}

/// Result of one automated quality check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQualityCheck {
    /// Post that was checked
    pub post_id: i32,
    /// Which check ran
    pub check_type: QualityCheckType,
    /// Whether it passed
    pub passed: bool,
    /// Score in `[0.0, 1.0]`
    pub score: Option<f64>,
    /// Full check reply
    pub details: Option<serde_json::Value>,
}

/// A publishing attempt to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct NewPublishingAttempt {
    /// Post being published
    pub post_id: i32,
    /// Platform key
    pub platform: String,
    /// ID the platform assigned
    pub platform_post_id: Option<String>,
    /// Outcome
    pub status: PublishStatus,
    /// Failure description
    pub error_message: Option<String>,
    /// Attempts made so far
    pub attempts: i32,
}

impl NewPublishingAttempt {
    /// First attempt with the given outcome.
    pub fn new(post_id: i32, platform: impl Into<String>, status: PublishStatus) -> Self {
        Self {
            post_id,
            platform: platform.into(),
            platform_post_id: None,
            status,
            error_message: None,
            attempts: 1,
        }
    }
}
