//! Diesel row types and their conversions to and from core records.

use crate::schema::{
    generated_posts, performance_metrics, post_feedback, publishing_log, quality_checks,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use postwright_core::{
    NewFeedback, NewPerformanceMetrics, NewPost, NewPublishingAttempt, NewQualityCheck, PostRecord,
};
use postwright_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use std::fmt::Display;
use std::str::FromStr;

/// Parse a lifecycle enum stored as text.
fn parse_column<T>(column: &str, value: &str) -> DatabaseResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e| {
        DatabaseError::new(DatabaseErrorKind::Serialization(format!(
            "Invalid {} '{}': {}",
            column, value, e
        )))
    })
}

/// Database row for generated_posts.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = generated_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub id: i32,
    pub user_prompt: String,
    pub platform: String,
    pub generated_content: String,
    pub final_content: Option<String>,
    pub image_url: Option<String>,
    pub image_prompt: Option<String>,
    pub status: String,
    pub human_edits: Option<serde_json::Value>,
    pub jira_issue_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostRow {
    /// Convert to the record the repository trait returns.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the stored status is unknown.
    pub fn into_record(self) -> DatabaseResult<PostRecord> {
        Ok(PostRecord {
            id: self.id,
            status: parse_column("status", &self.status)?,
            user_prompt: self.user_prompt,
            platform: self.platform,
            generated_content: self.generated_content,
            final_content: self.final_content,
            image_url: self.image_url,
            image_prompt: self.image_prompt,
            human_edits: self.human_edits,
            jira_issue_key: self.jira_issue_key,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable row for generated_posts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = generated_posts)]
pub struct NewPostRow {
    pub user_prompt: String,
    pub platform: String,
    pub generated_content: String,
    pub final_content: Option<String>,
    pub image_url: Option<String>,
    pub image_prompt: Option<String>,
    pub status: String,
    pub human_edits: Option<serde_json::Value>,
    pub jira_issue_key: Option<String>,
}

impl From<NewPost> for NewPostRow {
    fn from(post: NewPost) -> Self {
        Self {
            user_prompt: post.user_prompt,
            platform: post.platform,
            generated_content: post.generated_content,
            final_content: post.final_content,
            image_url: post.image_url,
            image_prompt: post.image_prompt,
            status: post.status.as_ref().to_string(),
            human_edits: post.human_edits,
            jira_issue_key: post.jira_issue_key,
        }
    }
}

/// Insertable row for post_feedback.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_feedback)]
pub struct NewFeedbackRow {
    pub post_id: i32,
    pub feedback_type: String,
    pub edit_details: Option<serde_json::Value>,
    pub rejection_reason: Option<String>,
    pub created_by: String,
}

impl From<NewFeedback> for NewFeedbackRow {
    fn from(feedback: NewFeedback) -> Self {
        Self {
            post_id: feedback.post_id,
            feedback_type: feedback.feedback_type.as_ref().to_string(),
            edit_details: feedback.edit_details,
            rejection_reason: feedback.rejection_reason,
            created_by: feedback.created_by,
        }
    }
}

/// Insertable row for performance_metrics.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = performance_metrics)]
pub struct NewMetricsRow {
    pub post_id: i32,
    pub platform: String,
    pub likes: i32,
    pub comments: i32,
    pub shares: i32,
    pub impressions: i32,
    pub clicks: i32,
    pub engagement_rate: f64,
}

impl From<NewPerformanceMetrics> for NewMetricsRow {
    fn from(metrics: NewPerformanceMetrics) -> Self {
        Self {
            post_id: metrics.post_id,
            platform: metrics.platform,
            likes: metrics.likes,
            comments: metrics.comments,
            shares: metrics.shares,
            impressions: metrics.impressions,
            clicks: metrics.clicks,
            engagement_rate: metrics.engagement_rate,
        }
    }
}

/// Insertable row for quality_checks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = quality_checks)]
pub struct NewQualityCheckRow {
    pub post_id: i32,
    pub check_type: String,
    pub passed: bool,
    pub score: Option<f64>,
    pub details: Option<serde_json::Value>,
}

impl From<NewQualityCheck> for NewQualityCheckRow {
    fn from(check: NewQualityCheck) -> Self {
        Self {
            post_id: check.post_id,
            check_type: check.check_type.as_ref().to_string(),
            passed: check.passed,
            score: check.score,
            details: check.details,
        }
    }
}

/// Insertable row for publishing_log.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = publishing_log)]
pub struct NewPublishingRow {
    pub post_id: i32,
    pub platform: String,
    pub platform_post_id: Option<String>,
    pub status: String,
    pub error_message: Option<String>,
    pub attempts: i32,
}

impl From<NewPublishingAttempt> for NewPublishingRow {
    fn from(attempt: NewPublishingAttempt) -> Self {
        Self {
            post_id: attempt.post_id,
            platform: attempt.platform,
            platform_post_id: attempt.platform_post_id,
            status: attempt.status.as_ref().to_string(),
            error_message: attempt.error_message,
            attempts: attempt.attempts,
        }
    }
}
