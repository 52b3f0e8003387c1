//! In-memory post repository.

use crate::PostRepository;
use chrono::Utc;
use postwright_core::{
    AnalyticsRange, NewFeedback, NewPerformanceMetrics, NewPost, NewPublishingAttempt,
    NewQualityCheck, PlatformAnalytics, PostFilter, PostPerformance, PostRecord, PostStatus,
};
use postwright_error::PostwrightResult;
use tracing::{debug, instrument, warn};

/// Repository that keeps every record in memory.
///
/// Used by tests and by the review UI when no database is configured.
/// IDs are assigned sequentially per record kind, starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Vec<PostRecord>,
    feedback: Vec<(i32, NewFeedback)>,
    metrics: Vec<(i32, NewPerformanceMetrics)>,
    quality_checks: Vec<(i32, NewQualityCheck)>,
    publishing_log: Vec<(i32, NewPublishingAttempt)>,
}

impl InMemoryPostRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// All feedback recorded so far, in insertion order.
    pub fn feedback(&self) -> impl Iterator<Item = &NewFeedback> {
        self.feedback.iter().map(|(_, feedback)| feedback)
    }

    /// All quality checks recorded so far.
    pub fn quality_checks(&self) -> impl Iterator<Item = &NewQualityCheck> {
        self.quality_checks.iter().map(|(_, check)| check)
    }

    /// All publishing attempts recorded so far.
    pub fn publishing_log(&self) -> impl Iterator<Item = &NewPublishingAttempt> {
        self.publishing_log.iter().map(|(_, attempt)| attempt)
    }

    fn next_id<T>(rows: &[(i32, T)]) -> i32 {
        rows.last().map_or(1, |(id, _)| id + 1)
    }
}

impl PostRepository for InMemoryPostRepository {
    #[instrument(skip(self, post), fields(platform = %post.platform, status = %post.status))]
    fn save_post(&mut self, post: NewPost) -> PostwrightResult<PostRecord> {
        let id = self.posts.last().map_or(1, |p| p.id + 1);
        let now = Utc::now();
        let record = PostRecord {
            id,
            user_prompt: post.user_prompt,
            platform: post.platform,
            generated_content: post.generated_content,
            final_content: post.final_content,
            image_url: post.image_url,
            image_prompt: post.image_prompt,
            status: post.status,
            human_edits: post.human_edits,
            jira_issue_key: post.jira_issue_key,
            created_at: now,
            updated_at: now,
        };
        self.posts.push(record.clone());
        debug!(id, "Saved post");
        Ok(record)
    }

    #[instrument(skip(self))]
    fn update_post_status(&mut self, id: i32, status: PostStatus) -> PostwrightResult<()> {
        match self.posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.status = status;
                post.updated_at = Utc::now();
            }
            None => warn!(id, "No post to update"),
        }
        Ok(())
    }

    fn get_post(&mut self, id: i32) -> PostwrightResult<Option<PostRecord>> {
        Ok(self.posts.iter().find(|p| p.id == id).cloned())
    }

    fn list_posts(&mut self, filter: &PostFilter) -> PostwrightResult<Vec<PostRecord>> {
        let mut posts: Vec<PostRecord> = self
            .posts
            .iter()
            .filter(|p| filter.platform.as_ref().is_none_or(|pf| &p.platform == pf))
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts.truncate(usize::try_from(filter.limit).unwrap_or(0));
        Ok(posts)
    }

    fn save_feedback(&mut self, feedback: NewFeedback) -> PostwrightResult<i32> {
        let id = Self::next_id(&self.feedback);
        self.feedback.push((id, feedback));
        Ok(id)
    }

    fn save_performance_metrics(
        &mut self,
        metrics: NewPerformanceMetrics,
    ) -> PostwrightResult<i32> {
        let id = Self::next_id(&self.metrics);
        self.metrics.push((id, metrics));
        Ok(id)
    }

    fn best_performing_posts(
        &mut self,
        platform: Option<&str>,
        limit: i64,
    ) -> PostwrightResult<Vec<PostPerformance>> {
        let mut joined: Vec<PostPerformance> = self
            .metrics
            .iter()
            .filter_map(|(_, m)| {
                let post = self.posts.iter().find(|p| p.id == m.post_id)?;
                (post.status == PostStatus::Published
                    && platform.is_none_or(|pf| post.platform == pf))
                .then(|| PostPerformance {
                    post: post.clone(),
                    engagement_rate: m.engagement_rate,
                    likes: m.likes,
                    comments: m.comments,
                    shares: m.shares,
                })
            })
            .collect();
        joined.sort_by(|a, b| b.engagement_rate.total_cmp(&a.engagement_rate));
        joined.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(joined)
    }

    fn analytics_summary(
        &mut self,
        range: AnalyticsRange,
    ) -> PostwrightResult<Vec<PlatformAnalytics>> {
        Ok(PlatformAnalytics::summarize(
            self.posts.iter().filter(|p| range.contains(&p.created_at)),
        ))
    }

    fn save_quality_check(&mut self, check: NewQualityCheck) -> PostwrightResult<i32> {
        let id = Self::next_id(&self.quality_checks);
        self.quality_checks.push((id, check));
        Ok(id)
    }

    fn log_publishing_attempt(&mut self, attempt: NewPublishingAttempt) -> PostwrightResult<i32> {
        let id = Self::next_id(&self.publishing_log);
        self.publishing_log.push((id, attempt));
        Ok(id)
    }
}
