//! Post repository trait.

use postwright_core::{
    AnalyticsRange, NewFeedback, NewPerformanceMetrics, NewPost, NewPublishingAttempt,
    NewQualityCheck, PlatformAnalytics, PostFilter, PostPerformance, PostRecord, PostStatus,
};
use postwright_error::PostwrightResult;

/// Persistence for reviewed posts and everything recorded about them.
///
/// Generation never touches the repository; the review layer calls it after
/// a human decision. Methods take `&mut self` because the backing connection
/// is not shared.
pub trait PostRepository: Send {
    /// Insert a post and return the stored record.
    fn save_post(&mut self, post: NewPost) -> PostwrightResult<PostRecord>;

    /// Change a post's status and touch `updated_at`.
    fn update_post_status(&mut self, id: i32, status: PostStatus) -> PostwrightResult<()>;

    /// Fetch one post.
    fn get_post(&mut self, id: i32) -> PostwrightResult<Option<PostRecord>>;

    /// Posts matching a filter, newest first.
    fn list_posts(&mut self, filter: &PostFilter) -> PostwrightResult<Vec<PostRecord>>;

    /// Approved posts, newest first.
    fn approved_posts(
        &mut self,
        platform: Option<&str>,
        limit: i64,
    ) -> PostwrightResult<Vec<PostRecord>> {
        let mut filter = PostFilter::default();
        filter.platform = platform.map(str::to_string);
        filter.status = Some(PostStatus::Approved);
        filter.limit = limit;
        self.list_posts(&filter)
    }

    /// Record reviewer feedback and return its ID.
    fn save_feedback(&mut self, feedback: NewFeedback) -> PostwrightResult<i32>;

    /// Record engagement numbers and return their ID.
    fn save_performance_metrics(&mut self, metrics: NewPerformanceMetrics)
    -> PostwrightResult<i32>;

    /// Published posts with metrics, best engagement rate first.
    fn best_performing_posts(
        &mut self,
        platform: Option<&str>,
        limit: i64,
    ) -> PostwrightResult<Vec<PostPerformance>>;

    /// Per-platform counts for posts created in the range.
    fn analytics_summary(&mut self, range: AnalyticsRange)
    -> PostwrightResult<Vec<PlatformAnalytics>>;

    /// Record a quality check result and return its ID.
    fn save_quality_check(&mut self, check: NewQualityCheck) -> PostwrightResult<i32>;

    /// Record a publishing attempt and return its ID.
    fn log_publishing_attempt(&mut self, attempt: NewPublishingAttempt) -> PostwrightResult<i32>;
}
