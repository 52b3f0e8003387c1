//! PostgreSQL implementation of the post repository.

use crate::models::{
    NewFeedbackRow, NewMetricsRow, NewPostRow, NewPublishingRow, NewQualityCheckRow, PostRow,
};
use crate::schema::{
    generated_posts, performance_metrics, post_feedback, publishing_log, quality_checks,
};
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use postwright_core::{
    AnalyticsRange, NewFeedback, NewPerformanceMetrics, NewPost, NewPublishingAttempt,
    NewQualityCheck, PlatformAnalytics, PostFilter, PostPerformance, PostRecord, PostStatus,
};
use postwright_error::{DatabaseError, DatabaseErrorKind, PostwrightResult};
use postwright_interface::PostRepository;
use tracing::{debug, instrument, warn};

fn query_error(e: diesel::result::Error) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Query(e.to_string()))
}

/// PostgreSQL implementation of [`PostRepository`].
///
/// Uses a mutable reference to PgConnection. For concurrent access,
/// consider wrapping the repository in Arc<Mutex> or using a connection pool.
pub struct PostgresPostRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PostgresPostRepository<'a> {
    /// Create a new repository with a mutable connection reference.
    ///
    /// # Example
    /// ```no_run
    /// use postwright_database::{PostgresPostRepository, establish_connection};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut conn = establish_connection()?;
    /// let repo = PostgresPostRepository::new(&mut conn);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl PostRepository for PostgresPostRepository<'_> {
    #[instrument(skip(self, post), fields(platform = %post.platform, status = %post.status))]
    fn save_post(&mut self, post: NewPost) -> PostwrightResult<PostRecord> {
        let row: PostRow = diesel::insert_into(generated_posts::table)
            .values(NewPostRow::from(post))
            .returning(PostRow::as_returning())
            .get_result(self.conn)
            .map_err(query_error)?;

        debug!(id = row.id, "Saved post");
        Ok(row.into_record()?)
    }

    #[instrument(skip(self))]
    fn update_post_status(&mut self, id: i32, status: PostStatus) -> PostwrightResult<()> {
        let updated = diesel::update(generated_posts::table.find(id))
            .set((
                generated_posts::status.eq(status.as_ref()),
                generated_posts::updated_at.eq(Utc::now()),
            ))
            .execute(self.conn)
            .map_err(query_error)?;

        if updated == 0 {
            warn!(id, "No post to update");
        }
        Ok(())
    }

    fn get_post(&mut self, id: i32) -> PostwrightResult<Option<PostRecord>> {
        let row = generated_posts::table
            .find(id)
            .select(PostRow::as_select())
            .first(self.conn)
            .optional()
            .map_err(query_error)?;

        Ok(row.map(PostRow::into_record).transpose()?)
    }

    fn list_posts(&mut self, filter: &PostFilter) -> PostwrightResult<Vec<PostRecord>> {
        let mut query = generated_posts::table
            .select(PostRow::as_select())
            .into_boxed();

        if let Some(platform) = &filter.platform {
            query = query.filter(generated_posts::platform.eq(platform.clone()));
        }
        if let Some(status) = filter.status {
            query = query.filter(generated_posts::status.eq(status.as_ref().to_string()));
        }

        let rows = query
            .order((generated_posts::created_at.desc(), generated_posts::id.desc()))
            .limit(filter.limit)
            .load::<PostRow>(self.conn)
            .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .map(PostRow::into_record)
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn save_feedback(&mut self, feedback: NewFeedback) -> PostwrightResult<i32> {
        Ok(diesel::insert_into(post_feedback::table)
            .values(NewFeedbackRow::from(feedback))
            .returning(post_feedback::id)
            .get_result(self.conn)
            .map_err(query_error)?)
    }

    fn save_performance_metrics(
        &mut self,
        metrics: NewPerformanceMetrics,
    ) -> PostwrightResult<i32> {
        Ok(diesel::insert_into(performance_metrics::table)
            .values(NewMetricsRow::from(metrics))
            .returning(performance_metrics::id)
            .get_result(self.conn)
            .map_err(query_error)?)
    }

    fn best_performing_posts(
        &mut self,
        platform: Option<&str>,
        limit: i64,
    ) -> PostwrightResult<Vec<PostPerformance>> {
        let mut query = generated_posts::table
            .inner_join(performance_metrics::table)
            .filter(generated_posts::status.eq(PostStatus::Published.as_ref()))
            .select((
                PostRow::as_select(),
                performance_metrics::engagement_rate,
                performance_metrics::likes,
                performance_metrics::comments,
                performance_metrics::shares,
            ))
            .into_boxed();

        if let Some(platform) = platform {
            query = query.filter(generated_posts::platform.eq(platform.to_string()));
        }

        let rows: Vec<(PostRow, f64, i32, i32, i32)> = query
            .order(performance_metrics::engagement_rate.desc())
            .limit(limit)
            .load(self.conn)
            .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .map(|(row, engagement_rate, likes, comments, shares)| {
                Ok(PostPerformance {
                    post: row.into_record()?,
                    engagement_rate,
                    likes,
                    comments,
                    shares,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?)
    }

    fn analytics_summary(
        &mut self,
        range: AnalyticsRange,
    ) -> PostwrightResult<Vec<PlatformAnalytics>> {
        let mut query = generated_posts::table
            .select(PostRow::as_select())
            .into_boxed();

        if let Some(start) = range.start {
            query = query.filter(generated_posts::created_at.ge(start));
        }
        if let Some(end) = range.end {
            query = query.filter(generated_posts::created_at.le(end));
        }

        let posts = query
            .load::<PostRow>(self.conn)
            .map_err(query_error)?
            .into_iter()
            .map(PostRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlatformAnalytics::summarize(&posts))
    }

    fn save_quality_check(&mut self, check: NewQualityCheck) -> PostwrightResult<i32> {
        Ok(diesel::insert_into(quality_checks::table)
            .values(NewQualityCheckRow::from(check))
            .returning(quality_checks::id)
            .get_result(self.conn)
            .map_err(query_error)?)
    }

    #[instrument(skip(self, attempt), fields(post_id = attempt.post_id, status = %attempt.status))]
    fn log_publishing_attempt(&mut self, attempt: NewPublishingAttempt) -> PostwrightResult<i32> {
        Ok(diesel::insert_into(publishing_log::table)
            .values(NewPublishingRow::from(attempt))
            .returning(publishing_log::id)
            .get_result(self.conn)
            .map_err(query_error)?)
    }
}
