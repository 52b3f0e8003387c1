//! Tests for the PostgreSQL post repository.

#![cfg(feature = "integration")]

use diesel::Connection;
use postwright_core::{
    AnalyticsRange, FeedbackType, NewFeedback, NewPerformanceMetrics, NewPost,
    NewPublishingAttempt, NewQualityCheck, PostFilter, PostStatus, PublishStatus,
    QualityCheckType,
};
use postwright_database::{PgConnection, PostgresPostRepository, establish_connection, run_migrations};
use postwright_interface::PostRepository;
use serde_json::json;

/// Connection inside a transaction that is never committed.
///
/// Note: These tests require a running PostgreSQL database at DATABASE_URL.
fn test_connection() -> PgConnection {
    let _ = dotenvy::dotenv();
    let mut conn = establish_connection().expect("Failed to establish test database connection");
    run_migrations(&mut conn).expect("Failed to run migrations");
    conn.begin_test_transaction()
        .expect("Failed to begin test transaction");
    conn
}

fn unique_platform(name: &str) -> String {
    format!("test_{}_{}", name, std::process::id())
}

#[test]
fn test_save_and_get_post() {
    let mut conn = test_connection();
    let mut repo = PostgresPostRepository::new(&mut conn);
    let platform = unique_platform("save");

    let saved = repo
        .save_post(
            NewPost::new("Launch", &platform, "Edited")
                .with_generated_content("Original")
                .with_image_url("generated_images/x.png")
                .with_status(PostStatus::Approved)
                .with_human_edits(json!({"edited_content": "Edited"})),
        )
        .unwrap();

    let fetched = repo.get_post(saved.id).unwrap().unwrap();
    assert_eq!(fetched, saved);
    assert_eq!(fetched.status, PostStatus::Approved);
    assert!(fetched.was_edited());
    assert!(repo.get_post(-1).unwrap().is_none());
}

#[test]
fn test_list_posts_filters_newest_first() {
    let mut conn = test_connection();
    let mut repo = PostgresPostRepository::new(&mut conn);
    let platform = unique_platform("list");

    let first = repo.save_post(NewPost::new("a", &platform, "one")).unwrap();
    let second = repo
        .save_post(NewPost::new("b", &platform, "two").with_status(PostStatus::Approved))
        .unwrap();

    let all = repo
        .list_posts(&PostFilter::default().with_platform(platform.clone()))
        .unwrap();
    assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![second.id, first.id]);

    let approved = repo.approved_posts(Some(&platform), 10).unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, second.id);
}

#[test]
fn test_update_post_status() {
    let mut conn = test_connection();
    let mut repo = PostgresPostRepository::new(&mut conn);

    let post = repo
        .save_post(NewPost::new("a", unique_platform("status"), "one"))
        .unwrap();
    repo.update_post_status(post.id, PostStatus::Published).unwrap();

    let updated = repo.get_post(post.id).unwrap().unwrap();
    assert_eq!(updated.status, PostStatus::Published);
    assert!(updated.updated_at >= post.updated_at);
}

#[test]
fn test_best_performing_only_published() {
    let mut conn = test_connection();
    let mut repo = PostgresPostRepository::new(&mut conn);
    let platform = unique_platform("best");

    let published = repo
        .save_post(NewPost::new("a", &platform, "one").with_status(PostStatus::Published))
        .unwrap();
    let draft = repo.save_post(NewPost::new("b", &platform, "two")).unwrap();
    for (post_id, rate) in [(published.id, 0.4), (draft.id, 0.9)] {
        repo.save_performance_metrics(NewPerformanceMetrics {
            post_id,
            platform: platform.clone(),
            likes: 10,
            engagement_rate: rate,
            ..Default::default()
        })
        .unwrap();
    }

    let best = repo.best_performing_posts(Some(&platform), 10).unwrap();
    assert_eq!(best.len(), 1);
    assert_eq!(best[0].post.id, published.id);
    assert_eq!(best[0].likes, 10);
}

#[test]
fn test_analytics_summary_counts_statuses() {
    let mut conn = test_connection();
    let mut repo = PostgresPostRepository::new(&mut conn);
    let platform = unique_platform("analytics");

    repo.save_post(NewPost::new("a", &platform, "one")).unwrap();
    repo.save_post(
        NewPost::new("b", &platform, "two edited")
            .with_generated_content("two")
            .with_status(PostStatus::Approved),
    )
    .unwrap();

    let summary = repo.analytics_summary(AnalyticsRange::default()).unwrap();
    let row = summary.iter().find(|s| s.platform == platform).unwrap();
    assert_eq!(row.total_posts, 2);
    assert_eq!(row.approved, 1);
    assert!((row.edit_rate - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_feedback_checks_and_publishing_log() {
    let mut conn = test_connection();
    let mut repo = PostgresPostRepository::new(&mut conn);

    let post = repo
        .save_post(NewPost::new("a", unique_platform("log"), "one"))
        .unwrap();

    let feedback_id = repo
        .save_feedback(
            NewFeedback::new(post.id, FeedbackType::Rejected)
                .with_rejection_reason("Off brand")
                .with_created_by("tui_user"),
        )
        .unwrap();
    let check_id = repo
        .save_quality_check(NewQualityCheck {
            post_id: post.id,
            check_type: QualityCheckType::Grammar,
            passed: true,
            score: Some(0.95),
            details: Some(json!({"errors": []})),
        })
        .unwrap();
    let attempt_id = repo
        .log_publishing_attempt(
            NewPublishingAttempt::new(post.id, "twitter", PublishStatus::Failed)
                .with_error_message("Rate limited"),
        )
        .unwrap();

    assert!(feedback_id > 0);
    assert!(check_id > 0);
    assert!(attempt_id > 0);
}
