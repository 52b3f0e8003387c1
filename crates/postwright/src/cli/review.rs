//! Review command handler.

use super::commands::GenerationArgs;
use postwright::{PostwrightConfig, PostwrightResult};

/// Generate every platform and open the review TUI on the results.
#[cfg(feature = "tui")]
pub async fn handle_review(args: GenerationArgs, config: &PostwrightConfig) -> PostwrightResult<()> {
    use postwright::SocialMediaGenerator;
    use std::sync::Arc;

    if !args.all_platforms() {
        tracing::warn!(platform = %args.platform, "Review always covers every platform");
    }

    let generator = Arc::new(SocialMediaGenerator::from_config(config)?);
    let template = args.request("");

    #[cfg(feature = "database")]
    {
        use postwright::{PostgresPostRepository, establish_connection};

        let mut conn = establish_connection()?;
        review_with(generator, PostgresPostRepository::new(&mut conn), template).await
    }

    #[cfg(not(feature = "database"))]
    {
        tracing::info!("Database feature not enabled, review decisions are kept in memory");
        review_with(generator, postwright::InMemoryPostRepository::new(), template).await
    }
}

#[cfg(not(feature = "tui"))]
pub async fn handle_review(_args: GenerationArgs, _config: &PostwrightConfig) -> PostwrightResult<()> {
    eprintln!("Error: TUI feature not enabled. Rebuild with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
async fn review_with<R: postwright::PostRepository>(
    generator: std::sync::Arc<postwright::SocialMediaGenerator>,
    repository: R,
    template: postwright::GenerationRequest,
) -> PostwrightResult<()> {
    use postwright::{ReviewSession, run_review_tui};

    tracing::info!(topic = %template.topic(), "Generating posts for review");
    let mut session = ReviewSession::start(generator, repository, template).await;
    run_review_tui(&mut session)?;

    println!("Review of \"{}\"", session.topic());
    for platform in session.platforms() {
        if let Some(record) = session.decision(&platform) {
            println!("  {:<10} {} (post {})", platform, record.status, record.id);
        } else if let Some(e) = session.error(&platform) {
            println!("  {:<10} failed: {}", platform, e);
        } else {
            println!("  {:<10} {}", platform, session.status(&platform));
        }
    }
    Ok(())
}
