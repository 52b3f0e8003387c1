//! Saved post command handlers.

use super::commands::PostsCommands;
use postwright::PostwrightResult;

/// Handle saved post commands.
#[cfg(feature = "database")]
pub async fn handle_posts_command(cmd: PostsCommands) -> PostwrightResult<()> {
    use postwright::{PostgresPostRepository, establish_connection};

    let mut conn = establish_connection()?;
    let mut repo = PostgresPostRepository::new(&mut conn);
    run(&mut repo, cmd)
}

#[cfg(not(feature = "database"))]
pub async fn handle_posts_command(_cmd: PostsCommands) -> PostwrightResult<()> {
    eprintln!("Error: Database feature not enabled. Rebuild with --features database");
    std::process::exit(1);
}

#[cfg(feature = "database")]
fn run<R: postwright::PostRepository>(repo: &mut R, cmd: PostsCommands) -> PostwrightResult<()> {
    use super::commands::OutputFormat;
    use postwright::{AnalyticsRange, JsonError, PostFilter};

    match cmd {
        PostsCommands::List {
            platform,
            status,
            limit,
            format,
        } => {
            let filter = PostFilter {
                platform,
                status,
                limit,
            };
            let posts = repo.list_posts(&filter)?;

            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&posts)
                        .map_err(|e| JsonError::new(e.to_string()))?;
                    println!("{}", json);
                }
                OutputFormat::Human => {
                    println!(
                        "{:<6} {:<10} {:<10} {:<17} {}",
                        "ID", "Platform", "Status", "Created", "Preview"
                    );
                    println!("{:-<90}", "");
                    for post in &posts {
                        println!(
                            "{:<6} {:<10} {:<10} {:<17} {}",
                            post.id,
                            post.platform,
                            post.status,
                            post.created_at.format("%Y-%m-%d %H:%M"),
                            preview(post.final_content.as_deref().unwrap_or(&post.generated_content))
                        );
                    }
                    println!("Total: {} posts", posts.len());
                }
            }
        }

        PostsCommands::Show { id } => match repo.get_post(id)? {
            Some(post) => {
                let json = serde_json::to_string_pretty(&post)
                    .map_err(|e| JsonError::new(e.to_string()))?;
                println!("{}", json);
            }
            None => {
                eprintln!("Post {} not found", id);
                std::process::exit(1);
            }
        },

        PostsCommands::Status { id, status } => {
            repo.update_post_status(id, status)?;
            println!("Post {} is now {}", id, status);
        }

        PostsCommands::Analytics { format } => {
            let summary = repo.analytics_summary(AnalyticsRange::default())?;

            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&summary)
                        .map_err(|e| JsonError::new(e.to_string()))?;
                    println!("{}", json);
                }
                OutputFormat::Human => {
                    println!(
                        "{:<10} {:>6} {:>10} {:>9} {:>9} {:>10}",
                        "Platform", "Total", "Published", "Approved", "Rejected", "Edit rate"
                    );
                    println!("{:-<59}", "");
                    for row in &summary {
                        println!(
                            "{:<10} {:>6} {:>10} {:>9} {:>9} {:>9.0}%",
                            row.platform,
                            row.total_posts,
                            row.published,
                            row.approved,
                            row.rejected,
                            row.edit_rate * 100.0
                        );
                    }
                }
            }
        }

        PostsCommands::Best { platform, limit } => {
            let best = repo.best_performing_posts(platform.as_deref(), limit)?;

            println!(
                "{:<6} {:<10} {:>10} {:>6} {:>9} {:>7}  {}",
                "ID", "Platform", "Engagement", "Likes", "Comments", "Shares", "Preview"
            );
            println!("{:-<90}", "");
            for entry in &best {
                println!(
                    "{:<6} {:<10} {:>9.1}% {:>6} {:>9} {:>7}  {}",
                    entry.post.id,
                    entry.post.platform,
                    entry.engagement_rate * 100.0,
                    entry.likes,
                    entry.comments,
                    entry.shares,
                    preview(
                        entry
                            .post
                            .final_content
                            .as_deref()
                            .unwrap_or(&entry.post.generated_content)
                    )
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "database")]
fn preview(content: &str) -> String {
    const PREVIEW_CHARS: usize = 40;
    let line = content.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        format!("{}...", line.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        line.to_string()
    }
}
