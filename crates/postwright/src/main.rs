//! Postwright CLI binary.
//!
//! This binary provides command-line access to Postwright's functionality:
//! - Generate posts for one or every platform
//! - Review generated posts in a terminal UI
//! - Query and manage saved posts

use clap::Parser;
use postwright::PostwrightConfig;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, handle_config_command, handle_db_command, handle_generate,
        handle_posts_command, handle_review,
    };

    // Credentials may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    #[cfg(feature = "observability")]
    postwright::init_observability_with_config(
        postwright::ObservabilityConfig::default()
            .with_log_level(log_level.as_str().to_lowercase()),
    )?;

    #[cfg(not(feature = "observability"))]
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => PostwrightConfig::from_file(path)?,
        None => PostwrightConfig::load()?,
    };

    match cli.command {
        Commands::Generate(args) => {
            handle_generate(args, &config).await?;
        }

        Commands::Review(args) => {
            handle_review(args, &config).await?;
        }

        Commands::Posts(posts_cmd) => {
            handle_posts_command(posts_cmd).await?;
        }

        Commands::Db(db_cmd) => {
            handle_db_command(db_cmd).await?;
        }

        Commands::Config(config_cmd) => {
            handle_config_command(config_cmd, &config)?;
        }
    }

    #[cfg(feature = "observability")]
    postwright::shutdown_observability();

    Ok(())
}
