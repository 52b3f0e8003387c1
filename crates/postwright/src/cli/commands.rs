//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use postwright::{GenerationRequest, PostStatus};
use std::path::PathBuf;

/// Platform value that fans out to every configured platform.
pub const ALL_PLATFORMS: &str = "all";

const DEFAULT_TOPIC: &str =
    "Announcing our new AI-powered feature that helps teams collaborate better";
const DEFAULT_CONTEXT: &str = "Focus on productivity and team efficiency";

/// Postwright - platform-tailored social media posts with brand voice, hashtags, and images
#[derive(Parser, Debug)]
#[command(name = "postwright")]
#[command(about = "Generate platform-tailored social media posts with brand voice, hashtags, and images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load settings from this file instead of the standard locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate posts and print them
    Generate(GenerateArgs),

    /// Generate posts for every platform and review them in the terminal
    Review(GenerationArgs),

    /// Query saved posts
    #[command(subcommand)]
    Posts(PostsCommands),

    /// Database management
    #[command(subcommand)]
    Db(DbCommands),

    /// Configuration checks
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// What to generate.
#[derive(Args, Debug, Clone)]
pub struct GenerationArgs {
    /// Topic of the post
    #[arg(default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Target platform, or `all`
    #[arg(short, long, default_value = ALL_PLATFORMS)]
    pub platform: String,

    /// Extra context for the draft
    #[arg(short, long, default_value = DEFAULT_CONTEXT)]
    pub context: String,

    /// Brand voice to use instead of the one derived from the guidelines
    #[arg(long)]
    pub voice: Option<String>,

    /// Skip hashtag generation
    #[arg(long)]
    pub no_hashtags: bool,
}

impl GenerationArgs {
    /// The request for `platform`, carrying every other flag.
    pub fn request(&self, platform: &str) -> GenerationRequest {
        let mut request = GenerationRequest::new(self.topic.clone(), platform)
            .with_include_hashtags(!self.no_hashtags);
        if !self.context.trim().is_empty() {
            request = request.with_context(self.context.clone());
        }
        if let Some(voice) = &self.voice {
            request = request.with_brand_voice(voice.clone());
        }
        request
    }

    /// Whether every configured platform was requested.
    pub fn all_platforms(&self) -> bool {
        self.platform.eq_ignore_ascii_case(ALL_PLATFORMS)
    }
}

/// Arguments for `generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Generation inputs
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Save the posts as drafts
    #[arg(long)]
    pub save: bool,

    /// Run quality checks on each post
    #[arg(long)]
    pub quality: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Saved post subcommands
#[derive(Subcommand, Debug)]
pub enum PostsCommands {
    /// List saved posts, newest first
    List {
        /// Platform filter
        #[arg(long)]
        platform: Option<String>,

        /// Status filter
        #[arg(long, value_parser = parse_status)]
        status: Option<PostStatus>,

        /// Maximum number of posts to display
        #[arg(long, default_value = "50")]
        limit: i64,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show one post
    Show {
        /// ID of the post
        id: i32,
    },

    /// Change the status of a post
    Status {
        /// ID of the post
        id: i32,

        /// New status
        #[arg(value_parser = parse_status)]
        status: PostStatus,
    },

    /// Per-platform review statistics
    Analytics {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Published posts with the highest engagement rate
    Best {
        /// Platform filter
        #[arg(long)]
        platform: Option<String>,

        /// Maximum number of posts to display
        #[arg(long, default_value = "10")]
        limit: i64,
    },
}

/// Database subcommands
#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Apply pending migrations
    Migrate,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Report which credentials and files are present
    Check,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

fn parse_status(value: &str) -> Result<PostStatus, String> {
    value
        .parse()
        .map_err(|_| format!("unknown status '{}' (draft, approved, rejected, scheduled, published)", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["postwright", "generate"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.generation.topic, DEFAULT_TOPIC);
        assert!(args.generation.all_platforms());
        assert_eq!(args.format, OutputFormat::Human);

        let request = args.generation.request("twitter");
        assert_eq!(request.context().as_deref(), Some(DEFAULT_CONTEXT));
        assert!(request.include_hashtags());
        assert!(request.brand_voice().is_none());
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "postwright",
            "-v",
            "generate",
            "Spring open house",
            "-p",
            "nextdoor",
            "--voice",
            "neighborly",
            "--no-hashtags",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(!args.generation.all_platforms());

        let request = args.generation.request(&args.generation.platform);
        assert_eq!(request.topic(), "Spring open house");
        assert_eq!(request.platform(), "nextdoor");
        assert_eq!(request.brand_voice().as_deref(), Some("neighborly"));
        assert!(!request.include_hashtags());
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_blank_context_is_none() {
        let cli = Cli::try_parse_from(["postwright", "review", "-c", " "]).unwrap();
        let Commands::Review(args) = cli.command else {
            panic!("expected review");
        };
        assert!(args.request("linkedin").context().is_none());
    }

    #[test]
    fn test_posts_status_parses_status() {
        let cli = Cli::try_parse_from(["postwright", "posts", "status", "7", "published"]).unwrap();
        match cli.command {
            Commands::Posts(PostsCommands::Status { id, status }) => {
                assert_eq!(id, 7);
                assert_eq!(status, PostStatus::Published);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["postwright", "posts", "status", "7", "live"]).is_err());
    }
}
