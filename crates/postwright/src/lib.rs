//! Postwright - platform-tailored social media posts
//!
//! Postwright turns a topic into a ready-to-review post for each configured
//! social platform. Every post is drafted in the brand's voice, held within
//! the platform's character limit, tagged with hashtags, and paired with a
//! generated image sized for the platform. Image failures never lose a post:
//! a placeholder image is written instead.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use postwright::{GenerationRequest, PostwrightConfig, SocialMediaGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PostwrightConfig::load()?;
//!     let generator = SocialMediaGenerator::from_config(&config)?;
//!
//!     let request = GenerationRequest::new("Our new collaboration feature", "linkedin")
//!         .with_context("Focus on productivity");
//!     let post = generator.generate_post(&request).await?;
//!     println!("{}", post.content());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `database` - PostgreSQL persistence for reviewed posts
//! - `tui` - Terminal review interface
//! - `observability` - OpenTelemetry tracing
//! - `all` - Enable all features
//!
//! # Architecture
//!
//! - `postwright_error` - Error types
//! - `postwright_core` - Core data types (requests, posts, platforms, records)
//! - `postwright_interface` - Driver and repository traits
//! - `postwright_retry` - Exponential backoff
//! - `postwright_config` - Layered configuration and credentials
//! - `postwright_models` - OpenAI text and Gemini image clients
//! - `postwright_generation` - The generation pipeline and review workflow
//! - `postwright_database` - PostgreSQL integration
//! - `postwright_tui` - Terminal UI
//!
//! This crate (`postwright`) re-exports everything for convenience.

pub use postwright_config::*;
pub use postwright_core::*;
pub use postwright_error::*;
pub use postwright_generation::*;
pub use postwright_interface::*;
pub use postwright_models::*;
pub use postwright_retry::*;

#[cfg(feature = "database")]
pub use postwright_database::*;

#[cfg(feature = "tui")]
pub use postwright_tui::*;

#[cfg(feature = "observability")]
mod observability;

#[cfg(feature = "observability")]
pub use observability::{
    ObservabilityConfig, init_observability, init_observability_with_config,
    shutdown_observability,
};
