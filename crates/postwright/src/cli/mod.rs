//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the postwright binary.

mod commands;
mod config;
mod db;
mod generate;
mod posts;
mod review;

pub use commands::{Cli, Commands};
pub use config::handle_config_command;
pub use db::handle_db_command;
pub use generate::handle_generate;
pub use posts::handle_posts_command;
pub use review::handle_review;
