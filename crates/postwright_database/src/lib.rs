//! PostgreSQL persistence for Postwright.
//!
//! Diesel models, schema, embedded migrations, and a [`PostRepository`]
//! implementation over a borrowed connection.
//!
//! # Example
//!
//! ```no_run
//! use postwright_core::PostFilter;
//! use postwright_database::{PostgresPostRepository, establish_connection, run_migrations};
//! use postwright_interface::PostRepository;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = establish_connection()?;
//! run_migrations(&mut conn)?;
//!
//! let mut repo = PostgresPostRepository::new(&mut conn);
//! let recent = repo.list_posts(&PostFilter::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! [`PostRepository`]: postwright_interface::PostRepository

mod connection;
mod models;
mod repository;

pub mod schema;

pub use connection::{DATABASE_URL_VAR, establish_connection, run_migrations};
pub use models::{
    NewFeedbackRow, NewMetricsRow, NewPostRow, NewPublishingRow, NewQualityCheckRow, PostRow,
};
pub use repository::PostgresPostRepository;

pub use diesel::pg::PgConnection;
