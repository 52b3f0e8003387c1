//! Database connection and migration utilities.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use postwright_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use tracing::{info, instrument};

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Establish a connection to the PostgreSQL database.
///
/// Reads the `DATABASE_URL` environment variable to determine the connection string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> DatabaseResult<PgConnection> {
    let database_url = std::env::var(DATABASE_URL_VAR).map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(format!(
            "{} environment variable not set",
            DATABASE_URL_VAR
        )))
    })?;

    PgConnection::establish(&database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Apply every pending migration and return the versions applied.
#[instrument(skip(conn))]
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    info!(count = applied.len(), "Applied migrations");
    Ok(applied)
}
