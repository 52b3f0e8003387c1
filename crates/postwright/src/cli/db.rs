//! Database command handlers.

use super::commands::DbCommands;
use postwright::PostwrightResult;

/// Handle database commands.
#[cfg(feature = "database")]
pub async fn handle_db_command(cmd: DbCommands) -> PostwrightResult<()> {
    use postwright::{establish_connection, run_migrations};

    match cmd {
        DbCommands::Migrate => {
            let mut conn = establish_connection()?;
            let applied = run_migrations(&mut conn)?;
            if applied.is_empty() {
                println!("Database is up to date");
            } else {
                for version in &applied {
                    println!("Applied migration {}", version);
                }
            }
        }
    }
    Ok(())
}

#[cfg(not(feature = "database"))]
pub async fn handle_db_command(_cmd: DbCommands) -> PostwrightResult<()> {
    eprintln!("Error: Database feature not enabled. Rebuild with --features database");
    std::process::exit(1);
}
