//! Database migration command.

use calshare_core::config::AppConfig;
use calshare_core::error::AppError;
use calshare_database::DatabasePool;
use calshare_database::migration::run_migrations;

use crate::output;

/// Apply every pending migration.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;

    println!("Running database migrations...");
    run_migrations(db.pool()).await?;
    db.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
