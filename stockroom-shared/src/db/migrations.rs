/// Database migration runner
///
/// Runs the SQL migrations embedded from this crate's `migrations/`
/// directory. The initial migration creates the credential store, the
/// inventory catalog tables, and the checkout ledger.
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::db::migrations::run_migrations;
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Migrations run inside the transaction sqlx wraps them in; a failing
/// migration is rolled back and returned as an error.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
