/// Database layer for Stockroom
///
/// This module provides SQLite connection pooling and migrations.
///
/// # Modules
///
/// - `pool`: connection pool management with health checks; the database
///   file is created on first run
/// - `migrations`: migration runner over the `migrations/` directory
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::db::migrations::run_migrations;
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig {
///     url: "sqlite://stockroom.db".to_string(),
///     ..Default::default()
/// };
///
/// let pool = create_pool(config).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

pub mod migrations;
pub mod pool;
