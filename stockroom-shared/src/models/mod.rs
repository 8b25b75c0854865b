/// Database models for Stockroom
///
/// This module contains all database models and their operations.
///
/// # Models
///
/// - `user`: the credential store — user accounts with role flags
/// - `catalog`: the inventory catalog — item names, item statuses, items
/// - `checkout`: the checkout ledger — per-user requests with approval flag
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::models::user::User;
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, "user@example.com", "$argon2id$...").await?;
/// println!("Created user: {}", user.id);
/// # Ok(())
/// # }
/// ```

pub mod catalog;
pub mod checkout;
pub mod user;
