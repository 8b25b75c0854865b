/// Checkout ledger
///
/// Records one row per user checkout request against a catalog item. A
/// request starts pending (`approved = false`); the approval flag is the
/// only field ever mutated afterwards, and rows are never deleted.
///
/// Submission does NOT validate the requested quantity against the item's
/// catalog quantity and does not decrement it — the catalog and the ledger
/// are deliberately decoupled here (see DESIGN.md). Foreign keys on the
/// item and user references give best-effort existence enforcement at
/// insertion time.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A single user's request against one catalog item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CheckoutRequest {
    /// Unique request ID
    pub id: i64,

    /// The requested catalog item
    pub item_id: i64,

    /// Requested quantity (positive)
    pub quantity: i64,

    /// The requesting user
    #[sqlx(rename = "user")]
    pub user_id: i64,

    /// Approval flag; false = pending
    pub approved: bool,
}

impl CheckoutRequest {
    /// Submits a checkout request
    ///
    /// Inserts a pending row. The item's catalog quantity is neither
    /// checked nor decremented.
    ///
    /// # Errors
    ///
    /// Returns a database error if the item or user reference does not
    /// exist (foreign key violation) or the connection fails.
    pub async fn submit(
        pool: &SqlitePool,
        item_id: i64,
        quantity: i64,
        user_id: i64,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, CheckoutRequest>(
            r#"
            INSERT INTO items_users (item_id, quantity, user)
            VALUES (?, ?, ?)
            RETURNING id, item_id, quantity, user, approved
            "#,
        )
        .bind(item_id)
        .bind(quantity)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Lists all requests tied to a user
    ///
    /// Returns every row regardless of approval state; callers apply their
    /// own filter if they want only pending or only approved requests.
    pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, CheckoutRequest>(
            r#"
            SELECT id, item_id, quantity, user, approved
            FROM items_users
            WHERE user = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
