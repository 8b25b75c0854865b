/// Inventory catalog models
///
/// The catalog is normalized across three tables: canonical item names,
/// canonical status labels (e.g. "new", "in use"), and the items that
/// reference one of each plus a total available quantity.
///
/// Names and statuses are created by catalog seeding and never mutated.
/// Item quantity is stored as given; nothing in this layer validates it
/// against checkout submissions (the ledger never decrements it).
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::models::catalog::{Item, ItemName, ItemStatus};
/// # use sqlx::SqlitePool;
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let name = ItemName::create(&pool, "laptop").await?;
/// let status = ItemStatus::create(&pool, "new").await?;
/// let item = Item::create(&pool, name.id, status.id, 10).await?;
///
/// let all = Item::list(&pool, None, &[]).await?;
/// assert_eq!(all.len(), 1);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Canonical item name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ItemName {
    /// Unique name ID
    pub id: i64,

    /// The name string (unique)
    pub name: String,
}

/// Canonical item status label
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ItemStatus {
    /// Unique status ID
    pub id: i64,

    /// The status label (unique)
    pub name: String,
}

/// A catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    /// Unique item ID
    pub id: i64,

    /// Reference into `item_names`
    #[sqlx(rename = "name")]
    pub name_id: i64,

    /// Reference into `item_statuses`
    #[sqlx(rename = "status")]
    pub status_id: i64,

    /// Total available quantity (stored as given)
    pub quantity: i64,
}

impl ItemName {
    /// Inserts a canonical item name
    pub async fn create(pool: &SqlitePool, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ItemName>(
            "INSERT INTO item_names (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Resolves a name string to its ID, if present
    pub async fn resolve(pool: &SqlitePool, name: &str) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM item_names WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|(id,)| id))
    }
}

impl ItemStatus {
    /// Inserts a canonical status label
    pub async fn create(pool: &SqlitePool, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ItemStatus>(
            "INSERT INTO item_statuses (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Resolves a status label to its ID, if present
    pub async fn resolve(pool: &SqlitePool, name: &str) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM item_statuses WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|(id,)| id))
    }
}

impl Item {
    /// Inserts a catalog entry
    ///
    /// Quantity is stored as given; the catalog never validates it against
    /// subsequent checkout activity.
    pub async fn create(
        pool: &SqlitePool,
        name_id: i64,
        status_id: i64,
        quantity: i64,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, status, quantity)
            VALUES (?, ?, ?)
            RETURNING id, name, status, quantity
            "#,
        )
        .bind(name_id)
        .bind(status_id)
        .bind(quantity)
        .fetch_one(pool)
        .await
    }

    /// Finds an item by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Item>("SELECT id, name, status, quantity FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lists catalog entries
    ///
    /// `name_filter = None` matches all names; `Some(id)` restricts the
    /// query to one name. The status set is applied as a post-filter over
    /// the query result, not pushed into the SQL; an empty set means no
    /// status restriction.
    pub async fn list(
        pool: &SqlitePool,
        name_filter: Option<i64>,
        status_filter: &[i64],
    ) -> Result<Vec<Self>, sqlx::Error> {
        let items = match name_filter {
            Some(name_id) => {
                sqlx::query_as::<_, Item>(
                    "SELECT id, name, status, quantity FROM items WHERE name = ? ORDER BY id",
                )
                .bind(name_id)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Item>(
                    "SELECT id, name, status, quantity FROM items ORDER BY id",
                )
                .fetch_all(pool)
                .await?
            }
        };

        if status_filter.is_empty() {
            return Ok(items);
        }

        Ok(items
            .into_iter()
            .filter(|item| status_filter.contains(&item.status_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    // Database-backed tests are in tests/checkout_tests.rs
}
