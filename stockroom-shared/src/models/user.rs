/// User model and credential store operations
///
/// This module provides the User model backing registration, login, and
/// per-request identity resolution.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     email       TEXT NOT NULL UNIQUE,
///     password    TEXT NOT NULL,
///     isActive    BOOLEAN NOT NULL DEFAULT FALSE,
///     isAdmin     BOOLEAN NOT NULL DEFAULT FALSE,
///     isSuperuser BOOLEAN NOT NULL DEFAULT FALSE,
///     last_login  DATETIME,
///     created_at  DATETIME NOT NULL
/// );
/// ```
///
/// Emails are compared as stored (case-sensitive). Users are never
/// physically deleted; the only mutation after creation is the last-login
/// timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User account with role flags
///
/// `is_authenticated` is derived, never persisted: it is false everywhere
/// except on a user returned by a successful login or identity resolution.
/// The password hash is opaque to callers and excluded from serialization.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Stable numeric ID, assigned at creation and never reused
    pub id: i64,

    /// Email address (unique, case-sensitive as stored)
    pub email: String,

    /// Peppered Argon2id hash; never logged or returned to clients
    #[sqlx(rename = "password")]
    #[serde(skip)]
    pub password_hash: String,

    /// Account activation flag (defaults to false on registration)
    #[sqlx(rename = "isActive")]
    pub is_active: bool,

    /// Administrator flag
    #[sqlx(rename = "isAdmin")]
    pub is_admin: bool,

    /// Superuser flag
    #[sqlx(rename = "isSuperuser")]
    pub is_superuser: bool,

    /// Derived flag, set only by login and identity resolution
    #[sqlx(default)]
    #[serde(default)]
    pub is_authenticated: bool,

    /// When the user last logged in (None if never logged in)
    pub last_login: Option<DateTime<Utc>>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user row
    ///
    /// Role flags take their schema defaults (all false) and `last_login`
    /// starts NULL. A freshly registered user is therefore not active.
    ///
    /// # Errors
    ///
    /// Returns a database error if the email already exists (unique
    /// constraint violation) or the connection fails. The caller is
    /// expected to translate the unique violation rather than trusting a
    /// prior existence check.
    pub async fn create(
        pool: &SqlitePool,
        email: &str,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, created_at)
            VALUES (?, ?, ?)
            RETURNING id, email, password, isActive, isAdmin, isSuperuser, last_login, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Lookup is case-sensitive, matching the stored value exactly.
    pub async fn find_by_email(
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, isActive, isAdmin, isSuperuser, last_login, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, isActive, isAdmin, isSuperuser, last_login, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates the last login timestamp for a user
    ///
    /// Called after successful authentication.
    ///
    /// # Returns
    ///
    /// True if the user was found and updated, false otherwise
    pub async fn update_last_login(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
