/// Registration and login flows
///
/// The authenticator orchestrates the credential store and the password
/// hasher, resolving each flow into a tagged result so callers branch on
/// error kind. Both flows are pure request/response: no retries, and no
/// partial effects on failure (registration either fully creates the row
/// or creates nothing).
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::auth::authenticator::{login, register, AuthError};
/// # use sqlx::SqlitePool;
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = register(&pool, "pepper", "alice@example.com", "pw123", "pw123").await?;
///
/// match login(&pool, "pepper", "alice@example.com", "wrong").await {
///     Err(AuthError::IncorrectPassword) => {}
///     other => panic!("expected IncorrectPassword, got {:?}", other.map(|u| u.id)),
/// }
/// # Ok(())
/// # }
/// ```

use regex::Regex;
use sqlx::SqlitePool;
use std::sync::OnceLock;
use tracing::warn;

use super::password::{hash_password, verify_password, PasswordError};
use crate::models::user::User;

/// Error type for registration and login
///
/// The first five variants are business-rule failures surfaced to the
/// caller; the last two are infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Email does not look like local@domain.tld
    #[error("Not a valid email address")]
    NotAnEmail,

    /// Email is already registered
    #[error("Email is already registered")]
    UserExists,

    /// No user with this email
    #[error("User not found")]
    UserNotExists,

    /// Password does not match the stored hash
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordsNotSame,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hash(#[from] PasswordError),

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// True for user-input/business-rule errors (400-class), false for
    /// infrastructure failures (500/502-class)
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            AuthError::NotAnEmail
                | AuthError::UserExists
                | AuthError::UserNotExists
                | AuthError::IncorrectPassword
                | AuthError::PasswordsNotSame
        )
    }
}

/// ASCII alnum local part, one or more dot-separated alphabetic domain labels
fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9]+@(?:[a-zA-Z]+\.)+[a-zA-Z]+$").expect("email pattern compiles")
    })
}

/// Registers a new user
///
/// Flow:
/// 1. `NotAnEmail` unless the email matches the local@domain.tld pattern
/// 2. `UserExists` if the email is already registered
/// 3. `PasswordsNotSame` if password and confirmation differ
/// 4. hash with the server-wide secret, insert, return the new user
///
/// The existence check in step 2 races with concurrent registrations, so
/// the unique constraint at insert time is authoritative: a unique
/// violation from the insert also surfaces as `UserExists`.
///
/// The new user's role flags are all false — a freshly registered user is
/// not active.
pub async fn register(
    pool: &SqlitePool,
    secret: &str,
    email: &str,
    password: &str,
    rpassword: &str,
) -> Result<User, AuthError> {
    if !email_regex().is_match(email) {
        return Err(AuthError::NotAnEmail);
    }

    if User::find_by_email(pool, email).await?.is_some() {
        return Err(AuthError::UserExists);
    }

    if password != rpassword {
        return Err(AuthError::PasswordsNotSame);
    }

    let password_hash = hash_password(password, secret)?;

    match User::create(pool, email, &password_hash).await {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            // Lost the race against a concurrent registration
            Err(AuthError::UserExists)
        }
        Err(e) => {
            warn!(email, "User creation failed: {}", e);
            Err(AuthError::Database(e))
        }
    }
}

/// Authenticates a user by email and password
///
/// Returns the user with the derived `is_authenticated` flag set; the
/// flag is never persisted.
///
/// # Errors
///
/// - `UserNotExists` if no user has this email
/// - `IncorrectPassword` if verification fails
pub async fn login(
    pool: &SqlitePool,
    secret: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let mut user = User::find_by_email(pool, email)
        .await?
        .ok_or(AuthError::UserNotExists)?;

    if !verify_password(password, secret, &user.password_hash) {
        return Err(AuthError::IncorrectPassword);
    }

    user.is_authenticated = true;
    Ok(user)
}
