/// Request identity resolution
///
/// Every inbound request is resolved to an identity before any handler
/// runs: either `Anonymous` or a fully loaded, authenticated user.
/// Resolution is total — it never surfaces an error to its caller. Any
/// failure along the way (missing cookie, bad signature, expired token,
/// token for an email that no longer resolves) degrades to `Anonymous`,
/// so every request can proceed to authorization checks.
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::auth::identity::{resolve_identity, Identity};
/// # use sqlx::SqlitePool;
/// # async fn example(pool: SqlitePool) {
/// let identity = resolve_identity(&pool, Some("garbage-token"), "signing-key").await;
/// assert!(!identity.is_authenticated());
/// assert_eq!(identity.email(), "Anonymous");
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::debug;

use super::token::decode_token;
use crate::models::user::User;

/// The resolved identity of a request
///
/// Either the anonymous identity (no valid session) or a known user with
/// `is_authenticated` set. There is no in-between: a decode failure or an
/// unknown email never yields a partially populated user.
#[derive(Debug, Clone)]
pub enum Identity {
    /// No valid session: email "Anonymous", all role flags false
    Anonymous,

    /// A fully loaded user with `is_authenticated = true`
    Known(User),
}

impl Identity {
    /// The identity's email ("Anonymous" when unauthenticated)
    pub fn email(&self) -> &str {
        match self {
            Identity::Anonymous => "Anonymous",
            Identity::Known(user) => &user.email,
        }
    }

    /// Whether this request carries a valid session for a known user
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Known(_))
    }

    /// The underlying user record, if authenticated
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::Known(user) => Some(user),
        }
    }
}

/// Resolves a session cookie value into an identity
///
/// Steps:
/// 1. no cookie -> `Anonymous`
/// 2. decode the token; any decode failure -> `Anonymous`
/// 3. look up the claimed email; unknown -> `Anonymous`, otherwise the
///    user with `is_authenticated = true`
///
/// Never mutates state and never returns an error. A database failure
/// during the lookup also degrades to `Anonymous` (logged at debug).
pub async fn resolve_identity(
    pool: &SqlitePool,
    cookie_value: Option<&str>,
    secret: &str,
) -> Identity {
    let token = match cookie_value {
        Some(token) => token,
        None => return Identity::Anonymous,
    };

    let claims = match decode_token(token, secret) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Session token rejected: {}", e);
            return Identity::Anonymous;
        }
    };

    match User::find_by_email(pool, &claims.email).await {
        Ok(Some(mut user)) => {
            user.is_authenticated = true;
            Identity::Known(user)
        }
        Ok(None) => Identity::Anonymous,
        Err(e) => {
            debug!("Identity lookup failed: {}", e);
            Identity::Anonymous
        }
    }
}
