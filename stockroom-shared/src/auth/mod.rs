/// Authentication utilities for Stockroom
///
/// This module provides the credential and session subsystem:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing with a server-wide pepper
/// - [`token`]: signed session tokens (HS256, fixed 24-hour lifetime)
/// - [`authenticator`]: registration and login flows over the credential store
/// - [`identity`]: per-request resolution of the session cookie into an
///   anonymous or authenticated identity
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with per-call random salt; the plaintext
///   is concatenated with a server-wide secret before hashing, so a leaked
///   hash database cannot be cracked offline without the secret
/// - **Session Tokens**: HS256-signed claims (email + absolute expiry),
///   stateless — no server-side session table and no revocation list
/// - **Constant-time Comparison**: password verification is constant-time
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::auth::password::{hash_password, verify_password};
/// use stockroom_shared::auth::token::{issue_token, decode_token};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password", "server-pepper")?;
/// assert!(verify_password("user_password", "server-pepper", &hash));
///
/// let token = issue_token("user@example.com", "signing-key")?;
/// let claims = decode_token(&token, "signing-key")?;
/// assert_eq!(claims.email, "user@example.com");
/// # Ok(())
/// # }
/// ```

pub mod authenticator;
pub mod identity;
pub mod password;
pub mod token;
