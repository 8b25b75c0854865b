/// Session token codec
///
/// Issues and verifies the signed session tokens carried in the `token`
/// cookie. A token is an HS256-signed claims structure holding the user's
/// email and an absolute expiry timestamp; the server keeps no session
/// table, so possession of a valid token is the entire session state.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Lifetime**: fixed 24 hours from issuance, not sliding
/// - **Tamper evidence**: any modification to claims or signature fails
///   verification
/// - **No revocation**: logout only clears the client cookie; a stolen
///   token remains valid until its expiry
///
/// # Example
///
/// ```
/// use stockroom_shared::auth::token::{issue_token, decode_token};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "signing-key-at-least-32-bytes-long!!";
/// let token = issue_token("user@example.com", secret)?;
///
/// let claims = decode_token(&token, secret)?;
/// assert_eq!(claims.email, "user@example.com");
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Fixed session lifetime: 24 hours from issuance.
pub const SESSION_LIFETIME_HOURS: i64 = 24;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to sign token
    #[error("Failed to sign token: {0}")]
    SignError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature mismatch or malformed structure
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Session token claims
///
/// The token carries only the user's email and an absolute expiry; the
/// full user record is re-read from the credential store on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated user
    pub email: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring 24 hours from now
    pub fn new(email: impl Into<String>) -> Self {
        Self::with_expiry(email, Utc::now() + Duration::hours(SESSION_LIFETIME_HOURS))
    }

    /// Creates claims with an explicit expiry timestamp
    pub fn with_expiry(email: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            exp: expires_at.timestamp(),
        }
    }

    /// The absolute expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a session token
///
/// # Errors
///
/// Returns `TokenError::SignError` if encoding fails
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| TokenError::SignError(format!("Token encoding failed: {}", e)))
}

/// Issues a session token for an email, expiring in 24 hours
///
/// # Example
///
/// ```
/// use stockroom_shared::auth::token::issue_token;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let token = issue_token("user@example.com", "signing-key")?;
/// assert!(!token.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn issue_token(email: &str, secret: &str) -> Result<String, TokenError> {
    encode_claims(&Claims::new(email), secret)
}

/// Decodes and validates a session token
///
/// Verifies the signature and the expiry; never panics.
///
/// # Errors
///
/// - `TokenError::Expired` if the expiry is in the past
/// - `TokenError::Invalid` on signature mismatch or malformed structure
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    // The 24-hour lifetime is absolute; no grace window
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-key-at-least-32-bytes";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("user@example.com");

        assert_eq!(claims.email, "user@example.com");
        assert!(!claims.is_expired());

        let lifetime = claims.exp - Utc::now().timestamp();
        assert!(lifetime > 23 * 3600);
        assert!(lifetime <= 24 * 3600);
    }

    #[test]
    fn test_issue_and_decode_token() {
        let token = issue_token("user@example.com", SECRET).expect("Should issue token");

        let claims = decode_token(&token, SECRET).expect("Should decode token");
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_roundtrip_preserves_claims_exactly() {
        let claims = Claims::new("alice@example.com");
        let token = encode_claims(&claims, SECRET).expect("Should encode");

        let decoded = decode_token(&token, SECRET).expect("Should decode");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let token = issue_token("user@example.com", SECRET).expect("Should issue token");

        let result = decode_token(&token, "a-completely-different-secret-key");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let claims = Claims::with_expiry("user@example.com", Utc::now() - Duration::hours(1));
        assert!(claims.is_expired());

        let token = encode_claims(&claims, SECRET).expect("Should encode");
        let result = decode_token(&token, SECRET);

        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_decode_tampered_token() {
        let token = issue_token("user@example.com", SECRET).expect("Should issue token");

        // Altering any single byte must fail verification
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(decode_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_decode_malformed_token() {
        assert!(decode_token("", SECRET).is_err());
        assert!(decode_token("not-a-token", SECRET).is_err());
        assert!(decode_token("a.b.c", SECRET).is_err());
    }
}
