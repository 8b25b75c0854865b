/// Password hashing module using Argon2id
///
/// Passwords are hashed with Argon2id after being concatenated with a
/// server-wide secret (a "pepper"). The pepper lives outside the database,
/// so an exfiltrated credential store cannot be brute-forced offline
/// without also recovering the secret.
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 19 MiB (19456 KB)
/// - **Iterations**: 2 passes
/// - **Parallelism**: 1 lane
/// - **Salt**: 16 bytes random per call, embedded in the PHC output
///
/// The cost parameters target interactive login latency (on the order of
/// 100ms per call on commodity hardware). They are encoded into the hash
/// string, so they can be raised later without invalidating stored hashes.
///
/// # Example
///
/// ```
/// use stockroom_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password", "server-pepper")?;
///
/// assert!(verify_password("super_secret_password", "server-pepper", &hash));
/// assert!(!verify_password("wrong_password", "server-pepper", &hash));
/// assert!(!verify_password("super_secret_password", "wrong-pepper", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Appends the server-wide secret to the plaintext before hashing.
fn peppered(password: &str, secret: &str) -> Vec<u8> {
    let mut input = Vec::with_capacity(password.len() + secret.len());
    input.extend_from_slice(password.as_bytes());
    input.extend_from_slice(secret.as_bytes());
    input
}

/// Hashes a password using Argon2id with a server-wide pepper
///
/// # Arguments
///
/// * `password` - The plaintext password to hash
/// * `secret` - The server-wide secret appended to the plaintext
///
/// # Returns
///
/// PHC string format hash (includes algorithm, parameters, salt, and hash)
///
/// Example output:
/// ```text
/// $argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::HashError` only on catastrophic failure
/// (parameter construction or entropy-source failure).
pub fn hash_password(password: &str, secret: &str) -> Result<String, PasswordError> {
    // Random salt per call from the OS RNG
    let salt = SaltString::generate(&mut OsRng);

    // Moderate interactive-login work factor
    let params = ParamsBuilder::new()
        .m_cost(19456) // 19 MiB
        .t_cost(2)     // 2 iterations
        .p_cost(1)     // 1 lane
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(&peppered(password, secret), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Comparison is constant-time. This function never fails: a malformed
/// stored hash, a wrong password, or a wrong pepper all return `false`.
///
/// # Arguments
///
/// * `password` - The plaintext password to verify
/// * `secret` - The server-wide secret appended before hashing
/// * `hash` - The stored password hash (PHC string format)
///
/// # Example
///
/// ```
/// use stockroom_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct_password", "pepper")?;
///
/// assert!(verify_password("correct_password", "pepper", &hash));
/// assert!(!verify_password("wrong_password", "pepper", &hash));
/// assert!(!verify_password("correct_password", "pepper", "not-a-hash"));
/// # Ok(())
/// # }
/// ```
pub fn verify_password(password: &str, secret: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    // Parameters are embedded in the hash string
    Argon2::default()
        .verify_password(&peppered(password, secret), &parsed_hash)
        .is_ok()
}
