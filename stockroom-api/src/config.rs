/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. The two secrets are immutable
/// process-lifetime state: the password pepper and the session-token
/// signing key are read once at startup and never rotated at runtime.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://stockroom.db)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `PASSWORD_SECRET`: server-wide pepper mixed into password hashes (required)
/// - `TOKEN_SECRET`: key for session-token signing (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
/// - `RUST_LOG`: log level (default: info)
///
/// # Example
///
/// ```no_run
/// use stockroom_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Secrets for password hashing and token signing
    pub auth: AuthConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Authentication secrets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Server-wide pepper appended to plaintext passwords before hashing
    ///
    /// IMPORTANT: must be kept secret and at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub password_secret: String,

    /// Secret key for session-token signing (HS256)
    pub token_secret: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required secret is missing or too short, or
    /// a numeric variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://stockroom.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let password_secret = env::var("PASSWORD_SECRET")
            .map_err(|_| anyhow::anyhow!("PASSWORD_SECRET environment variable is required"))?;

        let token_secret = env::var("TOKEN_SECRET")
            .map_err(|_| anyhow::anyhow!("TOKEN_SECRET environment variable is required"))?;

        if password_secret.len() < 32 {
            anyhow::bail!("PASSWORD_SECRET must be at least 32 characters long");
        }

        if token_secret.len() < 32 {
            anyhow::bail!("TOKEN_SECRET must be at least 32 characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig {
                password_secret,
                token_secret,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
