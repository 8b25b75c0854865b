/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use stockroom_api::{app::AppState, config::Config};
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(pool, config);
/// let app = stockroom_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning. Both secrets are read-only
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Server-wide pepper for password hashing
    pub fn password_secret(&self) -> &str {
        &self.config.auth.password_secret
    }

    /// Signing key for session tokens
    pub fn token_secret(&self) -> &str {
        &self.config.auth.token_secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /            # Current identity (same as /me)
/// ├── GET  /health      # Health check
/// ├── POST /register    # Register a new user
/// ├── POST /login       # Login; sets the `token` session cookie
/// ├── POST /logout      # Clears the session cookie
/// ├── GET  /me          # Current identity (anonymous allowed)
/// ├── GET  /items       # Catalog listing with name/status filters
/// ├── POST /checkout    # Submit a checkout request
/// └── GET  /checkout    # The caller's checkout ledger
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Identity resolution — every request passes through the resolver,
///    which turns the `token` cookie into an `Identity` extension and
///    never rejects
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/", get(routes::auth::me))
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/me", get(routes::auth::me))
        .route("/items", get(routes::inventory::list_items))
        .route(
            "/checkout",
            post(routes::inventory::submit_checkout).get(routes::inventory::list_checkouts),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::identity::resolve_identity_layer,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
