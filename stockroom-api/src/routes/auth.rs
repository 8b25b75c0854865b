/// Authentication endpoints
///
/// This module provides the registration, login, and logout endpoints,
/// plus a read-only view of the caller's resolved identity.
///
/// # Endpoints
///
/// - `POST /register` - Register a new user
/// - `POST /login` - Login; sets the `token` session cookie and redirects
/// - `POST /logout` - Clears the session cookie (client-side-only logout)
/// - `GET /me` - The caller's resolved identity (anonymous allowed)
///
/// # Session cookie
///
/// Login sets `token=<signed token>; Expires=<token expiry>; Path=/;
/// HttpOnly`. The `Expires` attribute mirrors the expiry inside the token.
/// Logout overwrites the cookie with an empty value expiring at the Unix
/// epoch; the token itself stays valid until its internal expiry, since
/// no server-side revocation exists.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_shared::{
    auth::{
        authenticator,
        identity::Identity,
        token::{encode_claims, Claims},
    },
    models::user::User,
};

/// Register request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Email address
    #[serde(default)]
    pub email: String,

    /// Password
    #[serde(default)]
    pub password: String,

    /// Password confirmation
    #[serde(default)]
    pub rpassword: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    pub email: String,

    /// Password
    #[serde(default)]
    pub password: String,
}

/// Current-identity response
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// Email ("Anonymous" when unauthenticated)
    pub email: String,

    /// Whether the request carried a valid session
    pub is_authenticated: bool,

    /// Role flags (all false for the anonymous identity)
    pub is_active: bool,
    pub is_admin: bool,
    pub is_superuser: bool,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        match identity.user() {
            Some(user) => Self {
                email: user.email.clone(),
                is_authenticated: true,
                is_active: user.is_active,
                is_admin: user.is_admin,
                is_superuser: user.is_superuser,
            },
            None => Self {
                email: "Anonymous".to_string(),
                is_authenticated: false,
                is_active: false,
                is_admin: false,
                is_superuser: false,
            },
        }
    }
}

/// Formats the session cookie set on login
fn session_cookie(token: &str, expires: DateTime<Utc>) -> String {
    format!(
        "token={}; Expires={}; Path=/; HttpOnly",
        token,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// The cleared session cookie set on logout
fn cleared_cookie() -> String {
    "token=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; HttpOnly".to_string()
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {"email": "user@example.com", "password": "pw", "rpassword": "pw"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field, malformed email, mismatched
///   confirmation, or email already registered
/// - `502 Bad Gateway`: unexpected persistence failure
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Redirect> {
    let Json(req) = body.map_err(|_| ApiError::BadRequest("Malformed request body".to_string()))?;

    if req.email.is_empty() {
        return Err(ApiError::BadRequest("Email is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }
    if req.rpassword.is_empty() {
        return Err(ApiError::BadRequest(
            "Password confirmation is required".to_string(),
        ));
    }

    let user = authenticator::register(
        &state.db,
        state.password_secret(),
        &req.email,
        &req.password,
        &req.rpassword,
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(Redirect::to("/"))
}

/// Login
///
/// Authenticates the user, issues a 24-hour session token, records the
/// login time, and sets the `token` cookie.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {"email": "user@example.com", "password": "pw"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field, unknown user, or wrong password
/// - `500 Internal Server Error`: token signing failure
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body.map_err(|_| ApiError::BadRequest("Malformed request body".to_string()))?;

    if req.email.is_empty() {
        return Err(ApiError::BadRequest("Email is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }

    let user = authenticator::login(
        &state.db,
        state.password_secret(),
        &req.email,
        &req.password,
    )
    .await?;

    let claims = Claims::new(&user.email);
    let token = encode_claims(&claims, state.token_secret())?;

    User::update_last_login(&state.db, user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");

    let cookie = session_cookie(&token, claims.expires_at().unwrap_or_default());
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")).into_response())
}

/// Logout
///
/// Clears the session cookie. This is client-side-only: the token stays
/// valid until its internal expiry.
pub async fn logout() -> Response {
    (
        AppendHeaders([(SET_COOKIE, cleared_cookie())]),
        Redirect::to("/login"),
    )
        .into_response()
}

/// Current identity
///
/// Returns the caller's resolved identity. Anonymous callers get the
/// anonymous identity, never an error.
pub async fn me(Extension(identity): Extension<Identity>) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(&identity))
}
