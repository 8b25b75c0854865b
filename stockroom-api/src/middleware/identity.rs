/// Identity resolution middleware
///
/// Runs once per inbound request, before any handler: reads the `token`
/// cookie, resolves it through the shared identity resolver, and inserts
/// the result into request extensions. The layer never rejects a request
/// — resolution failures of any kind degrade to the anonymous identity,
/// and downstream handlers decide what anonymous callers may do.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use stockroom_shared::auth::identity::Identity;
///
/// async fn handler(Extension(identity): Extension<Identity>) -> String {
///     format!("Hello, {}!", identity.email())
/// }
/// ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use stockroom_shared::auth::identity::resolve_identity;

use crate::app::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Extracts the session token from the request's Cookie headers
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            continue;
        };

        for pair in raw.split(';') {
            if let Some(token) = pair.trim().strip_prefix("token=") {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Resolves the caller's identity and attaches it to the request
///
/// Every route is behind this layer; handlers extract the result with
/// `Extension<Identity>`.
pub async fn resolve_identity_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = session_token(req.headers());
    let identity = resolve_identity(&state.db, token.as_deref(), state.token_secret()).await;

    req.extensions_mut().insert(identity);
    next.run(req).await
}
