/// Inventory endpoints
///
/// Catalog listing plus the checkout ledger.
///
/// # Endpoints
///
/// - `GET /items` - Catalog listing, filterable by name and status IDs
/// - `POST /checkout` - Submit a checkout request (authenticated only)
/// - `GET /checkout` - The caller's checkout ledger (authenticated only)
///
/// Listing the catalog is open to anonymous callers; the checkout
/// endpoints require a resolved user because every ledger row references
/// a user ID.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use stockroom_shared::{
    auth::identity::Identity,
    models::{catalog::Item, checkout::CheckoutRequest},
};

/// Catalog listing filters
///
/// Both filters arrive as query-string values. `name` is a single item
/// name ID; `status` is a comma-separated list of status IDs. Omitting a
/// filter leaves that dimension unrestricted.
#[derive(Debug, Default, Deserialize)]
pub struct ItemFilters {
    /// Item name ID to restrict to
    pub name: Option<String>,

    /// Comma-separated status IDs to restrict to
    pub status: Option<String>,
}

/// Checkout submission body
#[derive(Debug, Deserialize)]
pub struct CheckoutSubmission {
    /// Catalog item ID
    pub id: i64,

    /// Requested quantity (must be positive)
    pub quantity: i64,
}

fn parse_name_filter(raw: Option<&str>) -> ApiResult<Option<i64>> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid name filter: {}", s))),
    }
}

fn parse_status_filter(raw: Option<&str>) -> ApiResult<Vec<i64>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid status filter: {}", s)))
        })
        .collect()
}

/// List catalog entries
///
/// # Endpoint
///
/// ```text
/// GET /items?name=3&status=1,2
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: a filter value is not a valid ID
pub async fn list_items(
    State(state): State<AppState>,
    Query(filters): Query<ItemFilters>,
) -> ApiResult<Json<Vec<Item>>> {
    let name_filter = parse_name_filter(filters.name.as_deref())?;
    let status_filter = parse_status_filter(filters.status.as_deref())?;

    let items = Item::list(&state.db, name_filter, &status_filter).await?;
    Ok(Json(items))
}

/// Submit a checkout request
///
/// Inserts a pending ledger row for the calling user. The item's catalog
/// quantity is neither checked nor decremented.
///
/// # Endpoint
///
/// ```text
/// POST /checkout
/// Content-Type: application/json
///
/// {"id": 3, "quantity": 2}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: anonymous caller, malformed body, non-positive
///   quantity, or unknown item ID
pub async fn submit_checkout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Result<Json<CheckoutSubmission>, JsonRejection>,
) -> ApiResult<Json<CheckoutRequest>> {
    let Some(user) = identity.user() else {
        return Err(ApiError::BadRequest(
            "Authentication required to checkout items".to_string(),
        ));
    };

    let Json(req) = body.map_err(|_| ApiError::BadRequest("Malformed request body".to_string()))?;

    if req.quantity <= 0 {
        return Err(ApiError::BadRequest(
            "Quantity must be positive".to_string(),
        ));
    }

    if Item::find_by_id(&state.db, req.id).await?.is_none() {
        return Err(ApiError::BadRequest(format!("No such item: {}", req.id)));
    }

    let checkout = CheckoutRequest::submit(&state.db, req.id, req.quantity, user.id).await?;

    tracing::info!(
        user_id = user.id,
        item_id = req.id,
        quantity = req.quantity,
        "Checkout request submitted"
    );

    Ok(Json(checkout))
}

/// List the caller's checkout ledger
///
/// Returns every request the calling user ever submitted, pending and
/// approved alike.
///
/// # Errors
///
/// - `400 Bad Request`: anonymous caller
pub async fn list_checkouts(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<CheckoutRequest>>> {
    let Some(user) = identity.user() else {
        return Err(ApiError::BadRequest(
            "Authentication required to view checkouts".to_string(),
        ));
    };

    let checkouts = CheckoutRequest::list_for_user(&state.db, user.id).await?;
    Ok(Json(checkouts))
}
