//! Item Endpoints
//!
//! Each operation declares its own access policy:
//! - GET /{id} - Public
//! - POST / - Authenticated (caller becomes the owner)
//! - PUT /{id} - Owner-or-admin
//! - DELETE /{id} - Owner-or-admin

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::item::entity::{Item, NewItem};
use crate::item::repository::ItemStore;
use crate::shared::api_common::SuccessResponse;
use crate::shared::error::MarketError;
use crate::shared::guard::checks;
use crate::shared::middleware::{Authenticated, OptionalAuth};

/// Listing creation request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
}

/// Listing update request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
}

/// Items API state
#[derive(Clone)]
pub struct ItemsApiState {
    pub item_store: Arc<dyn ItemStore>,
}

/// Get a listing by id
///
/// Public; no principal required.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "items",
    operation_id = "getItem",
    responses(
        (status = 200, description = "The listing", body = Item),
        (status = 404, description = "No such listing")
    )
)]
pub async fn get_item(
    State(state): State<ItemsApiState>,
    viewer: OptionalAuth,
    Path(id): Path<String>,
) -> Result<Json<Item>, MarketError> {
    let item = state
        .item_store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| MarketError::not_found("Item", &id))?;

    // An invalid token reads as anonymous here; only the write paths reject.
    if let Some(viewer) = viewer.as_ref() {
        tracing::debug!(item_id = %item.id, viewer_id = %viewer.user_id, "Listing viewed");
    }

    Ok(Json(item))
}

/// Create a listing
///
/// Requires authentication; the caller becomes the listing's owner.
#[utoipa::path(
    post,
    path = "",
    tag = "items",
    operation_id = "postItem",
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "Created listing", body = Item),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_item(
    State(state): State<ItemsApiState>,
    auth: Authenticated,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<Item>, MarketError> {
    let item = state
        .item_store
        .save(NewItem {
            title: req.title,
            description: req.description,
            price_cents: req.price_cents,
            owner_id: auth.user_id.clone(),
        })
        .await?;
    Ok(Json(item))
}

/// Update a listing
///
/// Owner-or-admin: authentication is checked by the extractor first, then
/// ownership against the stored listing.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "items",
    operation_id = "putItem",
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Updated listing", body = Item),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No such listing")
    )
)]
pub async fn update_item(
    State(state): State<ItemsApiState>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<Item>, MarketError> {
    let mut item = state
        .item_store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| MarketError::not_found("Item", &id))?;

    checks::require_owner_or_admin(&auth, &item.owner_id)?;

    item.title = req.title;
    item.description = req.description;
    item.price_cents = req.price_cents;
    state.item_store.update(item.clone()).await?;

    Ok(Json(item))
}

/// Delete a listing
///
/// Owner-or-admin.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "items",
    operation_id = "deleteItem",
    responses(
        (status = 200, description = "Listing deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No such listing")
    )
)]
pub async fn delete_item(
    State(state): State<ItemsApiState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, MarketError> {
    let item = state
        .item_store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| MarketError::not_found("Item", &id))?;

    checks::require_owner_or_admin(&auth, &item.owner_id)?;

    state.item_store.delete(&item.id).await?;
    Ok(Json(SuccessResponse::with_message("Item deleted successfully")))
}

/// Create the items router
pub fn items_router(state: ItemsApiState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_item))
        .routes(routes!(create_item))
        .routes(routes!(update_item))
        .routes(routes!(delete_item))
        .with_state(state)
}
