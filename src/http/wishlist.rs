//! Wishlist routes.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::http::{AppState, AuthUser, ValidatedJson};
use crate::service::WishlistView;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub product_id: Uuid,
}

pub async fn get_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<WishlistView>> {
    Ok(Json(state.wishlists.get(user.id).await?))
}

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<AddToWishlistRequest>,
) -> Result<Json<WishlistView>> {
    let wishlist = state.wishlists.add_item(user.id, req.product_id).await?;
    Ok(Json(wishlist))
}

pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<WishlistView>> {
    let wishlist = state.wishlists.remove_item(user.id, product_id).await?;
    Ok(Json(wishlist))
}

pub async fn clear_wishlist(State(state): State<AppState>, user: AuthUser) -> Result<Json<Value>> {
    let wishlist = state.wishlists.clear(user.id).await?;
    Ok(Json(json!({
        "message": "Wishlist cleared successfully",
        "wishlist": wishlist,
    })))
}
