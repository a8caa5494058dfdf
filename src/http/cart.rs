//! Cart routes.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::http::{AppState, AuthUser, ValidatedJson};
use crate::service::CartView;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

pub async fn get_cart(State(state): State<AppState>, user: AuthUser) -> Result<Json<CartView>> {
    Ok(Json(state.carts.get(user.id).await?))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let cart = state
        .carts
        .add_item(user.id, req.product_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

pub async fn update_cart(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let cart = state
        .carts
        .update_item(user.id, req.product_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<CartView>> {
    Ok(Json(state.carts.remove_item(user.id, product_id).await?))
}

pub async fn clear_cart(State(state): State<AppState>, user: AuthUser) -> Result<Json<Value>> {
    let cart = state.carts.clear(user.id).await?;
    Ok(Json(json!({
        "message": "Cart cleared successfully",
        "cart": cart,
    })))
}
