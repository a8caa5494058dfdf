//! Product catalog routes. Reads are open to any authenticated user;
//! mutations require the admin user.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::Product;
use crate::error::Result;
use crate::http::{AppState, AuthUser, ValidatedJson};
use crate::service::{NewProduct, ProductPatch};

pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog.list().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog.get(id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    user.require_admin()?;
    let product = state.catalog.create(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ProductPatch>,
) -> Result<Json<Product>> {
    user.require_admin()?;
    Ok(Json(state.catalog.update(id, req).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>> {
    user.require_admin()?;
    state.catalog.delete(id).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
