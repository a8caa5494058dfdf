//! HTTP surface: router, shared state, auth extractor, and validated JSON
//! extraction.

pub mod auth;
pub mod cart;
pub mod products;
pub mod wishlist;

use std::sync::Arc;

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;
use validator::Validate;

use crate::error::StorefrontError;
use crate::service::{CartService, CatalogService, WishlistService};
use crate::store::{CartStore, CatalogStore, WishlistStore};

pub use auth::AuthUser;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub carts: CartService,
    pub wishlists: WishlistService,
    pub admin_user: Option<Uuid>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        carts: Arc<dyn CartStore>,
        wishlists: Arc<dyn WishlistStore>,
        admin_user: Option<Uuid>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(catalog.clone()),
            carts: CartService::new(catalog.clone(), carts),
            wishlists: WishlistService::new(catalog, wishlists),
            admin_user,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(products::list_products).post(products::create_product))
        .route(
            "/products/:id",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/cart", get(cart::get_cart))
        .route("/cart/add", post(cart::add_to_cart))
        .route("/cart/update", patch(cart::update_cart))
        .route("/cart/remove/:product_id", delete(cart::remove_from_cart))
        .route("/cart/clear", delete(cart::clear_cart))
        .route("/wishlist", get(wishlist::get_wishlist))
        .route("/wishlist/add", post(wishlist::add_to_wishlist))
        .route(
            "/wishlist/remove/:product_id",
            delete(wishlist::remove_from_wishlist),
        )
        .route("/wishlist/clear", delete(wishlist::clear_wishlist))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "storefront" }))
}

/// JSON body extraction that reports malformed input and failed field rules
/// as a 400 validation error, before any store access.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = StorefrontError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| StorefrontError::Validation(e.body_text()))?;
        value
            .validate()
            .map_err(|e| StorefrontError::Validation(e.to_string()))?;
        Ok(Self(value))
    }
}
