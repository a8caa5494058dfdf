//! Cart orchestration: each operation is one read-modify-write cycle against
//! the user's cart document, with the total price re-derived from live
//! catalog prices before the write.
//!
//! Writes go through the store's compare-and-swap; on a version conflict the
//! whole cycle is re-run from a fresh read, so a concurrent mutation can
//! never be silently overwritten and a retried increment cannot
//! double-apply. Store failures other than conflicts surface as-is.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Cart, LineItem, Product};
use crate::error::{Result, StorefrontError};
use crate::store::{CartStore, CatalogStore, StoreError};

const MAX_WRITE_ATTEMPTS: u32 = 3;

/// Cart with line items expanded to live product details.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: Uuid,
    pub user: Uuid,
    pub items: Vec<CartItemView>,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub product: Product,
    pub quantity: u32,
}

#[derive(Clone)]
pub struct CartService {
    catalog: Arc<dyn CatalogStore>,
    carts: Arc<dyn CartStore>,
}

impl CartService {
    pub fn new(catalog: Arc<dyn CatalogStore>, carts: Arc<dyn CartStore>) -> Self {
        Self { catalog, carts }
    }

    /// Returns the user's cart, creating an empty one on first access.
    pub async fn get(&self, user_id: Uuid) -> Result<CartView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            if let Some(cart) = self.carts.find_by_user(user_id).await? {
                return self.expand(cart).await;
            }
            match self.carts.save(Cart::new(user_id)).await {
                Ok(saved) => return self.expand(saved).await,
                // Lost the creation race; the winner's cart is there now.
                Err(StoreError::VersionConflict) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    /// Adds `quantity` of a product, merging with any existing line item.
    /// The stock check is against the total desired quantity: what is
    /// already in the cart plus the requested amount.
    pub async fn add_item(&self, user_id: Uuid, product_id: Uuid, quantity: u32) -> Result<CartView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let product = self
                .catalog
                .find_by_id(product_id)
                .await?
                .ok_or(StorefrontError::ProductNotFound)?;
            let mut cart = self
                .carts
                .find_by_user(user_id)
                .await?
                .unwrap_or_else(|| Cart::new(user_id));
            let desired = cart.quantity_of(product_id).saturating_add(quantity);
            if desired > product.quantity {
                return Err(StorefrontError::InsufficientStock);
            }
            cart.add_item(product_id, quantity);
            let products = self.products_for(&cart.items).await?;
            cart.recompute_total(|id| products.get(&id).map(|p| p.price));
            match self.carts.save(cart).await {
                Ok(saved) => return Ok(Self::view(saved, &products)),
                Err(StoreError::VersionConflict) => {
                    tracing::debug!(user = %user_id, "cart add conflicted, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    /// Replaces an existing line item's quantity with the given value.
    pub async fn update_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> Result<CartView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let product = self
                .catalog
                .find_by_id(product_id)
                .await?
                .ok_or(StorefrontError::ProductNotFound)?;
            if quantity > product.quantity {
                return Err(StorefrontError::InsufficientStock);
            }
            let mut cart = self
                .carts
                .find_by_user(user_id)
                .await?
                .ok_or(StorefrontError::CartNotFound)?;
            if !cart.update_item(product_id, quantity) {
                return Err(StorefrontError::ItemNotInCart);
            }
            let products = self.products_for(&cart.items).await?;
            cart.recompute_total(|id| products.get(&id).map(|p| p.price));
            match self.carts.save(cart).await {
                Ok(saved) => return Ok(Self::view(saved, &products)),
                Err(StoreError::VersionConflict) => {
                    tracing::debug!(user = %user_id, "cart update conflicted, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    /// Removes a line item. Fails only when the cart itself is missing; an
    /// absent item is a silent no-op.
    pub async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<CartView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let mut cart = self
                .carts
                .find_by_user(user_id)
                .await?
                .ok_or(StorefrontError::CartNotFound)?;
            cart.remove_item(product_id);
            let products = self.products_for(&cart.items).await?;
            cart.recompute_total(|id| products.get(&id).map(|p| p.price));
            match self.carts.save(cart).await {
                Ok(saved) => return Ok(Self::view(saved, &products)),
                Err(StoreError::VersionConflict) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    /// Empties the cart and resets the total to zero.
    pub async fn clear(&self, user_id: Uuid) -> Result<CartView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let mut cart = self
                .carts
                .find_by_user(user_id)
                .await?
                .ok_or(StorefrontError::CartNotFound)?;
            cart.clear();
            match self.carts.save(cart).await {
                Ok(saved) => return Ok(Self::view(saved, &HashMap::new())),
                Err(StoreError::VersionConflict) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    async fn expand(&self, cart: Cart) -> Result<CartView> {
        let products = self.products_for(&cart.items).await?;
        Ok(Self::view(cart, &products))
    }

    async fn products_for(&self, items: &[LineItem]) -> Result<HashMap<Uuid, Product>> {
        let mut products = HashMap::with_capacity(items.len());
        for item in items {
            if products.contains_key(&item.product_id) {
                continue;
            }
            if let Some(product) = self.catalog.find_by_id(item.product_id).await? {
                products.insert(item.product_id, product);
            }
        }
        Ok(products)
    }

    /// Line items whose product vanished from the catalog are omitted from
    /// the expanded view, matching their zero contribution to the total.
    fn view(cart: Cart, products: &HashMap<Uuid, Product>) -> CartView {
        let items = cart
            .items
            .iter()
            .filter_map(|item| {
                products.get(&item.product_id).map(|product| CartItemView {
                    product: product.clone(),
                    quantity: item.quantity,
                })
            })
            .collect();
        CartView {
            id: cart.id,
            user: cart.user_id,
            items,
            total_price: cart.total_price,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}
