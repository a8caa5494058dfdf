//! In-memory document store. Stands in for the external store in the demo
//! server and the tests; honors the same per-document CAS contract a real
//! backend would provide through a conditional update.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Cart, Product, Wishlist};
use crate::store::{CartStore, CatalogStore, StoreError, WishlistStore};

#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<HashMap<Uuid, Product>>,
    carts: RwLock<HashMap<Uuid, Cart>>,
    wishlists: RwLock<HashMap<Uuid, Wishlist>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, StoreError> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .find(|p| p.code == code)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self.products.read().await.values().cloned().collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(products)
    }

    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        self.products.write().await.insert(product.id, product);
        Ok(())
    }

    async fn update(&self, product: Product) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(slot) => {
                *slot = product;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.read().await.get(&user_id).cloned())
    }

    async fn save(&self, mut cart: Cart) -> Result<Cart, StoreError> {
        let mut carts = self.carts.write().await;
        let current = carts.get(&cart.user_id).map(|c| c.version).unwrap_or(0);
        if current != cart.version {
            return Err(StoreError::VersionConflict);
        }
        cart.version += 1;
        carts.insert(cart.user_id, cart.clone());
        Ok(cart)
    }
}

#[async_trait]
impl WishlistStore for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Wishlist>, StoreError> {
        Ok(self.wishlists.read().await.get(&user_id).cloned())
    }

    async fn save(&self, mut wishlist: Wishlist) -> Result<Wishlist, StoreError> {
        let mut wishlists = self.wishlists.write().await;
        let current = wishlists
            .get(&wishlist.user_id)
            .map(|w| w.version)
            .unwrap_or(0);
        if current != wishlist.version {
            return Err(StoreError::VersionConflict);
        }
        wishlist.version += 1;
        wishlists.insert(wishlist.user_id, wishlist.clone());
        Ok(wishlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cart_save_bumps_version() {
        let store = MemoryStore::new();
        let cart = Cart::new(Uuid::new_v4());
        let saved = CartStore::save(&store, cart).await.unwrap();
        assert_eq!(saved.version, 1);
        let again = CartStore::save(&store, saved).await.unwrap();
        assert_eq!(again.version, 2);
    }

    #[tokio::test]
    async fn stale_cart_save_conflicts() {
        let store = MemoryStore::new();
        let cart = Cart::new(Uuid::new_v4());
        let stale = cart.clone();
        CartStore::save(&store, cart).await.unwrap();
        assert!(matches!(
            CartStore::save(&store, stale).await,
            Err(StoreError::VersionConflict)
        ));
    }
}
