//! Wishlist orchestration: membership toggles over a per-user document with
//! the same CAS write discipline as the cart.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Product, Wishlist};
use crate::error::{Result, StorefrontError};
use crate::store::{CatalogStore, StoreError, WishlistStore};

const MAX_WRITE_ATTEMPTS: u32 = 3;

/// Wishlist with members expanded to live product details.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub id: Uuid,
    pub user: Uuid,
    pub products: Vec<Product>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct WishlistService {
    catalog: Arc<dyn CatalogStore>,
    wishlists: Arc<dyn WishlistStore>,
}

impl WishlistService {
    pub fn new(catalog: Arc<dyn CatalogStore>, wishlists: Arc<dyn WishlistStore>) -> Self {
        Self { catalog, wishlists }
    }

    /// Returns the user's wishlist, creating an empty one on first access.
    pub async fn get(&self, user_id: Uuid) -> Result<WishlistView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            if let Some(wishlist) = self.wishlists.find_by_user(user_id).await? {
                return self.expand(wishlist).await;
            }
            match self.wishlists.save(Wishlist::new(user_id)).await {
                Ok(saved) => return self.expand(saved).await,
                Err(StoreError::VersionConflict) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    /// Idempotently adds a product; adding an already-present product is a
    /// no-op, not an error.
    pub async fn add_item(&self, user_id: Uuid, product_id: Uuid) -> Result<WishlistView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            if self.catalog.find_by_id(product_id).await?.is_none() {
                return Err(StorefrontError::ProductNotFound);
            }
            let mut wishlist = self
                .wishlists
                .find_by_user(user_id)
                .await?
                .unwrap_or_else(|| Wishlist::new(user_id));
            if !wishlist.add(product_id) && wishlist.version > 0 {
                return self.expand(wishlist).await;
            }
            match self.wishlists.save(wishlist).await {
                Ok(saved) => return self.expand(saved).await,
                Err(StoreError::VersionConflict) => {
                    tracing::debug!(user = %user_id, "wishlist add conflicted, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    /// Removes a product if present. Fails only when the wishlist itself is
    /// missing; an absent product is a silent no-op.
    pub async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<WishlistView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let mut wishlist = self
                .wishlists
                .find_by_user(user_id)
                .await?
                .ok_or(StorefrontError::WishlistNotFound)?;
            if !wishlist.remove(product_id) {
                return self.expand(wishlist).await;
            }
            match self.wishlists.save(wishlist).await {
                Ok(saved) => return self.expand(saved).await,
                Err(StoreError::VersionConflict) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    /// Empties the member set.
    pub async fn clear(&self, user_id: Uuid) -> Result<WishlistView> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let mut wishlist = self
                .wishlists
                .find_by_user(user_id)
                .await?
                .ok_or(StorefrontError::WishlistNotFound)?;
            wishlist.clear();
            match self.wishlists.save(wishlist).await {
                Ok(saved) => return self.expand(saved).await,
                Err(StoreError::VersionConflict) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::VersionConflict.into())
    }

    /// Members whose product vanished from the catalog are omitted from the
    /// expanded view.
    async fn expand(&self, wishlist: Wishlist) -> Result<WishlistView> {
        let mut products = Vec::with_capacity(wishlist.products.len());
        for product_id in &wishlist.products {
            if let Some(product) = self.catalog.find_by_id(*product_id).await? {
                products.push(product);
            }
        }
        Ok(WishlistView {
            id: wishlist.id,
            user: wishlist.user_id,
            products,
            created_at: wishlist.created_at,
            updated_at: wishlist.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::catalog::{CatalogService, NewProduct};
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;

    async fn setup() -> (WishlistService, CatalogService) {
        let store = Arc::new(MemoryStore::new());
        (
            WishlistService::new(store.clone(), store.clone()),
            CatalogService::new(store),
        )
    }

    async fn seed(catalog: &CatalogService, code: &str) -> Product {
        catalog
            .create(NewProduct {
                code: code.into(),
                name: code.into(),
                description: "test".into(),
                image: "x.png".into(),
                category: "test".into(),
                price: Decimal::new(999, 2),
                quantity: 20,
                internal_reference: format!("REF-{code}"),
                shell_id: 1,
                rating: 4.5,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn get_creates_empty_wishlist_lazily() {
        let (wishlists, _) = setup().await;
        let user = Uuid::new_v4();
        let view = wishlists.get(user).await.unwrap();
        assert!(view.products.is_empty());
        let again = wishlists.get(user).await.unwrap();
        assert_eq!(again.id, view.id);
    }

    #[tokio::test]
    async fn double_add_keeps_single_membership() {
        let (wishlists, catalog) = setup().await;
        let p = seed(&catalog, "P1").await;
        let user = Uuid::new_v4();
        wishlists.add_item(user, p.id).await.unwrap();
        let view = wishlists.add_item(user, p.id).await.unwrap();
        assert_eq!(view.products.len(), 1);
    }

    #[tokio::test]
    async fn add_unknown_product_is_not_found() {
        let (wishlists, _) = setup().await;
        let err = wishlists
            .add_item(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::ProductNotFound));
    }

    #[tokio::test]
    async fn remove_absent_product_succeeds() {
        let (wishlists, catalog) = setup().await;
        let p = seed(&catalog, "P1").await;
        let user = Uuid::new_v4();
        wishlists.add_item(user, p.id).await.unwrap();
        let view = wishlists.remove_item(user, Uuid::new_v4()).await.unwrap();
        assert_eq!(view.products.len(), 1);
    }

    #[tokio::test]
    async fn remove_without_wishlist_is_not_found() {
        let (wishlists, _) = setup().await;
        let err = wishlists
            .remove_item(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::WishlistNotFound));
    }

    #[tokio::test]
    async fn clear_without_wishlist_is_not_found() {
        let (wishlists, _) = setup().await;
        let err = wishlists.clear(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StorefrontError::WishlistNotFound));
    }

    #[tokio::test]
    async fn clear_empties_members() {
        let (wishlists, catalog) = setup().await;
        let user = Uuid::new_v4();
        for code in ["P1", "P2"] {
            let p = seed(&catalog, code).await;
            wishlists.add_item(user, p.id).await.unwrap();
        }
        let view = wishlists.clear(user).await.unwrap();
        assert!(view.products.is_empty());
    }
}
