//! Persistence seam. The real document store is an external collaborator;
//! the traits here expose the find/save operations the services need, with
//! version-guarded writes for the per-user aggregates.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Cart, Product, Wishlist};

pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The document changed between read and write (lost-update race).
    #[error("version conflict")]
    VersionConflict,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only catalog access for the cart/wishlist core, plus the mutations
/// used by catalog management.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, StoreError>;
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
    async fn insert(&self, product: Product) -> Result<(), StoreError>;
    /// Replaces the stored product; returns `false` when the id is unknown.
    async fn update(&self, product: Product) -> Result<bool, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Cart documents, partitioned by user id. `save` is a compare-and-swap:
/// the write succeeds only if the stored version still equals
/// `cart.version` (0 meaning "no document yet"); the committed copy comes
/// back with the version bumped. Each save is one atomic document write.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Cart>, StoreError>;
    async fn save(&self, cart: Cart) -> Result<Cart, StoreError>;
}

/// Wishlist documents, same partitioning and CAS contract as [`CartStore`].
#[async_trait]
pub trait WishlistStore: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Wishlist>, StoreError>;
    async fn save(&self, wishlist: Wishlist) -> Result<Wishlist, StoreError>;
}
