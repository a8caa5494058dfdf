//! Catalog management: product CRUD with server-side inventory-status
//! derivation.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{InventoryStatus, Product};
use crate::error::{Result, StorefrontError};
use crate::store::CatalogStore;

/// Client-supplied `inventoryStatus` is not part of these commands; the
/// status is always re-derived from `quantity` on the server.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub price: Decimal,
    pub quantity: u32,
    #[validate(length(min = 1, message = "Internal reference is required"))]
    pub internal_reference: String,
    pub shell_id: i64,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
    pub internal_reference: Option<String>,
    pub shell_id: Option<i64>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Product> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(StorefrontError::ProductNotFound)
    }

    pub async fn create(&self, cmd: NewProduct) -> Result<Product> {
        if cmd.price < Decimal::ZERO {
            return Err(StorefrontError::Validation(
                "Price must be a non-negative number".into(),
            ));
        }
        if self.store.find_by_code(&cmd.code).await?.is_some() {
            return Err(StorefrontError::Validation(
                "Product code already exists".into(),
            ));
        }
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            code: cmd.code,
            name: cmd.name,
            description: cmd.description,
            image: cmd.image,
            category: cmd.category,
            price: cmd.price,
            quantity: cmd.quantity,
            internal_reference: cmd.internal_reference,
            shell_id: cmd.shell_id,
            inventory_status: InventoryStatus::derive(cmd.quantity),
            rating: cmd.rating,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(product.clone()).await?;
        Ok(product)
    }

    pub async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product> {
        if matches!(patch.price, Some(p) if p < Decimal::ZERO) {
            return Err(StorefrontError::Validation(
                "Price must be a non-negative number".into(),
            ));
        }
        // Codes stay unique across the catalog; a patch may not take over
        // another product's code.
        if let Some(ref code) = patch.code {
            if let Some(other) = self.store.find_by_code(code).await? {
                if other.id != id {
                    return Err(StorefrontError::Validation(
                        "Product code already exists".into(),
                    ));
                }
            }
        }
        let mut product = self.get(id).await?;
        let ProductPatch {
            code,
            name,
            description,
            image,
            category,
            price,
            quantity,
            internal_reference,
            shell_id,
            rating,
        } = patch;
        if let Some(code) = code {
            product.code = code;
        }
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(description) = description {
            product.description = description;
        }
        if let Some(image) = image {
            product.image = image;
        }
        if let Some(category) = category {
            product.category = category;
        }
        if let Some(price) = price {
            product.price = price;
        }
        if let Some(quantity) = quantity {
            product.quantity = quantity;
        }
        if let Some(internal_reference) = internal_reference {
            product.internal_reference = internal_reference;
        }
        if let Some(shell_id) = shell_id {
            product.shell_id = shell_id;
        }
        if let Some(rating) = rating {
            product.rating = rating;
        }
        product.refresh_inventory_status();
        product.updated_at = Utc::now();
        if !self.store.update(product.clone()).await? {
            return Err(StorefrontError::ProductNotFound);
        }
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(StorefrontError::ProductNotFound);
        }
        Ok(())
    }
}
