//! Product record and inventory status derivation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stock-level label derived from `quantity`, never settable by clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl InventoryStatus {
    /// quantity = 0 -> OUT_OF_STOCK, 1..=10 -> LOW_STOCK, >10 -> IN_STOCK.
    pub fn derive(quantity: u32) -> Self {
        match quantity {
            0 => Self::OutOfStock,
            1..=10 => Self::LowStock,
            _ => Self::InStock,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: u32,
    pub internal_reference: String,
    pub shell_id: i64,
    pub inventory_status: InventoryStatus,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Re-derives `inventory_status` from the current quantity. Called on
    /// every write that touches `quantity`, overriding client input.
    pub fn refresh_inventory_status(&mut self) {
        self.inventory_status = InventoryStatus::derive(self.quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_thresholds() {
        assert_eq!(InventoryStatus::derive(0), InventoryStatus::OutOfStock);
        assert_eq!(InventoryStatus::derive(1), InventoryStatus::LowStock);
        assert_eq!(InventoryStatus::derive(10), InventoryStatus::LowStock);
        assert_eq!(InventoryStatus::derive(11), InventoryStatus::InStock);
        assert_eq!(InventoryStatus::derive(500), InventoryStatus::InStock);
    }

    #[test]
    fn status_serializes_screaming() {
        let s = serde_json::to_string(&InventoryStatus::OutOfStock).unwrap();
        assert_eq!(s, "\"OUT_OF_STOCK\"");
    }
}
