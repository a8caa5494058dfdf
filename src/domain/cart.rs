//! Cart aggregate: per-user line items plus a cached total price.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// One cart per user, created lazily on first access and never deleted.
/// `total_price` is a cached derived value; callers must recompute it through
/// [`Cart::recompute_total`] whenever line items change.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<LineItem>,
    pub total_price: Decimal,
    /// Document version for compare-and-swap writes; 0 means not yet persisted.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            items: vec![],
            total_price: Decimal::ZERO,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn quantity_of(&self, product_id: Uuid) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Merges into an existing line item or appends a new one. A product
    /// appears at most once among the items.
    pub fn add_item(&mut self, product_id: Uuid, quantity: u32) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem { product_id, quantity });
        }
        self.touch();
    }

    /// Replaces the quantity of an existing line item. Returns `false` when
    /// the product is not in the cart.
    pub fn update_item(&mut self, product_id: Uuid, quantity: u32) -> bool {
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Removes the line item if present. Removing an absent item is a no-op,
    /// not an error; returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total_price = Decimal::ZERO;
        self.touch();
    }

    /// Re-derives `total_price` from live catalog prices via `price_of`.
    pub fn recompute_total<F>(&mut self, price_of: F)
    where
        F: Fn(Uuid) -> Option<Decimal>,
    {
        self.total_price = compute_total(&self.items, price_of);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Sums price x quantity across line items. Items whose product no longer
/// resolves in the catalog contribute nothing.
pub fn compute_total<F>(items: &[LineItem], price_of: F) -> Decimal
where
    F: Fn(Uuid) -> Option<Decimal>,
{
    items.iter().fold(Decimal::ZERO, |acc, item| {
        match price_of(item.product_id) {
            Some(price) => acc + price * Decimal::from(item.quantity),
            None => acc,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn add_merges_same_product() {
        let p = Uuid::new_v4();
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(p, 2);
        cart.add_item(p, 3);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn update_replaces_quantity() {
        let p = Uuid::new_v4();
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(p, 2);
        assert!(cart.update_item(p, 7));
        assert_eq!(cart.items[0].quantity, 7);
        assert!(!cart.update_item(Uuid::new_v4(), 1));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(Uuid::new_v4(), 1);
        assert!(!cart.remove_item(Uuid::new_v4()));
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn compute_total_sums_price_times_quantity() {
        let (p1, p2) = (Uuid::new_v4(), Uuid::new_v4());
        let prices: HashMap<Uuid, Decimal> = [
            (p1, Decimal::new(1000, 2)), // 10.00
            (p2, Decimal::new(500, 2)),  // 5.00
        ]
        .into_iter()
        .collect();
        let items = vec![
            LineItem { product_id: p1, quantity: 2 },
            LineItem { product_id: p2, quantity: 3 },
        ];
        let total = compute_total(&items, |id| prices.get(&id).copied());
        assert_eq!(total, Decimal::new(3500, 2)); // 35.00
    }

    #[test]
    fn compute_total_skips_vanished_products() {
        let p = Uuid::new_v4();
        let items = vec![LineItem { product_id: p, quantity: 4 }];
        assert_eq!(compute_total(&items, |_| None), Decimal::ZERO);
    }

    #[test]
    fn clear_resets_total() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(Uuid::new_v4(), 2);
        cart.total_price = Decimal::new(100, 0);
        cart.clear();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_price, Decimal::ZERO);
    }
}
