//! Wishlist aggregate: per-user set of product references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One wishlist per user, created lazily and never deleted. Membership is a
/// set; insertion order is kept for display.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub id: Uuid,
    pub user_id: Uuid,
    pub products: Vec<Uuid>,
    /// Document version for compare-and-swap writes; 0 means not yet persisted.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wishlist {
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            products: vec![],
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, product_id: Uuid) -> bool {
        self.products.contains(&product_id)
    }

    /// Idempotent: adding an already-present product is a no-op. Returns
    /// whether the membership changed.
    pub fn add(&mut self, product_id: Uuid) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.products.push(product_id);
        self.touch();
        true
    }

    /// Idempotent: removing an absent product is a no-op, not an error.
    pub fn remove(&mut self, product_id: Uuid) -> bool {
        let before = self.products.len();
        self.products.retain(|p| *p != product_id);
        let removed = self.products.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.products.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let p = Uuid::new_v4();
        let mut wl = Wishlist::new(Uuid::new_v4());
        assert!(wl.add(p));
        assert!(!wl.add(p));
        assert_eq!(wl.products.len(), 1);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut wl = Wishlist::new(Uuid::new_v4());
        wl.add(Uuid::new_v4());
        assert!(!wl.remove(Uuid::new_v4()));
        assert_eq!(wl.products.len(), 1);
    }

    #[test]
    fn preserves_insertion_order() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut wl = Wishlist::new(Uuid::new_v4());
        wl.add(a);
        wl.add(b);
        wl.add(c);
        wl.remove(b);
        assert_eq!(wl.products, vec![a, c]);
    }
}
