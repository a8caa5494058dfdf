//! Domain model: catalog products plus the per-user cart and wishlist
//! aggregates.

pub mod cart;
pub mod product;
pub mod wishlist;

pub use cart::{compute_total, Cart, LineItem};
pub use product::{InventoryStatus, Product};
pub use wishlist::Wishlist;
